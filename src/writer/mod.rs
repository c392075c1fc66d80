//! # Sequence export
//!
//! Renders a technician-form table as one of two downloadable artifacts:
//!
//! 1. **Machine CSV**: semicolon-delimited, machine vocabulary, numeric codes,
//!    `Step` / `Notes` stripped. This is the file the test-bed controller loads.
//!
//! 2. **Spreadsheet**: an `.xlsx` workbook with a styled "Test Sequence" sheet
//!    and an "Instructions" sheet for the technician.
//!
//! Writers never mutate their input. Each returns an [`ExportArtifact`]: the
//! bytes plus a suggested file name and media type, so a caller can either save
//! the artifact or hand it to a download.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::info;

use crate::schema::RecordType;

mod config;
mod csv_writer;
mod error;
mod spreadsheet;

#[cfg(test)]
mod tests;

pub use config::{CsvConfig, JobInfo, SpreadsheetConfig};
pub use csv_writer::{write_delimited, MachineCsvWriter};
pub use error::ExportError;
pub use spreadsheet::{SpreadsheetWriter, DATA_SHEET, INSTRUCTIONS_SHEET};

/// Media type of the machine CSV
pub const CSV_MEDIA_TYPE: &str = "text/csv";
/// Media type of the spreadsheet
pub const XLSX_MEDIA_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A rendered export, ready to save or download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// File contents
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub file_name: String,
    /// Media (MIME) type
    pub media_type: &'static str,
}

impl ExportArtifact {
    /// Save the artifact. A directory target receives the suggested file name.
    pub fn save<P: AsRef<Path>>(&self, target: P) -> Result<PathBuf, ExportError> {
        let target = target.as_ref();
        let path = if target.is_dir() {
            target.join(&self.file_name)
        } else {
            target.to_path_buf()
        };
        std::fs::write(&path, &self.bytes)?;
        info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// `edited_<type>_test_<YYYYmmdd_HHMM>.xlsx`
pub fn spreadsheet_file_name(record_type: RecordType, at: NaiveDateTime) -> String {
    format!("edited_{}_test_{}.xlsx", record_type, at.format("%Y%m%d_%H%M"))
}

/// `edited_<type>_test_<YYYYmmdd>.csv`
pub fn csv_file_name(record_type: RecordType, at: NaiveDateTime) -> String {
    format!("edited_{}_test_{}.csv", record_type, at.format("%Y%m%d"))
}

fn timestamp(configured: Option<NaiveDateTime>) -> NaiveDateTime {
    configured.unwrap_or_else(|| Local::now().naive_local())
}
