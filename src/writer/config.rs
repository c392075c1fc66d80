use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::validator::SafetyLimits;

/// Optional job details printed on the instructions sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobInfo {
    /// Job or work-order number
    pub job_number: Option<String>,
    /// Customer name
    pub customer: Option<String>,
    /// Technician responsible for the sequence
    pub technician: Option<String>,
}

impl JobInfo {
    /// `(label, value)` pairs for the fields that are set.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Job number", &self.job_number),
            ("Customer", &self.customer),
            ("Technician", &self.technician),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

/// Configuration for spreadsheet export
#[derive(Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Fill cells that violate a safety rule
    pub highlight_violations: bool,

    /// Logo embedded at the top of the instructions sheet
    pub logo: Option<PathBuf>,

    /// Job details for the instructions sheet
    pub job: JobInfo,

    /// Limits quoted on the instructions sheet
    pub limits: SafetyLimits,

    /// Timestamp used for the file name and sheet; `None` means now
    pub generated_at: Option<NaiveDateTime>,

    /// Width of ordinary data columns, in characters
    pub column_width: f64,

    /// Width of the `Notes` column, in characters
    pub notes_width: f64,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            highlight_violations: true,
            logo: None,
            job: JobInfo::default(),
            limits: SafetyLimits::default(),
            generated_at: None,
            column_width: 20.0,
            notes_width: 45.0,
        }
    }
}

/// Configuration for machine CSV export
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: u8,

    /// Fail instead of substituting defaults for out-of-vocabulary labels
    pub strict: bool,

    /// Timestamp used for the file name; `None` means now
    pub generated_at: Option<NaiveDateTime>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            strict: false,
            generated_at: None,
        }
    }
}
