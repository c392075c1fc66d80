//! # Sequence file reader
//!
//! Reads semicolon-delimited sequence files from a path or a byte buffer.
//!
//! Each configured text encoding is tried in order with strict decoding (no
//! replacement characters) followed by a CSV parse. Rows shorter than the
//! header are padded; longer rows are rejected. The first encoding
//! for which both succeed wins. After parsing, not-a-number, infinite and empty
//! values become zero; the free-text `Notes` column stays text.
//!
//! Two flavours are offered:
//!
//! - `try_read_*` returns a [`ReaderError`] when every encoding fails
//! - `read_*` never fails and returns [`SequenceTable::empty`] instead
//!
//! ## Example
//!
//! ```rust,no_run
//! use seqbridge::reader::TableReader;
//!
//! let reader = TableReader::default();
//! let outcome = reader.try_read_path("MainSealSet2.csv")?;
//! println!("{} steps read as {}", outcome.table.len(), outcome.encoding.name());
//! # Ok::<(), seqbridge::reader::ReaderError>(())
//! ```

use std::borrow::Cow;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use encoding_rs::Encoding;
use log::{debug, info, warn};

use crate::schema::NOTES;
use crate::table::{Cell, SequenceTable};

mod config;
mod error;


pub use config::ReaderConfig;
pub use error::ReaderError;

/// A successfully parsed table and the encoding that decoded it.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    /// Parsed table
    pub table: SequenceTable,
    /// Encoding that succeeded
    pub encoding: &'static Encoding,
}

/// Reader for semicolon-delimited sequence files
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    config: ReaderConfig,
}

impl TableReader {
    /// Create a reader with a custom configuration
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Reader configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a file, returning the empty-table sentinel on any failure.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> SequenceTable {
        let path = path.as_ref();
        match self.try_read_path(path) {
            Ok(outcome) => outcome.table,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                SequenceTable::empty()
            }
        }
    }

    /// Read a byte buffer, returning the empty-table sentinel on any failure.
    pub fn read_bytes(&self, bytes: &[u8]) -> SequenceTable {
        match self.try_read_bytes(bytes) {
            Ok(outcome) => outcome.table,
            Err(e) => {
                warn!("Failed to read uploaded data: {}", e);
                SequenceTable::empty()
            }
        }
    }

    /// Read a file from disk.
    pub fn try_read_path<P: AsRef<Path>>(&self, path: P) -> Result<ReadOutcome, ReaderError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let outcome = self.try_read_bytes(&bytes)?;
        info!(
            "Read {} ({} steps, {} columns, {})",
            path.display(),
            outcome.table.len(),
            outcome.table.width(),
            outcome.encoding.name()
        );
        Ok(outcome)
    }

    /// Read a byte buffer.
    ///
    /// Fails with [`ReaderError::Malformed`] when some encoding decoded the
    /// bytes but the text is not a valid table, and with
    /// [`ReaderError::Undecodable`] when no encoding decoded them at all.
    pub fn try_read_bytes(&self, bytes: &[u8]) -> Result<ReadOutcome, ReaderError> {
        if self.config.encodings.is_empty() {
            return Err(ReaderError::NoEncodings);
        }

        let mut undecoded = Vec::new();
        let mut malformed = Vec::new();

        let bom = Encoding::for_bom(bytes).map(|(encoding, bom_len)| {
            (encoding, &bytes[bom_len..], format!("{} (BOM)", encoding.name()))
        });
        let candidates = bom.into_iter().chain(
            self.config
                .encodings
                .iter()
                .map(|&encoding| (encoding, bytes, encoding.name().to_string())),
        );

        for (encoding, payload, label) in candidates {
            match self.attempt(encoding, payload) {
                Ok(table) => return Ok(ReadOutcome { table, encoding }),
                Err(Failure::Decode(reason)) => {
                    debug!("Decoding as {} failed: {}", label, reason);
                    undecoded.push((label, reason));
                }
                Err(Failure::Parse(reason)) => {
                    debug!("Parsing as {} failed: {}", label, reason);
                    malformed.push((label, reason));
                }
            }
        }

        if malformed.is_empty() {
            Err(ReaderError::Undecodable { attempts: undecoded })
        } else {
            Err(ReaderError::Malformed { attempts: malformed })
        }
    }

    fn attempt(&self, encoding: &'static Encoding, bytes: &[u8]) -> Result<SequenceTable, Failure> {
        let text: Cow<'_, str> = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| Failure::Decode(format!("invalid {} byte sequence", encoding.name())))?;
        self.parse(&text).map_err(Failure::Parse)
    }

    fn parse(&self, text: &str) -> Result<SequenceTable, String> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| format!("failed to read header: {}", e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err("no header row".to_string());
        }

        let mut table = SequenceTable::with_columns(headers.iter().cloned()).map_err(|e| e.to_string())?;

        for (index, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| format!("row {}: {}", index + 1, e))?;
            if record.len() > headers.len() {
                return Err(format!(
                    "row {}: {} fields, header has {}",
                    index + 1,
                    record.len(),
                    headers.len()
                ));
            }
            // Short rows are padded: absent trailing values read as empty.
            let row = headers
                .iter()
                .enumerate()
                .map(|(i, header)| parse_cell(header, record.get(i).unwrap_or("")))
                .collect();
            table.push_row(row).map_err(|e| e.to_string())?;
        }

        Ok(table)
    }
}

/// Why one encoding attempt failed.
enum Failure {
    /// The bytes are not valid in this encoding
    Decode(String),
    /// The text decoded but is not a valid table
    Parse(String),
}

/// Parse one field. Numbers stay numbers (non-finite → 0), empty → 0, notes stay text.
fn parse_cell(header: &str, value: &str) -> Cell {
    if header == NOTES {
        return Cell::text(value);
    }
    if value.is_empty() {
        return Cell::Number(0.0);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        Ok(_) => Cell::Number(0.0),
        Err(_) => Cell::text(value),
    }
}

/// Read a file with the default configuration, never failing.
pub fn safe_read_csv<P: AsRef<Path>>(path: P) -> SequenceTable {
    TableReader::default().read_path(path)
}
