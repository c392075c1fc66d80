use encoding_rs::{Encoding, ISO_8859_15, UTF_8, WINDOWS_1252};

use super::ReaderError;

/// Configuration for reading sequence files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Encodings to try, in order. A byte-order mark, when present, is tried first.
    pub encodings: Vec<&'static Encoding>,

    /// Field delimiter
    pub delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            encodings: vec![UTF_8, WINDOWS_1252, ISO_8859_15],
            delimiter: b';',
        }
    }
}

impl ReaderConfig {
    /// Build a configuration from WHATWG encoding labels such as `"utf-8"` or `"latin1"`.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, ReaderError> {
        if labels.is_empty() {
            return Err(ReaderError::NoEncodings);
        }
        let encodings = labels
            .iter()
            .map(|label| {
                Encoding::for_label(label.as_ref().trim().as_bytes())
                    .ok_or_else(|| ReaderError::UnknownEncoding(label.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            encodings,
            ..Default::default()
        })
    }
}
