use std::fmt;

use crate::table::Cell;

/// One value that was outside its coding's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct CodingFallback {
    /// Zero-based row index
    pub row: usize,
    /// Column the value was found in
    pub column: String,
    /// Value as read
    pub original: String,
    /// Default that replaced it
    pub substituted: String,
}

/// Every default substitution made while coding a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodingReport {
    fallbacks: Vec<CodingFallback>,
}

impl CodingReport {
    pub(crate) fn record(&mut self, row: usize, column: &str, original: &Cell, substituted: Cell) {
        self.fallbacks.push(CodingFallback {
            row,
            column: column.to_string(),
            original: original.to_string(),
            substituted: substituted.to_string(),
        });
    }

    /// Substitutions in the order they were made.
    pub fn fallbacks(&self) -> &[CodingFallback] {
        &self.fallbacks
    }

    /// True when every value was inside its vocabulary.
    pub fn is_clean(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Merge another report into this one.
    pub fn extend(&mut self, other: CodingReport) {
        self.fallbacks.extend(other.fallbacks);
    }

    /// Turn any substitution into an error, for callers that refuse lossy input.
    pub fn into_strict(self) -> Result<(), CodingError> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(CodingError::OutOfVocabulary(self))
        }
    }
}

impl fmt::Display for CodingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fallback in &self.fallbacks {
            writeln!(
                f,
                "  step {}, {}: {:?} -> {}",
                fallback.row + 1,
                fallback.column,
                fallback.original,
                fallback.substituted
            )?;
        }
        Ok(())
    }
}

/// Errors raised by strict coding.
#[derive(Debug, thiserror::Error)]
pub enum CodingError {
    /// One or more values were replaced by defaults
    #[error("{n} value(s) outside the coding vocabulary:\n{0}", n = .0.fallbacks().len())]
    OutOfVocabulary(CodingReport),
}
