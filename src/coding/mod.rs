//! # Value coding tables
//!
//! Coded columns carry a small fixed label set in the technician form and small
//! integers in the machine form. Conversion in both directions is lossy and
//! best-effort: a value outside the vocabulary never blocks the conversion, it
//! is replaced by the coding's default and recorded in a [`CodingReport`].
//!
//! | Coding | Labels ⇄ codes | Default |
//! |--------|----------------|---------|
//! | [`Coding::YesNo`] | `No`⇄0, `Yes`⇄1 | `No` / 0 |
//! | [`Coding::TestMode`] | `Mode 1`⇄1, `Mode 2`⇄2 | `Mode 1` / 1 |
//! | [`Coding::GasType`] | `Air`⇄0, `Nitrogen`⇄1, `Helium`⇄2 | `Air` / 0 |

use log::warn;
use serde::{Deserialize, Serialize};

use crate::schema::{ColumnMapping, RecordType};
use crate::table::{Cell, SequenceTable};

mod report;

#[cfg(test)]
mod tests;

pub use report::{CodingError, CodingFallback, CodingReport};

/// The coding applied to a coded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coding {
    /// Boolean-like flag
    YesNo,
    /// Test mode selector
    TestMode,
    /// Test gas
    GasType,
}

const YES_NO: &[(&str, i64)] = &[("No", 0), ("Yes", 1)];
const TEST_MODE: &[(&str, i64)] = &[("Mode 1", 1), ("Mode 2", 2)];
const GAS_TYPE: &[(&str, i64)] = &[("Air", 0), ("Nitrogen", 1), ("Helium", 2)];

/// Result of a single lookup: either an exact vocabulary hit or the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// Value was inside the vocabulary
    Exact(T),
    /// Value was outside the vocabulary and the default was substituted
    Fallback(T),
}

impl<T> Lookup<T> {
    /// The resolved value, whichever way it was obtained.
    pub fn value(self) -> T {
        match self {
            Lookup::Exact(v) | Lookup::Fallback(v) => v,
        }
    }

    /// True when the default was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Lookup::Fallback(_))
    }
}

impl Coding {
    /// `(label, code)` pairs of this coding. The first entry is not
    /// necessarily the default; see [`Coding::default_label`].
    pub fn entries(&self) -> &'static [(&'static str, i64)] {
        match self {
            Coding::YesNo => YES_NO,
            Coding::TestMode => TEST_MODE,
            Coding::GasType => GAS_TYPE,
        }
    }

    /// Label substituted for unknown machine values.
    pub fn default_label(&self) -> &'static str {
        match self {
            Coding::YesNo => "No",
            Coding::TestMode => "Mode 1",
            Coding::GasType => "Air",
        }
    }

    /// Code substituted for unknown technician labels.
    pub fn default_code(&self) -> i64 {
        match self {
            Coding::YesNo => 0,
            Coding::TestMode => 1,
            Coding::GasType => 0,
        }
    }

    /// Labels accepted in the technician form.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries().iter().map(|(label, _)| *label)
    }

    fn label_for_code(&self, code: f64) -> Option<&'static str> {
        if code.fract() != 0.0 {
            return None;
        }
        self.entries()
            .iter()
            .find(|(_, c)| *c as f64 == code)
            .map(|(label, _)| *label)
    }

    fn valid_code(&self, code: f64) -> Option<i64> {
        self.label_for_code(code).map(|_| code as i64)
    }

    fn code_for_label(&self, label: &str) -> Option<(&'static str, i64)> {
        let label = label.trim();
        self.entries()
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .copied()
    }

    /// Machine → technician. Integer codes map to their label; a value that is
    /// already a label is normalised to its canonical spelling; anything else
    /// resolves to the default label.
    pub fn decode(&self, cell: &Cell) -> Lookup<&'static str> {
        let hit = match cell {
            Cell::Number(n) => self.label_for_code(*n),
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => self.label_for_code(n),
                Err(_) => self.code_for_label(s).map(|(label, _)| label),
            },
        };
        match hit {
            Some(label) => Lookup::Exact(label),
            None => Lookup::Fallback(self.default_label()),
        }
    }

    /// Technician → machine. Labels map to their code (case-insensitive); a
    /// value that is already a valid code is kept; anything else resolves to
    /// the default code.
    pub fn encode(&self, cell: &Cell) -> Lookup<i64> {
        let hit = match cell {
            Cell::Text(s) => self
                .code_for_label(s)
                .map(|(_, code)| code)
                .or_else(|| s.trim().parse::<f64>().ok().and_then(|n| self.valid_code(n))),
            Cell::Number(n) => self.valid_code(*n),
        };
        match hit {
            Some(code) => Lookup::Exact(code),
            None => Lookup::Fallback(self.default_code()),
        }
    }
}

/// Decode every coded column of `record_type` that is present in `table`.
///
/// Column names may be in either vocabulary. Absent columns are skipped.
pub fn decode_table(table: &mut SequenceTable, record_type: RecordType) -> CodingReport {
    let mut report = CodingReport::default();
    for field in ColumnMapping::for_type(record_type).coded_fields() {
        let Some(coding) = field.coding() else {
            continue;
        };
        for column in [field.technician, field.machine] {
            table.map_column(column, |row, cell| {
                let lookup = coding.decode(cell);
                if lookup.is_fallback() {
                    report.record(row, column, cell, Cell::text(lookup.value()));
                }
                Cell::text(lookup.value())
            });
        }
    }
    log_fallbacks(&report, "decode");
    report
}

/// Encode every coded column of `record_type` that is present in `table`.
///
/// Column names may be in either vocabulary. Absent columns are skipped.
pub fn encode_table(table: &mut SequenceTable, record_type: RecordType) -> CodingReport {
    let mut report = CodingReport::default();
    for field in ColumnMapping::for_type(record_type).coded_fields() {
        let Some(coding) = field.coding() else {
            continue;
        };
        for column in [field.machine, field.technician] {
            table.map_column(column, |row, cell| {
                let lookup = coding.encode(cell);
                if lookup.is_fallback() {
                    report.record(row, column, cell, Cell::from(lookup.value()));
                }
                Cell::from(lookup.value())
            });
        }
    }
    log_fallbacks(&report, "encode");
    report
}

fn log_fallbacks(report: &CodingReport, direction: &str) {
    for fallback in report.fallbacks() {
        warn!(
            "{}: step {} column {} value {:?} is not in the vocabulary, using {}",
            direction,
            fallback.row + 1,
            fallback.column,
            fallback.original,
            fallback.substituted
        );
    }
}
