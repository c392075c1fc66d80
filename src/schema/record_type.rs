use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::columns::*;

/// Which of the two supported test-sequence schemas a table follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// Primary chamber (main seal) sequence
    MainSeal,
    /// Secondary / separation seal sequence
    SeparationSeal,
}

impl RecordType {
    /// All record types, in detection priority order.
    pub const ALL: [RecordType; 2] = [RecordType::MainSeal, RecordType::SeparationSeal];

    /// Short identifier used in suggested file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::MainSeal => "main_seal",
            RecordType::SeparationSeal => "separation_seal",
        }
    }

    /// Human-readable title used in reports and the instructions sheet.
    pub fn title(&self) -> &'static str {
        match self {
            RecordType::MainSeal => "Main Seal (chamber) test",
            RecordType::SeparationSeal => "Separation Seal test",
        }
    }

    /// Column whose presence identifies this type in the machine vocabulary.
    pub fn machine_signature(&self) -> &'static str {
        match self {
            RecordType::MainSeal => TST_CELL_PRES_DEMAND,
            RecordType::SeparationSeal => TST_SEP_FLOW_DEMAND_1,
        }
    }

    /// Column whose presence identifies this type in the technician vocabulary.
    pub fn technician_signature(&self) -> &'static str {
        match self {
            RecordType::MainSeal => CELL_PRESSURE_BAR,
            RecordType::SeparationSeal => SEP_SEAL_FLOW_SET1,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "main_seal" | "main" | "chamber" => Ok(RecordType::MainSeal),
            "separation_seal" | "separation" | "sep" => Ok(RecordType::SeparationSeal),
            other => Err(format!("Unknown record type: {}", other)),
        }
    }
}

/// Sniff the record type from a set of column names.
///
/// Machine signatures are checked before technician signatures so that
/// already-converted input is still recognised. First match wins; `None`
/// means the type is unknown.
pub fn detect_record_type<S: AsRef<str>>(columns: &[S]) -> Option<RecordType> {
    let has = |name: &str| columns.iter().any(|c| c.as_ref() == name);

    RecordType::ALL
        .iter()
        .copied()
        .find(|t| has(t.machine_signature()))
        .or_else(|| {
            RecordType::ALL
                .iter()
                .copied()
                .find(|t| has(t.technician_signature()))
        })
}
