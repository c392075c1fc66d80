//! # Sequence file schemas
//!
//! Two record types are supported. Each has a fixed, hand-authored bijection
//! between the machine vocabulary of the test-bed controller and the technician
//! vocabulary used for manual editing.
//!
//! ## Record Types
//!
//! | Record type | Machine signature | Technician signature |
//! |-------------|-------------------|----------------------|
//! | [`RecordType::MainSeal`] | `TST_CellPresDemand` | `Cell_Pressure_bar` |
//! | [`RecordType::SeparationSeal`] | `TST_SepFlowDemand1` | `Sep_Seal_Flow_Set1` |
//!
//! Detection is column-presence sniffing: nothing in the data names its type.
//! `Step` and `Notes` only exist in the technician form and are never mapped.

/// Column name constants for both vocabularies.
pub mod columns;
mod mapping;
mod record_type;


pub use columns::*;
pub use mapping::{ColumnMapping, Direction, FieldKind, FieldSpec};
pub use record_type::{detect_record_type, RecordType};
