//! # seqbridge - Test sequence bridge
//!
//! `seqbridge` converts equipment test sequences between two representations:
//!
//! - the **machine form**: a semicolon-delimited parameter file with terse,
//!   prefixed field names and numeric codes, consumed by the test-bed controller
//! - the **technician form**: descriptive column names with units, readable
//!   labels (`Yes`/`No`, `Mode 1`/`Mode 2`), a step number and free-text notes
//!
//! Along the way it flags setpoints outside the test bed's hardware limits and
//! renders the sequence as a styled spreadsheet or a controller file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seqbridge::convert::{load_for_editing, to_machine};
//! use seqbridge::reader::TableReader;
//! use seqbridge::validator::SafetyValidator;
//! use seqbridge::writer::SpreadsheetWriter;
//!
//! // Read a controller file (encoding is detected)
//! let outcome = TableReader::default().try_read_path("MainSealSet2.csv")?;
//!
//! // Detect the record type and convert to the technician form
//! let conversion = load_for_editing(&outcome.table)?;
//!
//! // Flag unsafe setpoints
//! let decorations = SafetyValidator::default().decorate(&conversion.table);
//! for (row, column, violation) in decorations.iter() {
//!     println!("step {} {}: {}", row + 1, column, violation.message);
//! }
//!
//! // Export as a workbook, or back to a controller file
//! let workbook = SpreadsheetWriter::default().write(
//!     &conversion.table,
//!     conversion.record_type,
//!     &decorations,
//! )?;
//! workbook.save(".")?;
//!
//! let machine = to_machine(&conversion.table, conversion.record_type)?;
//! println!("{} steps ready for the controller", machine.table.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`table`]: the in-memory table shared by every stage
//! - [`reader`]: semicolon-delimited reader with text encoding fallback
//! - [`schema`]: record types, detection and the column mappings
//! - [`coding`]: label ⇄ code tables for coded columns
//! - [`convert`]: machine ⇄ technician conversion pipeline
//! - [`validator`]: advisory safety-limit checks
//! - [`writer`]: machine CSV and spreadsheet export
//! - [`templates`]: example and placeholder sequences
//!
//! ## Pipeline
//!
//! ```text
//! read ─▶ detect ─▶ rename ─▶ decode ─▶ validate/display ─▶ encode ─▶ write
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod coding;
pub mod convert;
pub mod reader;
pub mod schema;
pub mod table;
pub mod templates;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::coding::{Coding, CodingReport, Lookup};
    pub use crate::convert::{
        detect, load_for_editing, number_steps, to_machine, to_technician, ConvertError,
        Conversion,
    };
    pub use crate::reader::{safe_read_csv, ReadOutcome, ReaderConfig, ReaderError, TableReader};
    pub use crate::schema::{detect_record_type, ColumnMapping, Direction, RecordType};
    pub use crate::table::{Cell, SequenceTable};
    pub use crate::validator::{Decorations, SafetyLimits, SafetyValidator, ValidationReport};
    pub use crate::writer::{
        CsvConfig, ExportArtifact, ExportError, JobInfo, MachineCsvWriter, SpreadsheetConfig,
        SpreadsheetWriter,
    };
}
