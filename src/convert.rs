//! # Vocabulary conversion
//!
//! The pipeline between the two forms of a sequence:
//!
//! ```text
//! machine form                               technician form
//! TST_SpeedDem;TST_APFlag;...   ──to_technician──▶  Step | Speed_RPM | Auto_Proceed | ... | Notes
//!                               ◀──to_machine────
//! ```
//!
//! Both directions accept input that is already (partly) in the target
//! vocabulary, so converting twice is harmless.

use log::{debug, info};

use crate::coding::{self, CodingError, CodingReport};
use crate::schema::{detect_record_type, ColumnMapping, Direction, RecordType, NOTES, STEP};
use crate::table::{Cell, SequenceTable, TableError};

/// Errors raised by the converters
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Neither record type's signature column is present
    #[error("Unknown file type: none of the signature columns found in [{}]", .columns.join(", "))]
    UnknownRecordType {
        /// Columns of the offending table
        columns: Vec<String>,
    },

    /// Table shape problem, such as a rename colliding with an existing column
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Strict coding refused a value outside the vocabulary
    #[error(transparent)]
    Coding(#[from] CodingError),
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Record type the conversion used
    pub record_type: RecordType,
    /// Converted table
    pub table: SequenceTable,
    /// Values that fell back to their coding's default
    pub coding: CodingReport,
}

impl Conversion {
    /// Reject the conversion if any coded value fell back to its default.
    pub fn strict(self) -> Result<Self, ConvertError> {
        self.coding.clone().into_strict()?;
        Ok(self)
    }
}

/// Detect the record type of a table, failing when it is unknown.
pub fn detect(table: &SequenceTable) -> Result<RecordType, ConvertError> {
    detect_record_type(table.columns()).ok_or_else(|| ConvertError::UnknownRecordType {
        columns: table.columns().to_vec(),
    })
}

/// Convert a table to the technician form.
///
/// Renames mapped columns, decodes coded columns to labels, coerces setpoints
/// to numbers and adds the `Step` / `Notes` columns.
pub fn to_technician(table: &SequenceTable, record_type: RecordType) -> Result<Conversion, ConvertError> {
    let mapping = ColumnMapping::for_type(record_type);
    let mut table = table.clone();

    mapping.rename(&mut table, Direction::ToTechnician)?;
    let coding = coding::decode_table(&mut table, record_type);
    coerce_setpoints(&mut table, &mapping, Direction::ToTechnician);
    number_steps(&mut table)?;

    info!(
        "Converted {} steps to technician form ({})",
        table.len(),
        record_type
    );
    Ok(Conversion {
        record_type,
        table,
        coding,
    })
}

/// Convert a table to the machine form.
///
/// Renames mapped columns, encodes coded columns to integers, coerces
/// setpoints to numbers and strips `Step` / `Notes`.
pub fn to_machine(table: &SequenceTable, record_type: RecordType) -> Result<Conversion, ConvertError> {
    let mapping = ColumnMapping::for_type(record_type);
    let mut table = table.clone();

    mapping.rename(&mut table, Direction::ToMachine)?;
    let coding = coding::encode_table(&mut table, record_type);
    coerce_setpoints(&mut table, &mapping, Direction::ToMachine);
    for column in [STEP, NOTES] {
        table.remove_column(column);
    }

    info!("Converted {} steps to machine form ({})", table.len(), record_type);
    Ok(Conversion {
        record_type,
        table,
        coding,
    })
}

/// Detect the record type and convert to the technician form.
pub fn load_for_editing(table: &SequenceTable) -> Result<Conversion, ConvertError> {
    let record_type = detect(table)?;
    to_technician(table, record_type)
}

/// Insert a leading `Step` column numbered 1..N in row order and make sure a
/// trailing `Notes` column exists.
///
/// Any existing `Step` values are discarded. Existing notes are kept and moved
/// to the end.
pub fn number_steps(table: &mut SequenceTable) -> Result<(), TableError> {
    table.remove_column(STEP);
    table.insert_column(0, STEP, |row| Cell::from((row + 1) as i64))?;

    let notes = table.remove_column(NOTES);
    let width = table.width();
    match notes {
        Some(values) => {
            let mut values = values.into_iter();
            table.insert_column(width, NOTES, |_| match values.next() {
                Some(Cell::Text(s)) => Cell::Text(s),
                Some(other) => Cell::text(other.to_string()),
                None => Cell::text(""),
            })?;
        }
        None => table.insert_column(width, NOTES, |_| Cell::text(""))?,
    }
    Ok(())
}

fn coerce_setpoints(table: &mut SequenceTable, mapping: &ColumnMapping, direction: Direction) {
    for field in mapping.setpoint_fields() {
        let column = match direction {
            Direction::ToTechnician => field.technician,
            Direction::ToMachine => field.machine,
        };
        let mut coerced = 0usize;
        table.map_column(column, |_, cell| {
            if !matches!(cell, Cell::Number(n) if n.is_finite()) {
                coerced += 1;
            }
            cell.coerce_numeric()
        });
        if coerced > 0 {
            debug!("Coerced {} non-numeric value(s) in {} to 0", coerced, column);
        }
    }
}
