use std::io::Write;

use csv::WriterBuilder;

use super::config::CsvConfig;
use super::{csv_file_name, timestamp, ExportArtifact, ExportError, CSV_MEDIA_TYPE};
use crate::coding::CodingReport;
use crate::convert;
use crate::schema::RecordType;
use crate::table::SequenceTable;

/// Write a table as delimited text exactly as it is, header first.
pub fn write_delimited<W: Write>(table: &SequenceTable, writer: W, delimiter: u8) -> Result<(), ExportError> {
    let mut csv_writer = WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders technician-form tables as controller input files.
#[derive(Debug, Clone, Default)]
pub struct MachineCsvWriter {
    config: CsvConfig,
}

impl MachineCsvWriter {
    /// Writer with a custom configuration
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Convert to the machine vocabulary and render as delimited text.
    ///
    /// Out-of-vocabulary labels fall back to their defaults and are listed in
    /// the returned report, unless the writer is strict, in which case they
    /// are an error.
    pub fn write(
        &self,
        table: &SequenceTable,
        record_type: RecordType,
    ) -> Result<(ExportArtifact, CodingReport), ExportError> {
        let mut conversion = convert::to_machine(table, record_type)?;
        if self.config.strict {
            conversion = conversion.strict()?;
        }

        let mut bytes = Vec::new();
        write_delimited(&conversion.table, &mut bytes, self.config.delimiter)?;

        let artifact = ExportArtifact {
            bytes,
            file_name: csv_file_name(record_type, timestamp(self.config.generated_at)),
            media_type: CSV_MEDIA_TYPE,
        };
        Ok((artifact, conversion.coding))
    }
}
