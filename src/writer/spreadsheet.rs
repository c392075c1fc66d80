use log::{debug, warn};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet};

use super::config::SpreadsheetConfig;
use super::{spreadsheet_file_name, timestamp, ExportArtifact, ExportError, XLSX_MEDIA_TYPE};
use crate::schema::{ColumnMapping, FieldKind, RecordType, NOTES, STEP};
use crate::table::{Cell, SequenceTable};
use crate::validator::{Decorations, SafetyLimits};

/// Name of the data sheet
pub const DATA_SHEET: &str = "Test Sequence";
/// Name of the instructions sheet
pub const INSTRUCTIONS_SHEET: &str = "Instructions";

const HEADER_BLUE: u32 = 0x1F4E78;
const VIOLATION_RED: u32 = 0xFFC7CE;
const VIOLATION_TEXT: u32 = 0x9C0006;

/// Renders technician-form tables as styled workbooks.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetWriter {
    config: SpreadsheetConfig,
}

impl SpreadsheetWriter {
    /// Writer with a custom configuration
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self { config }
    }

    /// Build the workbook: a styled data sheet and an instructions sheet.
    ///
    /// `decorations` marks the cells to highlight; pass
    /// `&Decorations::default()` for none.
    pub fn write(
        &self,
        table: &SequenceTable,
        record_type: RecordType,
        decorations: &Decorations,
    ) -> Result<ExportArtifact, ExportError> {
        let generated_at = timestamp(self.config.generated_at);
        let mut workbook = Workbook::new();

        let data = workbook.add_worksheet().set_name(DATA_SHEET)?;
        self.write_data_sheet(data, table, decorations)?;

        let instructions = workbook.add_worksheet().set_name(INSTRUCTIONS_SHEET)?;
        self.write_instructions(instructions, record_type, table.len(), generated_at)?;

        let bytes = workbook.save_to_buffer()?;
        debug!("Spreadsheet rendered: {} bytes", bytes.len());

        Ok(ExportArtifact {
            bytes,
            file_name: spreadsheet_file_name(record_type, generated_at),
            media_type: XLSX_MEDIA_TYPE,
        })
    }

    fn write_data_sheet(
        &self,
        sheet: &mut Worksheet,
        table: &SequenceTable,
        decorations: &Decorations,
    ) -> Result<(), ExportError> {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_BLUE))
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        let body = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let flagged = body
            .clone()
            .set_background_color(Color::RGB(VIOLATION_RED))
            .set_font_color(Color::RGB(VIOLATION_TEXT))
            .set_bold();
        let notes = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        for (col, name) in table.columns().iter().enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, name, &header)?;
            let width = match name.as_str() {
                NOTES => self.config.notes_width,
                STEP => 8.0,
                _ => self.config.column_width,
            };
            sheet.set_column_width(col, width)?;
        }
        sheet.set_row_height(0, 30)?;
        sheet.set_freeze_panes(1, 0)?;

        for (row_idx, row) in table.rows().iter().enumerate() {
            let xl_row = row_idx as u32 + 1;
            for (col, (name, cell)) in table.columns().iter().zip(row).enumerate() {
                let format = if name == NOTES {
                    &notes
                } else if self.config.highlight_violations && decorations.is_flagged(row_idx, name) {
                    &flagged
                } else {
                    &body
                };
                match cell {
                    Cell::Number(n) => sheet.write_number_with_format(xl_row, col as u16, *n, format)?,
                    Cell::Text(s) => sheet.write_string_with_format(xl_row, col as u16, s, format)?,
                };
            }
        }

        Ok(())
    }

    fn write_instructions(
        &self,
        sheet: &mut Worksheet,
        record_type: RecordType,
        steps: usize,
        generated_at: chrono::NaiveDateTime,
    ) -> Result<(), ExportError> {
        let title = Format::new().set_bold().set_font_size(16);
        let heading = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_BLUE))
            .set_border(FormatBorder::Thin);
        let label = Format::new().set_bold();
        let cell = Format::new().set_border(FormatBorder::Thin).set_text_wrap();
        let wrap = Format::new().set_text_wrap();

        sheet.set_column_width(0, 26)?;
        sheet.set_column_width(1, 26)?;
        sheet.set_column_width(2, 60)?;

        let mut row: u32 = 0;
        sheet.write_string_with_format(row, 0, "Test Sequence Instructions", &title)?;
        if let Some(logo) = &self.config.logo {
            match Image::new(logo) {
                Ok(image) => {
                    let image = image.set_scale_to_size(240, 80, true);
                    sheet.insert_image(row, 2, &image)?;
                }
                Err(e) => warn!("Skipping logo {}: {}", logo.display(), e),
            }
        }
        row += 2;

        let mut details = vec![
            ("Sequence type", record_type.title().to_string()),
            ("Steps", steps.to_string()),
            ("Generated", generated_at.format("%Y-%m-%d %H:%M").to_string()),
        ];
        details.extend(
            self.config
                .job
                .fields()
                .into_iter()
                .map(|(k, v)| (k, v.to_string())),
        );
        for (key, value) in details {
            sheet.write_string_with_format(row, 0, key, &label)?;
            sheet.write_string(row, 1, &value)?;
            row += 1;
        }
        row += 1;

        sheet.write_string_with_format(row, 0, "How to edit", &label)?;
        row += 1;
        for line in guidance(&self.config.limits) {
            sheet.write_string_with_format(row, 0, &line, &wrap)?;
            row += 1;
        }
        row += 1;

        sheet.write_string_with_format(row, 0, "Column", &heading)?;
        sheet.write_string_with_format(row, 1, "Controller field", &heading)?;
        sheet.write_string_with_format(row, 2, "Allowed values", &heading)?;
        row += 1;

        for field in ColumnMapping::for_type(record_type).fields() {
            let allowed = match field.kind {
                FieldKind::Setpoint => "Number".to_string(),
                FieldKind::Coded(coding) => coding.labels().collect::<Vec<_>>().join(" / "),
            };
            sheet.write_string_with_format(row, 0, field.technician, &cell)?;
            sheet.write_string_with_format(row, 1, field.machine, &cell)?;
            sheet.write_string_with_format(row, 2, &allowed, &cell)?;
            row += 1;
        }
        for (name, allowed) in [(STEP, "Assigned automatically"), (NOTES, "Free text, not sent to the controller")] {
            sheet.write_string_with_format(row, 0, name, &cell)?;
            sheet.write_string_with_format(row, 1, "-", &cell)?;
            sheet.write_string_with_format(row, 2, allowed, &cell)?;
            row += 1;
        }

        Ok(())
    }
}

fn guidance(limits: &SafetyLimits) -> Vec<String> {
    vec![
        format!("1. Edit values on the '{}' sheet only. Do not rename or reorder the header row.", DATA_SHEET),
        "2. Each row is one test step, executed top to bottom. Step numbers are reassigned on import.".to_string(),
        "3. Coded columns accept only the values listed below; anything else is sent as the default.".to_string(),
        format!(
            "4. Safety limits: speed <= {} RPM, chamber pressure <= {} bar, interface pressure within ±{} bar of {} x chamber pressure.",
            limits.max_speed_rpm,
            limits.max_cell_pressure_bar,
            limits.interface_pressure_tolerance_bar,
            limits.interface_pressure_ratio
        ),
        "5. Red cells exceed a safety limit. Check them before running the sequence.".to_string(),
        "6. Notes are for the technician only and are removed from the controller file.".to_string(),
    ]
}
