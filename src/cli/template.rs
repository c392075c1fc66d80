use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use seqbridge::schema::RecordType;
use seqbridge::templates::{example_sequence, placeholder_template};
use seqbridge::writer::write_delimited;

use super::TemplateKind;

/// Write a starter sequence in the controller format
pub fn run(output: PathBuf, kind: TemplateKind, record_type: RecordType) -> Result<()> {
    let table = match kind {
        TemplateKind::Example => {
            if record_type != RecordType::MainSeal {
                info!("The example sequence is a main seal run; --record-type is ignored");
            }
            example_sequence()
        }
        TemplateKind::Placeholder => placeholder_template(record_type)?,
    };

    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_delimited(&table, BufWriter::new(file), b';')?;

    println!("Template written to: {}", output.display());
    println!("  Steps: {}", table.len());
    println!("  Columns: {}", table.width());
    Ok(())
}
