use anyhow::Result;
use std::path::PathBuf;

use seqbridge::schema::{detect_record_type, ColumnMapping, RecordType};

use super::{read_sequence, Config};

/// Display information about a sequence file
pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?;
    let outcome = read_sequence(&file, &config)?;
    let table = &outcome.table;
    let record_type = detect_record_type(table.columns());

    println!("Sequence File Information");
    println!("=========================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Encoding: {}", outcome.encoding.name());
    println!("  Steps: {}", table.len());
    println!("  Columns: {}", table.width());
    match record_type {
        Some(record_type) => {
            println!("  Record type: {}", record_type.title());
            println!("  Form: {}", form(table.columns(), record_type));
        }
        None => println!("  Record type: unknown"),
    }
    println!();

    println!("Columns:");
    let mapping = record_type.map(ColumnMapping::for_type);
    for (i, name) in table.columns().iter().enumerate() {
        let counterpart = mapping.as_ref().and_then(|m| m.field(name)).map(|field| {
            if field.machine == name.as_str() {
                field.technician
            } else {
                field.machine
            }
        });
        match counterpart {
            Some(other) => println!("  {:3}. {} <-> {}", i + 1, name, other),
            None => println!("  {:3}. {}", i + 1, name),
        }
    }

    Ok(())
}

fn form(columns: &[String], record_type: RecordType) -> &'static str {
    if columns.iter().any(|c| c == record_type.machine_signature()) {
        "machine"
    } else {
        "technician"
    }
}
