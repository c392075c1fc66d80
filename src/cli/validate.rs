use anyhow::Result;
use log::info;
use std::path::PathBuf;

use seqbridge::validator::SafetyValidator;

use super::{open_for_editing, Config};

/// Check a sequence file against the safety limits
pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?;

    info!("Sequence Validator");
    info!("==================");
    info!("File: {}", file.display());
    info!("");

    let conversion = match open_for_editing(&file, &config) {
        Ok(conversion) => conversion,
        Err(e) => {
            eprintln!("Validation error: {:#}", e);
            std::process::exit(1);
        }
    };

    let validator = SafetyValidator::new(config.limits);
    let report = validator
        .report(&conversion.table, file.display().to_string())
        .with_coding(conversion.coding);

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
