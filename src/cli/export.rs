use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use seqbridge::validator::SafetyValidator;
use seqbridge::writer::{
    CsvConfig, ExportArtifact, JobInfo, MachineCsvWriter, SpreadsheetConfig, SpreadsheetWriter,
};

use super::{open_for_editing, Config, FormatArg};

/// Arguments of the `export` subcommand.
pub struct ExportArgs {
    pub file: PathBuf,
    pub format: FormatArg,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict: bool,
    pub no_highlight: bool,
    pub logo: Option<PathBuf>,
    pub job_number: Option<String>,
    pub technician: Option<String>,
    pub customer: Option<String>,
}

/// Export a sequence file as a workbook or a controller file
pub fn run(args: ExportArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let strict = args.strict || config.export.strict.unwrap_or(false);

    let mut conversion = open_for_editing(&args.file, &config)?;
    if strict {
        conversion = conversion
            .strict()
            .with_context(|| format!("Refusing to export {}", args.file.display()))?;
    }

    let artifact = match args.format {
        FormatArg::Csv => {
            let writer = MachineCsvWriter::new(CsvConfig {
                strict,
                ..Default::default()
            });
            let (artifact, coding) = writer.write(&conversion.table, conversion.record_type)?;
            if !coding.is_clean() {
                warn!("Coded values replaced by defaults:\n{}", coding);
            }
            artifact
        }
        FormatArg::Xlsx => {
            let validator = SafetyValidator::new(config.limits);
            let decorations = validator.decorate(&conversion.table);
            if !decorations.is_empty() {
                warn!("{} cell(s) exceed a safety limit", decorations.len());
            }

            let export = config.export;
            let writer = SpreadsheetWriter::new(SpreadsheetConfig {
                highlight_violations: !args.no_highlight && export.highlight_violations.unwrap_or(true),
                logo: args.logo.or(export.logo),
                job: JobInfo {
                    job_number: args.job_number.or(export.job_number),
                    customer: args.customer.or(export.customer),
                    technician: args.technician.or(export.technician),
                },
                limits: config.limits,
                ..Default::default()
            });
            writer.write(&conversion.table, conversion.record_type, &decorations)?
        }
    };

    let target = args
        .output
        .unwrap_or_else(|| default_directory(&args.file));
    let path = save(&artifact, &target)?;

    info!("Exported {} step(s)", conversion.table.len());
    println!("{}", path.display());
    Ok(())
}

fn default_directory(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn save(artifact: &ExportArtifact, target: &Path) -> Result<PathBuf> {
    artifact
        .save(target)
        .with_context(|| format!("Failed to write {}", target.display()))
}
