use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::path::{Path, PathBuf};

use seqbridge::convert::{load_for_editing, Conversion};
use seqbridge::reader::{ReadOutcome, TableReader};
use seqbridge::schema::RecordType;

mod config;
mod export;
mod info;
mod template;
mod validate;
mod view;

pub use config::Config;

/// seqbridge - Test sequence converter and safety checker
#[derive(Parser)]
#[command(name = "seqbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Export target.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Styled workbook for technicians
    Xlsx,
    /// Controller input file
    Csv,
}

/// Starter sequence flavour.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum TemplateKind {
    /// Six-step main seal sequence with realistic values
    #[default]
    Example,
    /// One row of placeholders
    Placeholder,
}

/// Record type selector.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum RecordTypeArg {
    /// Main seal test bed
    #[default]
    MainSeal,
    /// Separation seal test bed
    SeparationSeal,
}

impl From<RecordTypeArg> for RecordType {
    fn from(arg: RecordTypeArg) -> Self {
        match arg {
            RecordTypeArg::MainSeal => RecordType::MainSeal,
            RecordTypeArg::SeparationSeal => RecordType::SeparationSeal,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display encoding, record type and columns of a sequence file
    Info {
        /// Input sequence file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print a sequence in technician form with unsafe cells highlighted
    View {
        /// Input sequence file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Check a sequence against the test bed safety limits
    Validate {
        /// Input sequence file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Export a sequence as a workbook or a controller file
    Export {
        /// Input sequence file (machine or technician form)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// Output file or directory (defaults to the input's directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Fail on out-of-vocabulary labels instead of writing defaults
        #[arg(long)]
        strict: bool,

        /// Do not highlight unsafe cells in the workbook
        #[arg(long)]
        no_highlight: bool,

        /// PNG logo for the instructions sheet
        #[arg(long, value_name = "PNG")]
        logo: Option<PathBuf>,

        /// Job number for the instructions sheet
        #[arg(long)]
        job_number: Option<String>,

        /// Technician for the instructions sheet
        #[arg(long)]
        technician: Option<String>,

        /// Customer for the instructions sheet
        #[arg(long)]
        customer: Option<String>,
    },

    /// Write a starter sequence in the controller format
    Template {
        /// Output CSV path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Template flavour
        #[arg(short, long, default_value = "example", value_enum)]
        kind: TemplateKind,

        /// Record type for placeholder templates
        #[arg(short, long, default_value = "main-seal", value_enum)]
        record_type: RecordTypeArg,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, config } => info::run(file, config),
        Commands::View { file, config } => view::run(file, config),
        Commands::Validate { file, config } => validate::run(file, config),
        Commands::Export {
            file,
            format,
            output,
            config,
            strict,
            no_highlight,
            logo,
            job_number,
            technician,
            customer,
        } => export::run(export::ExportArgs {
            file,
            format,
            output,
            config,
            strict,
            no_highlight,
            logo,
            job_number,
            technician,
            customer,
        }),
        Commands::Template {
            output,
            kind,
            record_type,
        } => template::run(output, kind, RecordType::from(record_type)),
    }
}

/// Read a sequence file strictly, reporting the encoding that decoded it.
fn read_sequence(file: &Path, config: &Config) -> Result<ReadOutcome> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = TableReader::new(config.reader_config()?);
    let outcome = reader
        .try_read_path(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    info!(
        "Read {} step(s) from {} as {}",
        outcome.table.len(),
        file.display(),
        outcome.encoding.name()
    );
    Ok(outcome)
}

/// Read a sequence file and bring it into the technician form.
fn open_for_editing(file: &Path, config: &Config) -> Result<Conversion> {
    let outcome = read_sequence(file, config)?;
    let conversion = load_for_editing(&outcome.table)
        .with_context(|| format!("Cannot load {}", file.display()))?;

    if !conversion.coding.is_clean() {
        warn!(
            "{} coded value(s) in {} were replaced by defaults",
            conversion.coding.fallbacks().len(),
            file.display()
        );
    }
    Ok(conversion)
}
