//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep site settings in a file:
//!
//! ```toml
//! # seqbridge.toml
//! [limits]
//! max_speed_rpm = 32000
//! max_cell_pressure_bar = 450
//!
//! [reader]
//! encodings = ["UTF-8", "windows-1252"]
//!
//! [export]
//! highlight_violations = true
//! logo = "logo.png"
//! customer = "ACME"
//! strict = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use seqbridge::reader::ReaderConfig;
use seqbridge::validator::SafetyLimits;

/// Root configuration structure for seqbridge.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Safety limit overrides.
    #[serde(default)]
    pub limits: SafetyLimits,

    /// Reader settings.
    #[serde(default)]
    pub reader: ReaderSection,

    /// Export settings.
    #[serde(default)]
    pub export: ExportSection,
}

/// Reader settings.
#[derive(Debug, Default, Deserialize)]
pub struct ReaderSection {
    /// Encodings to try, in order (WHATWG labels).
    pub encodings: Option<Vec<String>>,
}

/// Export settings.
#[derive(Debug, Default, Deserialize)]
pub struct ExportSection {
    /// Highlight cells that exceed a safety limit.
    pub highlight_violations: Option<bool>,

    /// Logo for the instructions sheet.
    pub logo: Option<PathBuf>,

    /// Job number for the instructions sheet.
    pub job_number: Option<String>,

    /// Customer for the instructions sheet.
    pub customer: Option<String>,

    /// Technician for the instructions sheet.
    pub technician: Option<String>,

    /// Refuse out-of-vocabulary labels when writing controller files.
    pub strict: Option<bool>,
}

impl Config {
    /// Load from a file when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Reader configuration, honouring the encoding list when present.
    pub fn reader_config(&self) -> Result<ReaderConfig> {
        match &self.reader.encodings {
            Some(labels) => ReaderConfig::from_labels(labels).context("Invalid [reader] encodings"),
            None => Ok(ReaderConfig::default()),
        }
    }
}
