//! # seqbridge
//!
//! Command-line front end for preparing test-bed sequence files.
//!
//! ## Usage
//!
//! ```bash
//! # Show a controller file in technician form, unsafe cells highlighted
//! seqbridge view MainSealSet2.csv
//!
//! # Check safety limits (exit code 1 when a limit is exceeded)
//! seqbridge validate MainSealSet2.csv
//!
//! # Export as a workbook or as a controller file
//! seqbridge export MainSealSet2.csv --format xlsx
//! seqbridge export edited.csv --format csv --strict
//!
//! # Start from an example
//! seqbridge template new_sequence.csv --kind example
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
