//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments accepted by the game binary.
///
/// This structure is parsed once at startup; everything else the game needs lives in files or
/// is discovered at runtime.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path of the score ledger file.
    #[arg(long, value_name = "FILE", default_value = "flowlink.scores")]
    pub scores: PathBuf,
}
