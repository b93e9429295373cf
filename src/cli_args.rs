use clap::Parser;
use std::path::PathBuf;

use bz_core::configuration::DEFAULT_OUTPUT_FILE;

/// Generates the bazaar conversion table (product id -> display name)
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// where to write the conversion table
    #[arg(default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}
