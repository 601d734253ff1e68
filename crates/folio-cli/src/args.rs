//! Command-line argument definitions for the Folio CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`].

use clap::Parser;

/// Command-line arguments for the Folio documentation compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the reflected project (JSON)
    #[arg(help = "Path to the reflected project JSON file")]
    pub input: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
