//! Command-line argument definitions for the algviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input snapshot and the object to draw,
//! the output path, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the algviz tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON snapshot
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Draw the object bound to this program variable
    #[arg(long, conflicts_with = "uid")]
    pub var: Option<String>,

    /// Draw the object with this uid
    #[arg(long)]
    pub uid: Option<String>,

    /// Index of the snapshot to draw when the input holds a history
    #[arg(long, default_value_t = 0)]
    pub snapshot: usize,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
