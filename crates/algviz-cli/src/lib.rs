//! CLI logic for the algviz tool.
//!
//! Reads a JSON snapshot (or a history of snapshots), draws one object of it
//! and writes the picture as an SVG file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use algviz::{AlgvizError, Visualizer};

/// Run the algviz CLI application
///
/// # Errors
///
/// Returns `AlgvizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Decoding errors
/// - A missing snapshot or root object
/// - Layout and rendering errors
pub fn run(args: &Args) -> Result<(), AlgvizError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing snapshot"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let visualizer = Visualizer::new(app_config);
    let history = visualizer.parse_history(&source)?;
    let snapshot = history.get(args.snapshot).ok_or_else(|| {
        AlgvizError::MissingRoot(format!(
            "snapshot {} requested, the input holds {}",
            args.snapshot,
            history.len()
        ))
    })?;
    debug!(snapshot = args.snapshot, snapshots = history.len(); "Selected snapshot");

    let root = visualizer.select_root(snapshot, args.var.as_deref(), args.uid.as_deref())?;
    let svg = visualizer.render_svg(snapshot, root)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
