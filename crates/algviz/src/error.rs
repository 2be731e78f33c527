//! Error types for algviz operations.
//!
//! This module provides the main error type [`AlgvizError`] which wraps
//! the error conditions of every stage: decoding, layout and painting.

use std::io;

use thiserror::Error;

use algviz_parser::ParseError;

use crate::{export, layout::LayoutError};

/// The main error type for algviz operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the decoded source next to the diagnostics, so
/// that spans can be rendered as source snippets.
#[derive(Debug, Error)]
pub enum AlgvizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested object is not in the snapshot.
    #[error("Nothing to draw: {0}")]
    MissingRoot(String),
}

impl AlgvizError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
