pub mod svg;

use std::fmt;

use crate::layout::LayoutError;

/// Failures while painting a layout.
#[derive(Debug)]
pub enum Error {
    /// Flattening the layout failed.
    Layout(LayoutError),
    /// Arrows whose endpoints were never both drawn.
    IncompleteLayout(Vec<String>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "Layout error: {err}"),
            Self::IncompleteLayout(arrows) => {
                write!(f, "Incomplete layout, endpoints never drawn for: {}", arrows.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IncompleteLayout(_) => None,
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}
