//! Error adapter for converting AlgvizError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`algviz_parser::ParseError`] contains multiple diagnostics, each
//! diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use algviz::AlgvizError;
use algviz_parser::Diagnostic;

/// Adapter for a single decoder diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(format!("algviz::parse::{c}")) as Box<dyn fmt::Display + 'a>)
    }

    /// The decoder's help text, or else where in the document the problem is.
    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match (self.diag.help(), self.diag.path()) {
            (Some(help), _) => Some(Box::new(help) as Box<dyn fmt::Display + 'a>),
            (None, Some(path)) => Some(Box::new(format!("at {path}")) as Box<dyn fmt::Display + 'a>),
            (None, None) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.diag.span()?;
        let label = LabeledSpan::new_primary_with_span(
            self.diag.label().map(str::to_string),
            span_to_miette(span),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-diagnostic [`AlgvizError`] variants.
pub struct ErrorAdapter<'a>(pub &'a AlgvizError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AlgvizError::Io(_) => "algviz::io",
            AlgvizError::Parse { .. } => return None,
            AlgvizError::Layout(_) => "algviz::layout",
            AlgvizError::Export(_) => "algviz::export",
            AlgvizError::Config(_) => "algviz::config",
            AlgvizError::MissingRoot(_) => "algviz::root",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            AlgvizError::MissingRoot(_) => {
                Some(Box::new("select an object with --var or --uid") as Box<dyn fmt::Display + 'a>)
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: algviz_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`AlgvizError`] into a list of reportable errors.
///
/// For [`AlgvizError::Parse`], this returns one [`Reportable`] for each
/// diagnostic in the error. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &AlgvizError) -> Vec<Reportable<'_>> {
    match err {
        AlgvizError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use algviz_parser::{ErrorCode, ParseError, Span};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("invalid JSON")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..5), "here")
            .with_help("check the brackets");
        let err = AlgvizError::new_parse_error(ParseError::from(diag), "[{]  ");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let Reportable::Diagnostic(d) = &reportables[0] else {
            panic!("Expected Diagnostic");
        };
        assert_eq!(d.to_string(), "invalid JSON");
        assert_eq!(d.code().unwrap().to_string(), "algviz::parse::E100");
        assert_eq!(d.help().unwrap().to_string(), "check the brackets");

        let labels: Vec<_> = d.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("here"));
        assert!(labels[0].primary());
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error").with_code(ErrorCode::E200),
            Diagnostic::error("second error").with_path("$[1]"),
        ];
        let err = AlgvizError::new_parse_error(ParseError::new(diags), "[]");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
        assert_eq!(reportables[1].help().unwrap().to_string(), "at $[1]");
        assert!(reportables[1].labels().is_none());
    }

    #[test]
    fn test_non_parse_error() {
        let err = AlgvizError::Config("bad margin".to_string());

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        let Reportable::Error(e) = &reportables[0] else {
            panic!("Expected Error");
        };
        assert_eq!(e.to_string(), "Configuration error: bad margin");
        assert_eq!(e.code().unwrap().to_string(), "algviz::config");
    }
}
