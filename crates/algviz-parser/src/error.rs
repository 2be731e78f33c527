//! Diagnostics reported while decoding snapshots.
//!
//! Every problem found in the input becomes a [`Diagnostic`] with an
//! [`ErrorCode`], an optional source [`Span`](crate::Span), the JSON path of the
//! offending value and optional help text. The decoder keeps going after most
//! problems, so a single [`ParseError`] may carry several diagnostics.
//!
//! # Example
//!
//! ```
//! # use algviz_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::error("unknown object type `tree`")
//!     .with_code(ErrorCode::E201)
//!     .with_path("$[0]")
//!     .with_help("did you mean `treenode`?");
//! assert_eq!(diag.to_string(), "error[E201]: unknown object type `tree`");
//! ```

mod diagnostic;
mod error_code;
mod parse_error;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
