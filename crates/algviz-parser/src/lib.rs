//! Decoder for algviz JSON object snapshots.
//!
//! A snapshot is a JSON list of objects describing the state of a program:
//!
//! ```json
//! [
//!   {"uid": "root", "T": "treenode", "data": "A", "children": [
//!     {"T": "treenode", "data": {"T": "string", "data": "B"}}
//!   ]},
//!   {"uid": "A", "T": "string", "data": "A", "var": "label"}
//! ]
//! ```
//!
//! Strings in reference positions are uids of other objects, numbers are
//! literals, nested objects and lists are inline objects. A document may also
//! hold a list of snapshots, in chronological order.
//!
//! # Example
//!
//! ```
//! let snapshot = algviz_parser::decode_snapshot(
//!     r#"[{"uid": "s", "type": "string", "data": "hello"}]"#,
//! ).unwrap();
//! assert_eq!(snapshot.roots().len(), 1);
//! ```

mod decoder;
pub mod error;
mod span;
pub mod tokens;

#[cfg(test)]
mod decoder_tests;

use algviz_core::structure::Snapshot;
use log::info;
use serde_json::Value;

pub use error::{Diagnostic, ErrorCode, ParseError};
pub use span::Span;

use decoder::SnapshotDecoder;

fn parse_json(source: &str) -> Result<Value, ParseError> {
    serde_json::from_str(source).map_err(|err| {
        let span = Span::at_line_column(source, err.line(), err.column());
        Diagnostic::error(format!("invalid JSON: {err}"))
            .with_code(ErrorCode::E100)
            .with_label(span, "here")
            .into()
    })
}

fn not_a_list(value: &Value) -> ParseError {
    let found = match value {
        Value::Object(_) => "an object",
        Value::String(_) => "a string",
        _ => "a scalar",
    };
    Diagnostic::error(format!("expected a list of objects, found {found}"))
        .with_code(ErrorCode::E101)
        .with_path("$")
        .into()
}

/// Decodes a document holding exactly one snapshot.
///
/// # Errors
///
/// Returns a [`ParseError`] with every problem found: malformed JSON, invalid
/// objects and references to unknown uids.
pub fn decode_snapshot(source: &str) -> Result<Snapshot, ParseError> {
    let document = parse_json(source)?;
    let Value::Array(entries) = &document else {
        return Err(not_a_list(&document));
    };
    let snapshot = SnapshotDecoder::new().decode(entries, "$")?;
    info!(roots = snapshot.roots().len(); "Decoded snapshot document");
    Ok(snapshot)
}

/// Decodes a document holding either one snapshot or a list of snapshots.
///
/// A non-empty list whose entries are all lists is read as several snapshots;
/// anything else is read as a single snapshot.
///
/// # Errors
///
/// Fails on the first snapshot that does not decode.
pub fn decode_snapshots(source: &str) -> Result<Vec<Snapshot>, ParseError> {
    let document = parse_json(source)?;
    let Value::Array(entries) = &document else {
        return Err(not_a_list(&document));
    };

    let is_history = !entries.is_empty() && entries.iter().all(Value::is_array);
    if !is_history {
        return Ok(vec![SnapshotDecoder::new().decode(entries, "$")?]);
    }

    let snapshots = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let objects = entry.as_array().map(Vec::as_slice).unwrap_or_default();
            SnapshotDecoder::new().decode(objects, &format!("$[{idx}]"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(snapshots = snapshots.len(); "Decoded snapshot history");
    Ok(snapshots)
}
