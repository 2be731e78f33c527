//! Error codes for decoder diagnostics.
//!
//! Codes are grouped by phase:
//! - `E1xx` - JSON syntax and document shape
//! - `E2xx` - Object validation
//! - `E3xx` - Reference resolution

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Malformed JSON.
    E100,

    /// The document is not a list of objects (or a list of such lists).
    E101,

    // =========================================================================
    // Object Errors (E2xx)
    // =========================================================================
    /// The object has no `type` (or `T`) field.
    E200,

    /// The `type` names no known object kind.
    E201,

    /// Both `T` and `type` are present.
    E202,

    /// A required field is missing.
    E203,

    /// A field holds the wrong kind of JSON value.
    E204,

    /// A `null` object carries a uid.
    E205,

    /// Invalid `metadata` block.
    E206,

    // =========================================================================
    // Resolution Errors (E3xx)
    // =========================================================================
    /// Two objects share a uid.
    E300,

    /// A reference names a uid no object has.
    E301,

    /// A user-supplied uid contains the reserved `#` character.
    E302,

    /// Two objects are bound to the same `var` name.
    E303,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed JSON",
            ErrorCode::E101 => "unexpected document shape",
            ErrorCode::E200 => "missing object type",
            ErrorCode::E201 => "unknown object type",
            ErrorCode::E202 => "conflicting type aliases",
            ErrorCode::E203 => "missing field",
            ErrorCode::E204 => "invalid field value",
            ErrorCode::E205 => "null object with uid",
            ErrorCode::E206 => "invalid metadata",
            ErrorCode::E300 => "duplicate uid",
            ErrorCode::E301 => "unresolved uid",
            ErrorCode::E302 => "reserved character in uid",
            ErrorCode::E303 => "duplicate variable name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E303.as_str(), "E303");
        assert_eq!(ErrorCode::E301.description(), "unresolved uid");
    }
}
