//! Codes for validation diagnostics.
//!
//! - `W1xx` - Docblock completeness warnings
//! - `E1xx` - Docblock errors

use std::fmt;

/// Error codes for categorizing validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing summary.
    ///
    /// A structural element (class, interface, trait, enum, function,
    /// method) has no summary in its docblock.
    W100,

    /// Unknown `@param`.
    ///
    /// A `@param` tag names a variable that is not an argument of the
    /// function or method.
    W101,

    /// Duplicate `@return`.
    ///
    /// More than one `@return` tag was found on the same element.
    W102,

    /// Malformed tag.
    ///
    /// A tag body could not be interpreted, e.g. `@param` without a
    /// variable name.
    E100,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "W100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W100 => "W100",
            ErrorCode::W101 => "W101",
            ErrorCode::W102 => "W102",
            ErrorCode::E100 => "E100",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::W100 => "missing summary",
            ErrorCode::W101 => "unknown @param",
            ErrorCode::W102 => "duplicate @return",
            ErrorCode::E100 => "malformed tag",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
