//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] marks documentation that cannot be rendered as written
/// - [`Severity::Warning`] marks documentation that is incomplete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The element's documentation is broken.
    Error,

    /// The element's documentation is incomplete or suspicious.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
