//! Validation diagnostics attached to descriptors.
//!
//! While assembling descriptors the builder checks the documentation of each
//! element (a missing summary, a `@param` for an argument that does not
//! exist, ...). Findings never abort a run; they are stored on the
//! descriptor as [`Diagnostic`]s so renderers can report them.
//!
//! # Example
//!
//! ```
//! # use folio_core::validation::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("no summary for class \\App\\User")
//!     .with_code(ErrorCode::W100)
//!     .with_line(12)
//!     .with_help("add a one-line summary to the docblock");
//!
//! assert_eq!(diag.line(), 12);
//! ```

mod diagnostic;
mod error_code;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
