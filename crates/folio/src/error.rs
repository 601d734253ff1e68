//! Error types for Folio operations.
//!
//! [`FolioError`] is the error of the [`DocumentationBuilder`] façade. The
//! compiler passes report [`CompileError`]s, which the compiler wraps with
//! the name of the failing pass.
//!
//! [`DocumentationBuilder`]: crate::DocumentationBuilder

use std::io;

use thiserror::Error;

use folio_builder::BuildError;
use folio_core::{collection::InvalidKeyError, fqsen::FqsenError};

use crate::config::ConfigError;

/// The main error type for Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid reflection input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Compiler pass \"{pass}\" failed: {source}")]
    Compile {
        pass: &'static str,
        #[source]
        source: CompileError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by compiler passes.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{element} has @todo tags but is not owned by a file")]
    OrphanMarker { element: String },

    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    #[error(transparent)]
    InvalidFqsen(#[from] FqsenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_names_pass() {
        let err = FolioError::Compile {
            pass: "Collect markers",
            source: CompileError::OrphanMarker {
                element: "\\App\\helper()".to_string(),
            },
        };

        assert_eq!(
            err.to_string(),
            "Compiler pass \"Collect markers\" failed: \\App\\helper() has @todo tags but is not owned by a file"
        );
    }
}
