//! Errors raised while assembling descriptors.

use thiserror::Error;

use folio_core::{collection::InvalidKeyError, descriptor::DescriptorKind, fqsen::FqsenError};

use crate::assembler::ReflectionKind;

/// A type alias for `Result<T, BuildError>`.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Fatal errors of the build phase.
///
/// Problems with the documentation itself are not errors; they are recorded
/// as diagnostics on the affected descriptor.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No assembler found to turn a reflected {input} into a {output} descriptor")]
    NoAssemblerFound {
        input: ReflectionKind,
        output: DescriptorKind,
    },

    #[error("Assembler for reflected {expected} nodes received a reflected {actual}")]
    UnexpectedInput {
        expected: ReflectionKind,
        actual: ReflectionKind,
    },

    #[error("Assembler for {expected} descriptors produced a {actual} descriptor")]
    UnexpectedDescriptor {
        expected: DescriptorKind,
        actual: DescriptorKind,
    },

    #[error(transparent)]
    InvalidFqsen(#[from] FqsenError),

    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),
}
