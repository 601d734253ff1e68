//! Folio Core Types and Definitions
//!
//! This crate provides the foundational types of the Folio documentation
//! compiler. It includes:
//!
//! - **FQSEN**: Interned, validated structural element names ([`fqsen::Fqsen`])
//! - **Collections**: Owned lists and keyed indexes ([`collection`] module)
//! - **References**: Unresolved or resolved links between descriptors ([`reference`] module)
//! - **Descriptors**: The documentation model of a project ([`descriptor`] module)
//! - **Validation**: Diagnostics attached to descriptors ([`validation`] module)

pub mod collection;
pub mod descriptor;
pub mod fqsen;
pub mod reference;
pub mod validation;
