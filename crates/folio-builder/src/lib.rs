//! Folio Builder
//!
//! Turns a reflected PHP project into a [`ProjectDescriptor`] whose elements
//! are owned by their files but not yet cross-referenced.
//!
//! - [`reflection`] - The input model, deserializable from JSON
//! - [`assembler`] - One assembler per reflected node kind, looked up in an [`AssemblerFactory`]
//! - [`filter`] - `@ignore`, `@internal` and visibility filters
//! - [`validator`] - Docblock diagnostics stored on the descriptors
//!
//! [`ProjectDescriptor`]: folio_core::descriptor::ProjectDescriptor
//! [`AssemblerFactory`]: assembler::AssemblerFactory

pub mod assembler;
pub mod filter;
pub mod reflection;
pub mod validator;

mod builder;
mod error;

pub use builder::{DEFAULT_API_SET, DEFAULT_VERSION, ProjectDescriptorBuilder};
pub use error::{BuildError, Result};
