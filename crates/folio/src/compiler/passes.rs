//! The compiler passes of the standard pipeline.
//!
//! Listed in pipeline order:
//!
//! - [`ElementsIndexBuilder`] - Rebuilds the global element indexes
//! - [`MarkerFromTagsExtractor`] - Turns `@todo` tags into file markers
//! - [`ExampleTagsEnricher`] - Inlines `{@example}` sources into descriptions
//! - [`Linker`] - Resolves `@uses`, `@see` and `@covers` targets
//! - [`ClassTreeBuilder`], [`InterfaceTreeBuilder`] - Link parents, interfaces and traits
//! - [`NamespaceTreeBuilder`], [`PackageTreeBuilder`] - Build the namespace and package trees
//! - [`ResolveInlineMarkers`] - Collects `TODO`-style comments from sources
//! - [`ResolveInlineLinkAndSeeTags`] - Renders inline `{@see}` and `{@link}` as links
//! - [`UsedByBuilder`] - Adds `@used-by` back references
//! - [`TableOfContentsBuilder`] - Builds the tables of contents
//! - [`RemoveSourcecode`] - Drops file sources that must not be published
//! - [`Debug`] - Logs an analysis of the compiled project

mod class_tree;
mod debug;
mod elements_index;
mod example_tags;
mod inline_links;
mod inline_markers;
mod linker;
mod markers;
mod namespace_tree;
mod package_tree;
mod remove_sourcecode;
mod table_of_contents;
mod used_by;

#[cfg(test)]
mod fixtures;

pub use class_tree::{ClassTreeBuilder, InterfaceTreeBuilder};
pub use debug::Debug;
pub use elements_index::ElementsIndexBuilder;
pub use example_tags::ExampleTagsEnricher;
pub use inline_links::ResolveInlineLinkAndSeeTags;
pub use inline_markers::ResolveInlineMarkers;
pub use linker::Linker;
pub use markers::MarkerFromTagsExtractor;
pub use namespace_tree::NamespaceTreeBuilder;
pub use package_tree::PackageTreeBuilder;
pub use remove_sourcecode::RemoveSourcecode;
pub use table_of_contents::TableOfContentsBuilder;
pub use used_by::UsedByBuilder;

use folio_core::descriptor::{Element, ProjectDescriptor};

/// Every indexed element followed by every file.
///
/// Returned as owned handles so callers may mutate descriptors while walking
/// the list.
fn elements_and_files(project: &ProjectDescriptor) -> Vec<Element> {
    project
        .indexes()
        .elements
        .values()
        .cloned()
        .chain(project.files().values().cloned().map(Element::from))
        .collect()
}
