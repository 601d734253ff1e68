//! Shared handling of docblocks and element bases.

use folio_core::{
    descriptor::{DescriptorBase, TagDescriptor},
    fqsen::Fqsen,
    reference::Reference,
};

use crate::{
    ProjectDescriptorBuilder,
    assembler::Reflected,
    error::Result,
    reflection::{DocBlock, Tag},
};

/// Copies summary, description and tags of `docblock` into `base`.
///
/// Every tag is built through `builder` so a custom tag assembler applies.
///
/// # Errors
///
/// Returns [`BuildError`](crate::BuildError) when a tag cannot be built.
pub fn assemble_docblock(
    base: &mut DescriptorBase,
    docblock: Option<&DocBlock>,
    builder: &ProjectDescriptorBuilder,
) -> Result<()> {
    let Some(docblock) = docblock else {
        return Ok(());
    };

    base.set_summary(docblock.summary.trim());
    base.set_description(docblock.description.trim());
    for tag in &docblock.tags {
        if let Some(tag) = builder.build::<TagDescriptor>(Reflected::Tag(tag))? {
            base.tags_mut().add(tag);
        }
    }

    Ok(())
}

/// Creates the base of a structural element declared at `line`.
///
/// The namespace starts out unresolved; the namespace tree builder links it.
pub(super) fn element_base(
    fqsen: Fqsen,
    line: usize,
    docblock: Option<&DocBlock>,
    builder: &ProjectDescriptorBuilder,
) -> Result<DescriptorBase> {
    let mut base = DescriptorBase::new(fqsen.name(), Some(fqsen));
    base.set_line(line);
    base.set_namespace(Reference::from(fqsen.namespace()));
    assemble_docblock(&mut base, docblock, builder)?;
    Ok(base)
}

/// Finds the tag named `name` in an optional docblock.
pub(super) fn find_tag<'a>(docblock: Option<&'a DocBlock>, name: &str) -> Option<&'a Tag> {
    docblock?.tags.iter().find(|tag| tag.name == name)
}
