use log::info;

use folio_core::descriptor::{Element, ProjectDescriptor, TagDescriptor, TagKind, TagTarget};

use crate::{
    compiler::{CompilerPass, passes::elements_and_files},
    error::CompileError,
};

/// Adds a `@used-by` tag to the target of every resolved `@uses` tag,
/// pointing back at the element carrying the `@uses`.
///
/// A target never receives two `@used-by` tags for the same element, so
/// compiling twice leaves the tags as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsedByBuilder;

impl CompilerPass for UsedByBuilder {
    fn description(&self) -> &'static str {
        "Build used-by tags"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let mut usages: Vec<(Element, Element)> = Vec::new();
        for source in elements_and_files(project) {
            let targets: Vec<Element> = source.with_base(|base| {
                base.tags()
                    .get("uses")
                    .iter()
                    .filter_map(|tag| tag.target()?.element())
                    .collect()
            });
            usages.extend(targets.into_iter().map(|target| (target, source.clone())));
        }

        let mut added = 0;
        for (target, source) in usages {
            let known = target.with_base(|base| {
                base.tags()
                    .get("used-by")
                    .iter()
                    .filter_map(|tag| tag.target()?.element())
                    .any(|existing| existing.ptr_eq(&source))
            });
            if known {
                continue;
            }

            let tag = TagDescriptor::new(
                "used-by",
                "",
                TagKind::Reference {
                    target: TagTarget::Resolved(source.downgrade()),
                },
            );
            target.with_base_mut(|base| base.tags_mut().add(tag));
            added += 1;
        }

        info!(tags = added; "Added used-by tags");
        Ok(())
    }
}
