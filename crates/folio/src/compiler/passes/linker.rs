use log::{debug, info};

use folio_core::descriptor::{ProjectDescriptor, TagKind, TagTarget};

use crate::{
    compiler::{CompilerPass, passes::elements_and_files},
    error::CompileError,
    resolver::{Context, Lookup, lookup},
};

/// Tags whose targets are linked to elements.
const LINKED_TAGS: [&str; 3] = ["uses", "see", "covers"];

/// Resolves the targets of `@uses`, `@see` and `@covers` tags to the
/// elements they name. Targets that cannot be found stay textual.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linker;

impl CompilerPass for Linker {
    fn description(&self) -> &'static str {
        "Resolve tag references"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let elements = &project.indexes().elements;
        let mut linked = 0;
        let mut unresolved = 0;

        for element in elements_and_files(project) {
            let context = Context::of(&element);
            element.with_base_mut(|base| {
                for name in LINKED_TAGS {
                    let Some(tags) = base.tags_mut().get_mut(name) else {
                        continue;
                    };
                    for tag in tags.iter_mut() {
                        let TagKind::Reference { target } = tag.kind_mut() else {
                            continue;
                        };
                        let TagTarget::Unresolved(reference) = target else {
                            continue;
                        };
                        match lookup(elements, reference, &context) {
                            Lookup::Found(found) => {
                                *target = TagTarget::Resolved(found.downgrade());
                                linked += 1;
                            }
                            Lookup::Missing(resolved) => {
                                debug!(tag = name, reference:% = resolved; "Tag target not found");
                                unresolved += 1;
                            }
                        }
                    }
                }
            });
        }

        info!(linked = linked, unresolved = unresolved; "Linked tag references");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::{Descriptor, Element, FileDescriptor};

    use super::*;
    use crate::compiler::passes::fixtures::{self, class, fqsen, method, tag};

    fn target(element: &Element, name: &str) -> TagTarget {
        element.with_base(|base| base.tags().first(name).unwrap().target().unwrap().clone())
    }

    #[test]
    fn test_links_relative_self_and_alias_targets() {
        let user = class("\\App\\User");
        let save = method("\\App\\User::save()");
        let validate = method("\\App\\User::validate()");
        let formatter = class("\\Util\\Formatter");
        tag(save.borrow_mut().base_mut(), "uses", "self::validate()");
        tag(save.borrow_mut().base_mut(), "see", "Fmt");
        tag(save.borrow_mut().base_mut(), "covers", "Missing");
        user.borrow_mut().methods_mut().push(save.clone());
        user.borrow_mut().methods_mut().push(validate.clone());

        let mut file = FileDescriptor::new("User.php", "");
        file.add_namespace_alias("Fmt", fqsen("\\Util\\Formatter"));
        file.classes_mut().push(user);
        file.classes_mut().push(formatter.clone());
        let mut project = fixtures::indexed_project(vec![file]);

        Linker.execute(&mut project).unwrap();

        let save = Element::from(save);
        let uses = target(&save, "uses").element().unwrap();
        assert!(uses.ptr_eq(&Element::from(validate)));
        let see = target(&save, "see").element().unwrap();
        assert!(see.ptr_eq(&Element::from(formatter)));
        assert!(!target(&save, "covers").is_resolved());
    }

    #[test]
    fn test_links_namespace_relative_target() {
        let user = class("\\App\\User");
        let repository = class("\\App\\Repository");
        tag(user.borrow_mut().base_mut(), "uses", "Repository");

        let mut file = FileDescriptor::new("User.php", "");
        file.classes_mut().push(user.clone());
        file.classes_mut().push(repository.clone());
        let mut project = fixtures::indexed_project(vec![file]);

        Linker.execute(&mut project).unwrap();

        let found = target(&Element::from(user), "uses").element().unwrap();
        assert!(found.ptr_eq(&Element::from(repository)));
    }
}
