use std::rc::Rc;

use log::{debug, info};

use folio_core::{
    collection::Index,
    descriptor::{Descriptor, DescriptorKind, Element, NamespaceDescriptor, ProjectDescriptor},
    fqsen::Fqsen,
    reference::{Reference, Shared, shared},
};

use crate::{compiler::CompilerPass, error::CompileError};

/// Key of the root namespace in the `namespaces` index.
const ROOT: &str = "\\";

/// Builds the namespace tree.
///
/// Every indexed element is listed under its namespace and its namespace
/// reference is resolved to the node. Nodes are linked to their parents;
/// missing ancestors are created on the way. Undocumented nodes left without
/// elements or children are removed. All nodes are registered in `elements`
/// under `~` followed by their FQSEN.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceTreeBuilder;

impl CompilerPass for NamespaceTreeBuilder {
    fn description(&self) -> &'static str {
        "Build namespace tree"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let root = project.namespace();
        let elements: Vec<Element> = project
            .indexes()
            .elements
            .values()
            .filter(|element| {
                !matches!(element.kind(), DescriptorKind::Namespace | DescriptorKind::Package)
            })
            .cloned()
            .collect();

        let indexes = project.indexes_mut();
        let namespaces = &mut indexes.namespaces;
        adopt_root(namespaces, &root)?;
        for namespace in namespaces.values() {
            namespace.borrow_mut().reset();
        }

        for element in &elements {
            let Some(fqsen) = namespace_of(element) else {
                continue;
            };
            let node = Rc::clone(namespaces.get_or_insert_with(fqsen.as_string(), || {
                shared(NamespaceDescriptor::new(fqsen))
            })?);
            element.with_base_mut(|base| base.set_namespace(Reference::resolved(&node)));
            node.borrow_mut().elements_mut().add(element);
        }

        link_ancestors(namespaces)?;
        for key in prune_empty(namespaces) {
            indexes.elements.remove(&format!("~{key}"));
        }

        for (key, namespace) in indexes.namespaces.iter() {
            indexes
                .elements
                .set(format!("~{key}"), Element::from(Rc::clone(namespace)))?;
        }

        info!(namespaces = indexes.namespaces.len(); "Built namespace tree");
        Ok(())
    }
}

/// Makes `root` the `\` node, keeping the documentation of a reflected
/// global namespace.
fn adopt_root(
    namespaces: &mut Index<String, Shared<NamespaceDescriptor>>,
    root: &Shared<NamespaceDescriptor>,
) -> Result<(), CompileError> {
    let key = ROOT.to_string();
    if let Some(reflected) = namespaces.get(&key) {
        if !Rc::ptr_eq(reflected, root) {
            let reflected = reflected.borrow();
            let mut root = root.borrow_mut();
            root.base_mut().set_summary(reflected.base().summary());
            root.base_mut().set_description(reflected.base().description());
        }
    }
    namespaces.set(key, Rc::clone(root))?;
    Ok(())
}

/// The namespace `element` belongs to, with an empty name meaning the
/// global namespace.
fn namespace_of(element: &Element) -> Option<Fqsen> {
    element.with_base(|base| {
        let name = match base.namespace() {
            Some(Reference::Unresolved(fqsen)) => fqsen.as_string(),
            Some(resolved) => match resolved.target() {
                Some(node) => node.borrow().base().fqsen()?.as_string(),
                None => base.fqsen()?.namespace().as_string(),
            },
            None => return None,
        };
        let name = if name.is_empty() { ROOT.to_string() } else { name };
        match Fqsen::new(&name) {
            Ok(fqsen) => Some(fqsen),
            Err(err) => {
                debug!(err:% = err; "Skipping element with invalid namespace");
                None
            }
        }
    })
}

/// Links every node to its parent, creating missing ancestors.
fn link_ancestors(
    namespaces: &mut Index<String, Shared<NamespaceDescriptor>>,
) -> Result<(), CompileError> {
    let mut pending: Vec<Shared<NamespaceDescriptor>> = namespaces.values().cloned().collect();
    pending.reverse();
    while let Some(node) = pending.pop() {
        let Some(fqsen) = node.borrow().base().fqsen() else {
            continue;
        };
        if fqsen.is_root() {
            continue;
        }

        let parent_fqsen = fqsen.namespace();
        let key = parent_fqsen.as_string();
        let created = !namespaces.contains_key(&key);
        let parent = Rc::clone(namespaces.get_or_insert_with(key, || {
            shared(NamespaceDescriptor::new(parent_fqsen))
        })?);
        if created {
            debug!(namespace:% = parent_fqsen; "Created missing parent namespace");
            pending.push(Rc::clone(&parent));
        }

        node.borrow_mut().set_parent(&parent);
        parent
            .borrow_mut()
            .children_mut()
            .set(fqsen.name(), Rc::clone(&node))?;
    }
    Ok(())
}

/// Removes nodes that ended up without elements, children or
/// documentation, leaves first. Returns the removed keys.
fn prune_empty(namespaces: &mut Index<String, Shared<NamespaceDescriptor>>) -> Vec<String> {
    let mut removed = Vec::new();
    loop {
        let empty: Vec<String> = namespaces
            .iter()
            .filter(|(key, node)| key.as_str() != ROOT && is_empty(node))
            .map(|(key, _)| key.clone())
            .collect();
        if empty.is_empty() {
            return removed;
        }

        for key in empty {
            let Some(node) = namespaces.remove(&key) else {
                continue;
            };
            let node = node.borrow();
            if let (Some(parent), Some(fqsen)) = (node.parent(), node.base().fqsen()) {
                parent.borrow_mut().children_mut().remove(&fqsen.name());
            }
            debug!(namespace = key.as_str(); "Removed empty namespace");
            removed.push(key);
        }
    }
}

fn is_empty(node: &Shared<NamespaceDescriptor>) -> bool {
    let node = node.borrow();
    node.elements().is_empty()
        && node.children().is_empty()
        && node.base().summary().is_empty()
        && node.base().description().is_empty()
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::FileDescriptor;

    use super::*;
    use crate::compiler::passes::{
        ElementsIndexBuilder,
        fixtures::{self, class, fqsen, function},
    };

    fn node(project: &ProjectDescriptor, key: &str) -> Shared<NamespaceDescriptor> {
        Rc::clone(project.indexes().namespaces.get(&key.to_string()).unwrap())
    }

    fn children(node: &Shared<NamespaceDescriptor>) -> Vec<String> {
        node.borrow().children().keys().cloned().collect()
    }

    #[test]
    fn test_elements_are_listed_under_their_namespace() {
        let mut first = FileDescriptor::new("Foo.php", "");
        first.classes_mut().push(class("\\NS\\Foo"));
        let mut second = FileDescriptor::new("Bar.php", "");
        second.classes_mut().push(class("\\NS\\Bar"));
        second.functions_mut().push(function("\\helper()"));
        let mut project = fixtures::indexed_project(vec![first, second]);

        NamespaceTreeBuilder.execute(&mut project).unwrap();

        let ns = node(&project, "\\NS");
        assert_eq!(ns.borrow().elements().classes.len(), 2);
        assert_eq!(children(&project.namespace()), vec!["NS"]);
        assert!(Rc::ptr_eq(&ns.borrow().parent().unwrap(), &project.namespace()));
        assert_eq!(project.namespace().borrow().elements().functions.len(), 1);

        let elements = &project.indexes().elements;
        assert!(elements.contains_key(&"~\\".to_string()));
        assert!(elements.contains_key(&"~\\NS".to_string()));
    }

    #[test]
    fn test_missing_ancestors_are_created() {
        let mut file = FileDescriptor::new("C.php", "");
        file.classes_mut().push(class("\\A\\B\\C\\Thing"));
        let mut project = fixtures::indexed_project(vec![file]);

        NamespaceTreeBuilder.execute(&mut project).unwrap();

        let keys: Vec<&str> = project
            .indexes()
            .namespaces
            .keys()
            .map(String::as_str)
            .collect();
        assert!(keys.contains(&"\\A"));
        assert!(keys.contains(&"\\A\\B"));
        assert_eq!(children(&node(&project, "\\A")), vec!["B"]);
        assert_eq!(children(&node(&project, "\\A\\B")), vec!["C"]);
        assert_eq!(children(&project.namespace()), vec!["A"]);
    }

    #[test]
    fn test_element_namespace_is_resolved_to_node() {
        let thing = class("\\App\\Thing");
        let mut file = FileDescriptor::new("Thing.php", "");
        file.classes_mut().push(thing.clone());
        let mut project = fixtures::indexed_project(vec![file]);

        NamespaceTreeBuilder.execute(&mut project).unwrap();

        let app = node(&project, "\\App");
        assert!(thing.borrow().base().namespace().unwrap().points_to(&app));
    }

    #[test]
    fn test_rerun_does_not_duplicate_views() {
        let mut file = FileDescriptor::new("Thing.php", "");
        file.classes_mut().push(class("\\App\\Thing"));
        let mut project = fixtures::indexed_project(vec![file]);

        NamespaceTreeBuilder.execute(&mut project).unwrap();
        NamespaceTreeBuilder.execute(&mut project).unwrap();

        let app = node(&project, "\\App");
        assert_eq!(app.borrow().elements().classes.len(), 1);
        assert_eq!(children(&project.namespace()), vec!["App"]);
    }

    #[test]
    fn test_reflected_namespaces_are_reused() {
        let reflected = shared(NamespaceDescriptor::new(fqsen("\\App")));
        reflected.borrow_mut().base_mut().set_summary("The application.");
        let mut file = FileDescriptor::new("Thing.php", "");
        file.classes_mut().push(class("\\App\\Thing"));
        let mut project = fixtures::indexed_project(vec![file]);
        project
            .indexes_mut()
            .namespaces
            .set("\\App".to_string(), Rc::clone(&reflected))
            .unwrap();

        NamespaceTreeBuilder.execute(&mut project).unwrap();

        let app = node(&project, "\\App");
        assert!(Rc::ptr_eq(&app, &reflected));
        assert_eq!(app.borrow().elements().classes.len(), 1);
    }

    #[test]
    fn test_rerun_removes_namespaces_left_empty() {
        let mut file = FileDescriptor::new("Thing.php", "");
        file.classes_mut().push(class("\\App\\Model\\Thing"));
        file.functions_mut().push(function("\\helper()"));
        let mut project = fixtures::indexed_project(vec![file]);
        NamespaceTreeBuilder.execute(&mut project).unwrap();

        project
            .files()
            .get(&"Thing.php".to_string())
            .unwrap()
            .borrow_mut()
            .classes_mut()
            .clear();
        ElementsIndexBuilder.execute(&mut project).unwrap();
        NamespaceTreeBuilder.execute(&mut project).unwrap();

        let namespaces = &project.indexes().namespaces;
        assert!(!namespaces.contains_key(&"\\App".to_string()));
        assert!(!namespaces.contains_key(&"\\App\\Model".to_string()));
        assert!(children(&project.namespace()).is_empty());
        assert!(!project.indexes().elements.contains_key(&"~\\App".to_string()));
        assert!(project.indexes().elements.contains_key(&"~\\".to_string()));
    }

    #[test]
    fn test_documented_empty_namespace_is_kept() {
        let reflected = shared(NamespaceDescriptor::new(fqsen("\\Docs")));
        reflected.borrow_mut().base_mut().set_summary("Reserved.");
        let mut project = fixtures::indexed_project(Vec::new());
        project
            .indexes_mut()
            .namespaces
            .set("\\Docs".to_string(), Rc::clone(&reflected))
            .unwrap();

        NamespaceTreeBuilder.execute(&mut project).unwrap();

        assert_eq!(children(&project.namespace()), vec!["Docs"]);
    }
}
