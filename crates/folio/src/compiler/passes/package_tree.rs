use std::rc::Rc;

use log::{debug, info};

use folio_core::{
    collection::Index,
    descriptor::{DescriptorBase, Element, PackageDescriptor, ProjectDescriptor},
    fqsen::Fqsen,
    reference::{Reference, Shared, shared},
};

use crate::{compiler::CompilerPass, error::CompileError};

/// Characters that separate package levels in legacy package names.
const LEGACY_SEPARATORS: [char; 5] = ['.', '_', '-', '[', ']'];

/// Rebuilds the package tree from the `@package` and `@subpackage` tags of
/// every file and top-level element.
///
/// Elements without a package go to the default package. Package names that
/// are not valid FQSENs are skipped and the element is left without a
/// package link. Nothing happens when packages are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageTreeBuilder;

impl CompilerPass for PackageTreeBuilder {
    fn description(&self) -> &'static str {
        "Build package tree"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        if project.settings().ignore_packages() {
            debug!("Packages are ignored, skipping package tree");
            return Ok(());
        }

        let root = project.package();
        let default_package = project.settings().default_package().to_string();
        let elements = packaged_elements(project);

        root.borrow_mut().reset();
        let packages = &mut project.indexes_mut().packages;
        packages.clear();
        packages.set(Fqsen::root().as_string(), Rc::clone(&root))?;

        let mut skipped = 0;
        for element in &elements {
            let name = element.with_base(|base| package_name(base, &default_package));
            match package_node(packages, &root, &name)? {
                Some(node) => {
                    element.with_base_mut(|base| base.set_package(Reference::resolved(&node)));
                    node.borrow_mut().elements_mut().add(element);
                }
                None => {
                    element.with_base_mut(DescriptorBase::clear_package);
                    skipped += 1;
                }
            }
        }

        info!(packages = packages.len(), skipped = skipped; "Built package tree");
        Ok(())
    }
}

/// Files and their top-level elements; members are not listed in packages.
fn packaged_elements(project: &ProjectDescriptor) -> Vec<Element> {
    let mut elements = Vec::new();
    for file in project.files().values() {
        elements.push(Element::from(Rc::clone(file)));
        elements.extend(
            file.borrow()
                .elements()
                .into_iter()
                .filter(|element| element.fqsen().is_some_and(|fqsen| !fqsen.is_member())),
        );
    }
    elements
}

/// The package name from the first `@package` and `@subpackage` tags, or
/// `default_package` when there is none.
fn package_name(base: &DescriptorBase, default_package: &str) -> String {
    let mut name = base
        .tags()
        .first("package")
        .map(|tag| normalize(tag.description()))
        .unwrap_or_default();
    if let Some(subpackage) = base.tags().first("subpackage") {
        name.push('\\');
        name.push_str(&normalize(subpackage.description()));
    }

    if name.is_empty() {
        default_package.to_string()
    } else {
        name
    }
}

/// Turns legacy separators into `\` and drops anything that cannot appear
/// in a package name, e.g. `My[Package]` becomes `My\Package`.
fn normalize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if LEGACY_SEPARATORS.contains(&c) { '\\' } else { c })
        .collect();
    replaced
        .trim_end_matches('\\')
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '\\')
        .collect()
}

/// Returns the node for `name`, creating it and any missing ancestors below
/// `root`. Returns `None` when `name` is not a valid package FQSEN.
fn package_node(
    packages: &mut Index<String, Shared<PackageDescriptor>>,
    root: &Shared<PackageDescriptor>,
    name: &str,
) -> Result<Option<Shared<PackageDescriptor>>, CompileError> {
    let key = format!("\\{}", name.trim_start_matches('\\'));
    if let Some(node) = packages.get(&key) {
        return Ok(Some(Rc::clone(node)));
    }
    let fqsen = match Fqsen::new(&key) {
        Ok(fqsen) => fqsen,
        Err(err) => {
            debug!(err:% = err; "Skipping invalid package name");
            return Ok(None);
        }
    };

    let mut pointer = Rc::clone(root);
    let mut current = Fqsen::root();
    for segment in fqsen.segments() {
        current = current.child(&segment)?;
        let existing = pointer.borrow().children().get(&segment).cloned();
        let child = match existing {
            Some(child) => child,
            None => {
                let child = shared(PackageDescriptor::new(current));
                child.borrow_mut().set_parent(&pointer);
                pointer
                    .borrow_mut()
                    .children_mut()
                    .set(segment, Rc::clone(&child))?;
                packages.set(current.as_string(), Rc::clone(&child))?;
                child
            }
        };
        pointer = child;
    }
    Ok(Some(pointer))
}
