use log::{info, trace};

use folio_core::{
    collection::Index,
    descriptor::ProjectDescriptor,
    reference::{Reference, Shared},
};

use crate::{compiler::CompilerPass, error::CompileError};

/// Outcome counts of one linking pass.
#[derive(Debug, Default)]
struct Linked {
    resolved: usize,
    unresolved: usize,
}

impl Linked {
    /// Resolves `reference` against `index` unless it is already resolved.
    fn link<T>(&mut self, reference: &mut Reference<T>, index: &Index<String, Shared<T>>) {
        let Some(fqsen) = reference.unresolved() else {
            return;
        };
        match index.get(&fqsen.as_string()) {
            Some(target) => {
                *reference = Reference::resolved(target);
                self.resolved += 1;
            }
            None => {
                trace!(fqsen:% = fqsen; "Reference target is not part of the project");
                self.unresolved += 1;
            }
        }
    }

    fn link_all<T>(&mut self, references: &mut [Reference<T>], index: &Index<String, Shared<T>>) {
        for reference in references {
            self.link(reference, index);
        }
    }
}

/// Links the parent class, implemented interfaces and used traits of every
/// class, and the interfaces and traits of enums and traits.
///
/// References to elements outside the project stay unresolved. Resolved
/// references are left untouched, so running the pass again changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassTreeBuilder;

impl CompilerPass for ClassTreeBuilder {
    fn description(&self) -> &'static str {
        "Build class tree"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let indexes = project.indexes();
        let mut linked = Linked::default();

        for class in indexes.classes.values() {
            let mut class = class.borrow_mut();
            if let Some(mut parent) = class.parent().cloned() {
                linked.link(&mut parent, &indexes.classes);
                class.set_parent(parent);
            }
            linked.link_all(class.interfaces_mut(), &indexes.interfaces);
            linked.link_all(class.used_traits_mut(), &indexes.traits);
        }

        for enum_ in indexes.enums.values() {
            let mut enum_ = enum_.borrow_mut();
            linked.link_all(enum_.interfaces_mut(), &indexes.interfaces);
            linked.link_all(enum_.used_traits_mut(), &indexes.traits);
        }

        for trait_ in indexes.traits.values() {
            linked.link_all(trait_.borrow_mut().used_traits_mut(), &indexes.traits);
        }

        info!(resolved = linked.resolved, unresolved = linked.unresolved; "Built class tree");
        Ok(())
    }
}

/// Links the parent interfaces of every interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceTreeBuilder;

impl CompilerPass for InterfaceTreeBuilder {
    fn description(&self) -> &'static str {
        "Build interface tree"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let interfaces = &project.indexes().interfaces;
        let mut linked = Linked::default();

        for interface in interfaces.values() {
            linked.link_all(interface.borrow_mut().parents_mut(), interfaces);
        }

        info!(resolved = linked.resolved, unresolved = linked.unresolved; "Built interface tree");
        Ok(())
    }
}
