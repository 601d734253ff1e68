use log::{debug, info};

use folio_core::{
    descriptor::{Element, Indexes, ProjectDescriptor},
    fqsen::MEMBER_SEPARATOR,
};

use crate::{compiler::CompilerPass, error::CompileError};

/// Rebuilds the `elements` index and the per-kind indexes of top-level
/// elements from the files of the project.
///
/// Keys are FQSEN strings; properties are keyed as `\Class::$name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementsIndexBuilder;

impl CompilerPass for ElementsIndexBuilder {
    fn description(&self) -> &'static str {
        "Build elements index"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let files: Vec<_> = project.files().values().cloned().collect();
        let indexes = project.indexes_mut();
        clear(indexes);

        for file in files {
            for element in file.borrow().elements() {
                add(indexes, element)?;
            }
        }

        info!(
            elements = indexes.elements.len(),
            classes = indexes.classes.len(),
            functions = indexes.functions.len();
            "Built elements index"
        );
        Ok(())
    }
}

fn clear(indexes: &mut Indexes) {
    indexes.elements.clear();
    indexes.constants.clear();
    indexes.functions.clear();
    indexes.classes.clear();
    indexes.interfaces.clear();
    indexes.traits.clear();
    indexes.enums.clear();
}

/// The key of `element` in the `elements` index.
pub(crate) fn index_key(element: &Element) -> Option<String> {
    let fqsen = element.fqsen()?;
    match element {
        Element::Property(_) => Some(format!(
            "{}{MEMBER_SEPARATOR}${}",
            fqsen.container(),
            fqsen.name()
        )),
        _ => Some(fqsen.as_string()),
    }
}

fn add(indexes: &mut Indexes, element: Element) -> Result<(), CompileError> {
    let Some(key) = index_key(&element) else {
        debug!(element:? = element; "Skipping element without FQSEN");
        return Ok(());
    };

    match &element {
        Element::Class(class) => indexes.classes.set(key.clone(), class.clone())?,
        Element::Interface(interface) => indexes.interfaces.set(key.clone(), interface.clone())?,
        Element::Trait(trait_) => indexes.traits.set(key.clone(), trait_.clone())?,
        Element::Enum(enum_) => indexes.enums.set(key.clone(), enum_.clone())?,
        Element::Function(function) => indexes.functions.set(key.clone(), function.clone())?,
        Element::Constant(constant) if !key.contains(MEMBER_SEPARATOR) => {
            indexes.constants.set(key.clone(), constant.clone())?
        }
        _ => {}
    }
    indexes.elements.set(key, element)?;
    Ok(())
}
