//! The compiler: an ordered pipeline of passes over a project descriptor.
//!
//! Each [`CompilerPass`] mutates the [`ProjectDescriptor`] in place. Passes
//! run in the order they were added; [`Compiler::standard`] declares the
//! pipeline in dependency order (indexes first, then trees and links, then
//! everything that reads them).

pub mod passes;

use std::rc::Rc;

use log::{debug, info};

use folio_core::descriptor::ProjectDescriptor;

use crate::{
    error::{CompileError, FolioError},
    example::ExampleFinder,
    router::Router,
};

use passes::{
    ClassTreeBuilder, Debug, ElementsIndexBuilder, ExampleTagsEnricher, InterfaceTreeBuilder,
    Linker, MarkerFromTagsExtractor, NamespaceTreeBuilder, PackageTreeBuilder, RemoveSourcecode,
    ResolveInlineLinkAndSeeTags, ResolveInlineMarkers, TableOfContentsBuilder, UsedByBuilder,
};

/// A single transformation of the project descriptor.
pub trait CompilerPass {
    /// A short, human readable name used in logs and errors.
    fn description(&self) -> &'static str;

    /// Runs the pass.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for conditions the pass cannot recover
    /// from; the compile run stops there.
    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError>;
}

/// An ordered list of compiler passes.
#[derive(Default)]
pub struct Compiler {
    passes: Vec<Box<dyn CompilerPass>>,
}

impl Compiler {
    /// Creates a compiler without passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard pipeline.
    ///
    /// `router` produces the URLs of inline links and tables of contents and
    /// `examples` looks up the files referenced by `{@example}` tags.
    pub fn standard(router: Rc<dyn Router>, examples: Box<dyn ExampleFinder>) -> Self {
        let mut compiler = Self::new();
        compiler.add(Box::new(ElementsIndexBuilder));
        compiler.add(Box::new(MarkerFromTagsExtractor));
        compiler.add(Box::new(ExampleTagsEnricher::new(examples)));
        compiler.add(Box::new(Linker));
        compiler.add(Box::new(ClassTreeBuilder));
        compiler.add(Box::new(InterfaceTreeBuilder));
        compiler.add(Box::new(NamespaceTreeBuilder));
        compiler.add(Box::new(PackageTreeBuilder));
        compiler.add(Box::new(ResolveInlineMarkers));
        compiler.add(Box::new(ResolveInlineLinkAndSeeTags::new(Rc::clone(&router))));
        compiler.add(Box::new(UsedByBuilder));
        compiler.add(Box::new(TableOfContentsBuilder::new(router)));
        compiler.add(Box::new(RemoveSourcecode));
        compiler.add(Box::new(Debug));
        compiler
    }

    /// Appends `pass` to the pipeline.
    pub fn add(&mut self, pass: Box<dyn CompilerPass>) {
        self.passes.push(pass);
    }

    /// Descriptions of the passes, in execution order.
    pub fn descriptions(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.description()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs every pass in order.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Compile`] naming the first pass that failed.
    /// Changes made by earlier passes are kept.
    pub fn run(&self, project: &mut ProjectDescriptor) -> Result<(), FolioError> {
        info!(passes = self.passes.len(); "Compiling project");
        for pass in &self.passes {
            let name = pass.description();
            debug!(pass = name; "Running compiler pass");
            pass.execute(project)
                .map_err(|source| FolioError::Compile { pass: name, source })?;
        }
        info!("Project compiled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{example::FileExampleFinder, router::StandardRouter};

    struct Record {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl CompilerPass for Record {
        fn description(&self) -> &'static str {
            self.name
        }

        fn execute(&self, _: &mut ProjectDescriptor) -> Result<(), CompileError> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                return Err(CompileError::OrphanMarker {
                    element: "\\x()".to_string(),
                });
            }
            Ok(())
        }
    }

    fn record(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>, fail: bool) -> Box<Record> {
        Box::new(Record {
            name,
            log: Rc::clone(log),
            fail,
        })
    }

    #[test]
    fn test_passes_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut compiler = Compiler::new();
        compiler.add(record("first", &log, false));
        compiler.add(record("second", &log, false));

        compiler.run(&mut ProjectDescriptor::default()).unwrap();

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_failing_pass_stops_the_run() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut compiler = Compiler::new();
        compiler.add(record("first", &log, true));
        compiler.add(record("second", &log, false));

        let err = compiler.run(&mut ProjectDescriptor::default()).unwrap_err();

        assert!(matches!(err, FolioError::Compile { pass: "first", .. }));
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn test_standard_pipeline_order() {
        let compiler = Compiler::standard(
            Rc::new(StandardRouter::new()),
            Box::new(FileExampleFinder::default()),
        );

        let descriptions = compiler.descriptions();
        assert_eq!(descriptions.len(), 14);
        assert_eq!(descriptions.first(), Some(&"Build elements index"));
        assert_eq!(descriptions.last(), Some(&"Analyze project"));

        let position = |name: &str| descriptions.iter().position(|d| *d == name).unwrap();
        assert!(position("Resolve tag references") < position("Build used-by tags"));
        assert!(position("Build namespace tree") < position("Build tables of contents"));
    }
}
