//! Folio - compiles reflected PHP projects into cross-referenced documentation
//! descriptors.
//!
//! A reflected project is first assembled into a
//! [`ProjectDescriptor`](descriptor::ProjectDescriptor) whose references are
//! still textual. The [`compiler`] then runs its passes over the descriptor:
//! it indexes every element, links parents, interfaces and tag references,
//! builds the namespace and package trees, collects markers, renders inline
//! links and builds the tables of contents.

pub mod analyzer;
pub mod compiler;
pub mod config;
pub mod example;
pub mod resolver;
pub mod router;

mod error;

pub use folio_builder::reflection;
pub use folio_core::{collection, descriptor, fqsen, reference};

pub use error::{CompileError, FolioError};

use std::rc::Rc;

use log::{debug, info};

use folio_builder::ProjectDescriptorBuilder;

use analyzer::{AnalyzerReport, ProjectAnalyzer};
use compiler::Compiler;
use config::AppConfig;
use descriptor::ProjectDescriptor;
use example::FileExampleFinder;
use router::{Router, StandardRouter};

/// Builds and compiles project descriptors.
///
/// # Examples
///
/// ```
/// use folio::{DocumentationBuilder, config::AppConfig};
///
/// let json = r#"{
///     "name": "Demo",
///     "files": [{
///         "path": "src/Foo.php",
///         "classes": [
///             { "fqsen": "\\NS\\Foo", "parent": "\\NS\\Bar" },
///             { "fqsen": "\\NS\\Bar" }
///         ]
///     }]
/// }"#;
///
/// let builder = DocumentationBuilder::new(AppConfig::default());
/// let project = builder.build_from_json(json).expect("Failed to compile");
///
/// let report = builder.analyze(&project);
/// assert_eq!(report.files(), 1);
/// assert_eq!(report.unresolved_parent_classes(), 0);
/// ```
pub struct DocumentationBuilder {
    config: AppConfig,
    router: Rc<dyn Router>,
}

impl Default for DocumentationBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DocumentationBuilder {
    /// Creates a builder using the [`StandardRouter`].
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            router: Rc::new(StandardRouter::new()),
        }
    }

    /// Replaces the router used for inline links and tables of contents.
    pub fn with_router(mut self, router: Rc<dyn Router>) -> Self {
        self.router = router;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Assembles `project` into a descriptor without compiling it.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] for unusable settings and
    /// [`FolioError::Build`] when the reflection cannot be assembled.
    pub fn build(&self, project: &reflection::Project) -> Result<ProjectDescriptor, FolioError> {
        let mut builder = ProjectDescriptorBuilder::new();
        *builder.settings_mut() = self.config.settings()?;
        if let Some(version) = self.config.version()? {
            builder.add_version(version);
        }

        builder.build_project(project)?;

        let mut descriptor = builder.into_project();
        if let Some(name) = self.config.project().name() {
            descriptor.set_name(name);
        }
        debug!(name = descriptor.name(); "Project descriptor assembled");
        Ok(descriptor)
    }

    /// Runs the standard compiler pipeline over `project`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Compile`] naming the pass that failed.
    pub fn compile(&self, project: &mut ProjectDescriptor) -> Result<(), FolioError> {
        let examples = FileExampleFinder::from_config(self.config.examples());
        Compiler::standard(Rc::clone(&self.router), Box::new(examples)).run(project)
    }

    /// Reports statistics about `project`.
    pub fn analyze(&self, project: &ProjectDescriptor) -> AnalyzerReport {
        ProjectAnalyzer::new().analyze(project)
    }

    /// Deserializes a reflected project from JSON, then builds and compiles
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Input`] for malformed JSON, otherwise the errors
    /// of [`build`](Self::build) and [`compile`](Self::compile).
    pub fn build_from_json(&self, json: &str) -> Result<ProjectDescriptor, FolioError> {
        let reflected: reflection::Project = serde_json::from_str(json)?;
        info!(files = reflected.files.len(); "Loaded reflected project");

        let mut project = self.build(&reflected)?;
        self.compile(&mut project)?;
        Ok(project)
    }
}
