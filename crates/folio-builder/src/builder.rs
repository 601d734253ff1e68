//! The project descriptor builder.

use std::rc::Rc;

use log::{debug, info, trace};

use folio_core::{
    descriptor::{
        ApiSetDescriptor, Descriptor, DescriptorKind, DocumentDescriptor, DocumentationSet,
        FileDescriptor, GuideSetDescriptor, NamespaceDescriptor, ProjectDescriptor, Settings,
        TocDirective, VersionDescriptor,
    },
    reference::shared,
};

use crate::{
    assembler::{Assembled, Assembler, AssemblerFactory, Built, Reflected},
    error::{BuildError, Result},
    filter::{Filter, FilterChain, Filtered},
    reflection,
    validator::Validator,
};

/// Name of the version created when none was configured.
pub const DEFAULT_VERSION: &str = "latest";

/// Name of the API set created when the first version has none.
pub const DEFAULT_API_SET: &str = "api";

/// Assembles a reflected project into a [`ProjectDescriptor`].
///
/// Every reflected node is converted by the first matching assembler of the
/// [`AssemblerFactory`], passed through the [`FilterChain`] and checked by
/// the [`Validator`]. Cross references are left unresolved; the compiler
/// links them afterwards.
///
/// # Examples
///
/// ```
/// use folio_builder::{ProjectDescriptorBuilder, reflection};
///
/// let project = reflection::Project {
///     name: Some("Demo".to_string()),
///     files: vec![reflection::File {
///         path: "src/Foo.php".to_string(),
///         classes: vec![reflection::Class {
///             fqsen: "\\App\\Foo".to_string(),
///             ..Default::default()
///         }],
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
///
/// let mut builder = ProjectDescriptorBuilder::new();
/// builder.build_project(&project).unwrap();
///
/// let descriptor = builder.into_project();
/// assert_eq!(descriptor.name(), "Demo");
/// assert_eq!(descriptor.files().len(), 1);
/// ```
pub struct ProjectDescriptorBuilder {
    assemblers: AssemblerFactory,
    filters: FilterChain,
    validator: Validator,
    project: ProjectDescriptor,
}

impl Default for ProjectDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDescriptorBuilder {
    /// Creates a builder with the default assemblers and filters.
    pub fn new() -> Self {
        Self::with_parts(AssemblerFactory::default(), FilterChain::standard())
    }

    /// Creates a builder from a custom assembler registry and filter chain.
    pub fn with_parts(assemblers: AssemblerFactory, filters: FilterChain) -> Self {
        Self {
            assemblers,
            filters,
            validator: Validator::new(),
            project: ProjectDescriptor::default(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.project.set_name(name);
    }

    pub fn settings(&self) -> &Settings {
        self.project.settings()
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        self.project.settings_mut()
    }

    pub fn add_version(&mut self, version: VersionDescriptor) {
        self.project.add_version(version);
    }

    /// Registers an additional assembler, consulted after the existing ones.
    pub fn register_assembler(&mut self, assembler: Box<dyn Assembler>) {
        self.assemblers.register(assembler);
    }

    /// Attaches `filter` to descriptors of `kind`.
    pub fn register_filter(&mut self, kind: DescriptorKind, filter: Rc<dyn Filter>) {
        self.filters.attach(kind, filter);
    }

    /// The project built so far.
    pub fn project(&self) -> &ProjectDescriptor {
        &self.project
    }

    pub fn into_project(self) -> ProjectDescriptor {
        self.project
    }

    /// Converts `data` into a descriptor of kind `output`.
    ///
    /// Returns `Ok(None)` when a filter dropped the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoAssemblerFound`] when no assembler converts
    /// `data` into `output`, or any error raised by the assembler.
    pub fn build_descriptor(
        &self,
        data: Reflected<'_>,
        output: DescriptorKind,
    ) -> Result<Option<Built>> {
        let input = data.kind();
        let assembler = self
            .assemblers
            .get(input, output)
            .ok_or(BuildError::NoAssemblerFound { input, output })?;

        let mut built = assembler.create(data, self)?;
        if built.kind() != output {
            return Err(BuildError::UnexpectedDescriptor {
                expected: output,
                actual: built.kind(),
            });
        }

        if let Some(descriptor) = built.as_descriptor_mut() {
            if self.filters.apply(descriptor, self.project.settings()) == Filtered::Drop {
                return Ok(None);
            }
        }
        self.validator.validate(&mut built);

        trace!(input:% = input, output:% = output; "Descriptor built");
        Ok(Some(built))
    }

    /// Typed variant of [`build_descriptor`](Self::build_descriptor).
    ///
    /// # Errors
    ///
    /// See [`build_descriptor`](Self::build_descriptor).
    pub fn build<T: Assembled>(&self, data: Reflected<'_>) -> Result<Option<T>> {
        let Some(built) = self.build_descriptor(data, T::KIND)? else {
            return Ok(None);
        };
        let actual = built.kind();
        T::from_built(built)
            .map(Some)
            .ok_or(BuildError::UnexpectedDescriptor {
                expected: T::KIND,
                actual,
            })
    }

    /// Builds every file, namespace and guide of `project`.
    ///
    /// Files are inserted into the project by path and namespaces into the
    /// namespace index as soon as they are built. Guides become guide sets
    /// of the first version.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`] raised while assembling.
    pub fn build_project(&mut self, project: &reflection::Project) -> Result<()> {
        info!(files = project.files.len(); "Building project descriptor");

        if let Some(name) = &project.name {
            self.project.set_name(name.as_str());
        }
        self.ensure_version();

        for file in &project.files {
            let Some(descriptor) = self.build::<FileDescriptor>(Reflected::File(file))? else {
                continue;
            };
            let descriptor = shared(descriptor);
            FileDescriptor::adopt_elements(&descriptor);
            self.project
                .files_mut()
                .set(file.path.clone(), descriptor)?;
        }

        for namespace in &project.namespaces {
            let Some(descriptor) =
                self.build::<NamespaceDescriptor>(Reflected::Namespace(namespace))?
            else {
                continue;
            };
            let key = descriptor
                .base()
                .fqsen()
                .map(|fqsen| fqsen.to_string())
                .unwrap_or_default();
            self.project
                .indexes_mut()
                .namespaces
                .set(key, shared(descriptor))?;
        }

        for guide in &project.guides {
            let set = self.build_guide(guide)?;
            if let Some(version) = self.project.versions_mut().first_mut() {
                version.add_documentation_set(DocumentationSet::Guide(set));
            }
        }

        info!(
            files = self.project.files().len(),
            namespaces = self.project.indexes().namespaces.len();
            "Project descriptor built"
        );
        Ok(())
    }

    /// Makes sure the project has a version holding an API set.
    fn ensure_version(&mut self) {
        if self.project.versions().is_empty() {
            debug!(version = DEFAULT_VERSION; "No version configured, creating one");
            self.project
                .add_version(VersionDescriptor::new(DEFAULT_VERSION));
        }

        let include_source = self.project.settings().include_source();
        if let Some(version) = self.project.versions_mut().first_mut() {
            let has_api_set = version
                .documentation_sets()
                .iter()
                .any(|set| matches!(set, DocumentationSet::Api(_)));
            if !has_api_set {
                version.add_documentation_set(DocumentationSet::Api(ApiSetDescriptor::new(
                    DEFAULT_API_SET,
                    include_source,
                )));
            }
        }
    }

    fn build_guide(&self, guide: &reflection::Guide) -> Result<GuideSetDescriptor> {
        debug!(guide = guide.name.as_str(); "Building guide set");
        let mut set = GuideSetDescriptor::new(guide.name.as_str());
        for document in &guide.documents {
            let mut descriptor =
                DocumentDescriptor::new(document.file.as_str(), document.title.as_str());
            for toc in &document.tocs {
                descriptor.add_toc(TocDirective::new(toc.clone()));
            }
            set.documents_mut().set(document.file.clone(), descriptor)?;
        }
        Ok(set)
    }
}
