//! Configuration types for Folio documentation runs.
//!
//! All types implement [`serde::Deserialize`] and default every section, so
//! an empty TOML document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`ProjectConfig`] - Project name, package defaults, markers and visibility.
//! - [`ExamplesConfig`] - Where `@example` files are looked up.
//! - [`ApiConfig`] - One API documentation set.
//!
//! # Example
//!
//! ```
//! # use folio::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.project().markers(), ["TODO", "FIXME"]);
//! assert!(config.settings().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use folio_core::descriptor::{
    ApiSetDescriptor, DEFAULT_PACKAGE_NAME, DocumentationSet, Settings, UnknownVisibilityError,
    VersionDescriptor, VisibilityFilter,
};

/// Error raised for configuration values that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid visibility in config: {0}")]
    Visibility(#[from] UnknownVisibilityError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Project section.
    #[serde(default)]
    project: ProjectConfig,

    /// Example lookup section.
    #[serde(default)]
    examples: ExamplesConfig,

    /// API documentation sets; one default set when empty.
    #[serde(default)]
    api: Vec<ApiConfig>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(project: ProjectConfig, examples: ExamplesConfig, api: Vec<ApiConfig>) -> Self {
        Self {
            project,
            examples,
            api,
        }
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn examples(&self) -> &ExamplesConfig {
        &self.examples
    }

    pub fn api(&self) -> &[ApiConfig] {
        &self.api
    }

    /// Converts the project section into descriptor [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Visibility`] for an unknown visibility name.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::default();
        settings.set_visibility(self.project.visibility()?);
        settings.set_markers(self.project.markers.clone());
        settings.set_default_package(self.project.default_package.as_str());
        settings.set_ignore_packages(self.project.ignore_packages);
        settings.set_include_source(self.api.iter().any(|api| api.include_source));
        Ok(settings)
    }

    /// The version holding the configured API sets, or `None` when no API
    /// set is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when two API sets share a name.
    pub fn version(&self) -> Result<Option<VersionDescriptor>, ConfigError> {
        if self.api.is_empty() {
            return Ok(None);
        }

        let mut version = VersionDescriptor::new(self.project.version.as_str());
        for (index, api) in self.api.iter().enumerate() {
            if self.api[..index].iter().any(|other| other.name == api.name) {
                return Err(ConfigError::Invalid(format!(
                    "API set \"{}\" is configured more than once",
                    api.name
                )));
            }
            version.add_documentation_set(DocumentationSet::Api(ApiSetDescriptor::new(
                api.name.as_str(),
                api.include_source,
            )));
        }
        Ok(Some(version))
    }
}

/// Project-wide settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    name: Option<String>,
    version: String,
    default_package: String,
    markers: Vec<String>,
    visibility: Vec<String>,
    ignore_packages: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: "latest".to_string(),
            default_package: DEFAULT_PACKAGE_NAME.to_string(),
            markers: vec!["TODO".to_string(), "FIXME".to_string()],
            visibility: vec![
                "public".to_string(),
                "protected".to_string(),
                "private".to_string(),
            ],
            ignore_packages: false,
        }
    }
}

impl ProjectConfig {
    /// The project name; the reflected project's name wins when unset.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn default_package(&self) -> &str {
        &self.default_package
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn ignore_packages(&self) -> bool {
        self.ignore_packages
    }

    /// Parses the configured visibility names.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVisibilityError`] for an unknown name.
    pub fn visibility(&self) -> Result<VisibilityFilter, UnknownVisibilityError> {
        self.visibility.iter().map(|name| name.parse()).collect()
    }
}

/// Where example files referenced by `@example` tags are searched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExamplesConfig {
    /// Root of the documented sources.
    source_directory: Option<PathBuf>,

    /// Dedicated example directories, searched first.
    directories: Vec<PathBuf>,
}

impl ExamplesConfig {
    pub fn new(source_directory: Option<PathBuf>, directories: Vec<PathBuf>) -> Self {
        Self {
            source_directory,
            directories,
        }
    }

    pub fn source_directory(&self) -> Option<&Path> {
        self.source_directory.as_deref()
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }
}

/// One API documentation set.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    name: String,

    /// Keep the raw source of files in the descriptor.
    #[serde(default)]
    include_source: bool,
}

impl ApiConfig {
    pub fn new(name: impl Into<String>, include_source: bool) -> Self {
        Self {
            name: name.into(),
            include_source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn include_source(&self) -> bool {
        self.include_source
    }
}
