use log::info;

use folio_core::descriptor::{DocumentationSet, ProjectDescriptor};

use crate::{compiler::CompilerPass, error::CompileError};

/// Drops the source of every file when an API documentation set must not
/// publish sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveSourcecode;

impl CompilerPass for RemoveSourcecode {
    fn description(&self) -> &'static str {
        "Removing sourcecode from file descriptors"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let hide_sources = project
            .versions()
            .iter()
            .flat_map(|version| version.documentation_sets())
            .any(|set| matches!(set, DocumentationSet::Api(api) if !api.include_source()));
        if !hide_sources {
            return Ok(());
        }

        let mut removed = 0;
        for file in project.files().values() {
            let mut file = file.borrow_mut();
            if file.source().is_some() {
                file.set_source(None);
                removed += 1;
            }
        }

        info!(files = removed; "Removed file sources");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::{ApiSetDescriptor, FileDescriptor, VersionDescriptor};

    use super::*;
    use crate::compiler::passes::fixtures;

    fn project_with_api_set(include_source: bool) -> ProjectDescriptor {
        let mut file = FileDescriptor::new("a.php", "");
        file.set_source(Some("<?php echo 1;".to_string()));
        let mut project = fixtures::project(vec![file]);
        let mut version = VersionDescriptor::new("latest");
        version.add_documentation_set(DocumentationSet::Api(ApiSetDescriptor::new(
            "api",
            include_source,
        )));
        project.add_version(version);
        project
    }

    fn source(project: &ProjectDescriptor) -> Option<String> {
        let file = project.files().get(&"a.php".to_string()).unwrap().borrow();
        file.source().map(str::to_string)
    }

    #[test]
    fn test_sources_are_removed() {
        let mut project = project_with_api_set(false);
        RemoveSourcecode.execute(&mut project).unwrap();
        assert_eq!(source(&project), None);
    }

    #[test]
    fn test_sources_are_kept_when_included() {
        let mut project = project_with_api_set(true);
        RemoveSourcecode.execute(&mut project).unwrap();
        assert_eq!(source(&project).as_deref(), Some("<?php echo 1;"));
    }

    #[test]
    fn test_project_without_versions_keeps_sources() {
        let mut file = FileDescriptor::new("a.php", "");
        file.set_source(Some("<?php".to_string()));
        let mut project = fixtures::project(vec![file]);

        RemoveSourcecode.execute(&mut project).unwrap();

        assert!(source(&project).is_some());
    }
}
