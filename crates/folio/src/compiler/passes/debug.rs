use log::debug;

use folio_core::descriptor::ProjectDescriptor;

use crate::{analyzer::ProjectAnalyzer, compiler::CompilerPass, error::CompileError};

/// Logs the analyzer report of the compiled project.
#[derive(Debug, Clone, Copy, Default)]
pub struct Debug;

impl CompilerPass for Debug {
    fn description(&self) -> &'static str {
        "Analyze project"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let report = ProjectAnalyzer::new().analyze(project);
        debug!(
            files = report.files(),
            unresolved_parents = report.unresolved_parent_classes();
            "Project analysis\n{report}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::{Descriptor, FileDescriptor};

    use super::*;
    use crate::compiler::passes::fixtures::{self, class};

    #[test]
    fn test_leaves_project_unchanged() {
        let user = class("\\App\\User");
        user.borrow_mut().base_mut().set_description("A user.");
        let mut file = FileDescriptor::new("src/User.php", "");
        file.classes_mut().push(user);
        let mut project = fixtures::indexed_project(vec![file]);
        let before = ProjectAnalyzer::new().analyze(&project);

        Debug.execute(&mut project).unwrap();

        assert_eq!(ProjectAnalyzer::new().analyze(&project), before);
        assert_eq!(project.indexes().elements.len(), 1);
        let user = project.indexes().classes.get(&"\\App\\User".to_string()).unwrap();
        assert_eq!(user.borrow().base().description(), "A user.");
    }
}
