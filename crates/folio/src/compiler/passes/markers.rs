use log::{debug, info};

use folio_core::descriptor::{Marker, ProjectDescriptor};

use crate::{
    compiler::{CompilerPass, passes::elements_and_files},
    error::CompileError,
};

const TODO_TAG: &str = "todo";

/// Records every `@todo` tag as a `TODO` marker of the file owning the
/// tagged element.
///
/// Markers are derived data: every file's marker list is emptied first, so
/// a recompile collects each occurrence exactly once.
///
/// # Errors
///
/// Fails with [`CompileError::OrphanMarker`] when a tagged element is not
/// owned by a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerFromTagsExtractor;

impl CompilerPass for MarkerFromTagsExtractor {
    fn description(&self) -> &'static str {
        "Collect all markers embedded in tags"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        for file in project.files().values() {
            file.borrow_mut().clear_markers();
        }

        let mut count = 0;
        for element in elements_and_files(project) {
            let (todos, line) = element.with_base(|base| {
                let todos: Vec<String> = base
                    .tags()
                    .get(TODO_TAG)
                    .iter()
                    .map(|tag| tag.description().to_string())
                    .collect();
                (todos, base.line())
            });
            if todos.is_empty() {
                continue;
            }

            let Some(file) = element.file() else {
                return Err(CompileError::OrphanMarker {
                    element: element
                        .fqsen()
                        .map_or_else(|| element.name(), |fqsen| fqsen.as_string()),
                });
            };
            debug!(todos = todos.len(), line = line; "Recording todo markers");
            let mut file = file.borrow_mut();
            for message in todos {
                file.add_marker(Marker::new("TODO", message, line));
                count += 1;
            }
        }

        info!(markers = count; "Collected markers from tags");
        Ok(())
    }
}
