use log::{error, info, trace};
use regex::Regex;

use folio_core::descriptor::{Marker, ProjectDescriptor};

use crate::{
    compiler::CompilerPass,
    error::CompileError,
};

/// Scans the source of every file for comments starting with one of the
/// configured marker terms (`// TODO: ...`, `# FIXME ...`, `* @todo ...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveInlineMarkers;

impl CompilerPass for ResolveInlineMarkers {
    fn description(&self) -> &'static str {
        "Collect all markers in a file"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let terms = project.settings().markers();
        if terms.is_empty() {
            return Ok(());
        }
        let pattern = marker_pattern(terms);
        let regex = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(err) => {
                error!(pattern:% = pattern, err:% = err; "Invalid marker pattern, skipping inline markers");
                return Ok(());
            }
        };

        let mut count = 0;
        for file in project.files().values() {
            let markers = match file.borrow().source() {
                Some(source) => find_markers(&regex, source),
                None => continue,
            };
            let mut file = file.borrow_mut();
            for marker in markers {
                trace!(kind = marker.kind(), line = marker.line(); "Found inline marker");
                file.add_marker(marker);
                count += 1;
            }
        }

        info!(markers = count; "Collected inline markers");
        Ok(())
    }
}

fn marker_pattern(terms: &[String]) -> String {
    let terms: Vec<String> = terms.iter().map(|term| regex::escape(term)).collect();
    format!(r"(?://|#|/\*+|\*)[ \t]*@?({})\b:?[ \t]*(.*)", terms.join("|"))
}

fn find_markers(regex: &Regex, source: &str) -> Vec<Marker> {
    regex
        .captures_iter(source)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let kind = captures.get(1)?.as_str();
            let message = captures.get(2).map_or("", |message| message.as_str());
            let line = source[..whole.start()].matches('\n').count() + 1;
            Some(Marker::new(kind, message.trim(), line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::FileDescriptor;

    use super::*;
    use crate::compiler::passes::fixtures;

    fn markers_of(source: &str, terms: &[&str]) -> Vec<(String, String, usize)> {
        let mut file = FileDescriptor::new("a.php", "");
        file.set_source(Some(source.to_string()));
        let mut project = fixtures::project(vec![file]);
        project
            .settings_mut()
            .set_markers(terms.iter().map(|term| term.to_string()).collect());

        ResolveInlineMarkers.execute(&mut project).unwrap();

        let file = project.files().get(&"a.php".to_string()).unwrap().borrow();
        file.markers()
            .iter()
            .map(|m| (m.kind().to_string(), m.message().to_string(), m.line()))
            .collect()
    }

    #[test]
    fn test_markers_with_line_numbers() {
        let source = "<?php\n// TODO: cache this\n$a = 1;\n# FIXME broken on windows\n/** @todo nope */\n";

        let markers = markers_of(source, &["TODO", "FIXME"]);

        assert_eq!(
            markers,
            vec![
                ("TODO".to_string(), "cache this".to_string(), 2),
                ("FIXME".to_string(), "broken on windows".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_terms_are_escaped() {
        let markers = markers_of("<?php\n// X.Y later\n// XaY never\n", &["X.Y"]);
        assert_eq!(markers, vec![("X.Y".to_string(), "later".to_string(), 2)]);
    }

    #[test]
    fn test_repeated_comments_are_all_recorded() {
        let markers = markers_of("<?php\n// TODO: later\n// TODO: later\n", &["TODO"]);
        assert_eq!(
            markers,
            vec![
                ("TODO".to_string(), "later".to_string(), 2),
                ("TODO".to_string(), "later".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_file_without_markers() {
        assert!(markers_of("<?php\necho 1;\n", &["TODO"]).is_empty());
    }
}
