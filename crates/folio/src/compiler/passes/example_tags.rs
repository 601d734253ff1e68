use std::{collections::HashMap, sync::LazyLock};

use log::{debug, info};
use regex::{Captures, Regex};

use folio_core::descriptor::{ExampleLocation, ProjectDescriptor};

use crate::{compiler::CompilerPass, error::CompileError, example::ExampleFinder};

static INLINE_EXAMPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@example\s(.+?)\}").expect("Valid inline example regex"));

/// Replaces inline `{@example path[:start[,length]] [description]}` tags in
/// descriptions with the referenced source, as inline code.
pub struct ExampleTagsEnricher {
    finder: Box<dyn ExampleFinder>,
}

impl ExampleTagsEnricher {
    pub fn new(finder: Box<dyn ExampleFinder>) -> Self {
        Self { finder }
    }

    /// Replaces the inline examples of `description`. Each distinct tag is
    /// looked up once.
    fn replace_inline_examples(&self, description: &str) -> String {
        let mut resolved: HashMap<String, String> = HashMap::new();
        INLINE_EXAMPLE_RE
            .replace_all(description, |captures: &Captures<'_>| {
                resolved
                    .entry(captures[0].to_string())
                    .or_insert_with(|| self.render(&captures[1]))
                    .clone()
            })
            .into_owned()
    }

    fn render(&self, body: &str) -> String {
        let location = ExampleLocation::parse(body);
        let content = self.finder.find(&location);
        if location.description().is_empty() {
            format!("`{content}`")
        } else {
            format!("*{}*`{content}`", location.description())
        }
    }
}

impl CompilerPass for ExampleTagsEnricher {
    fn description(&self) -> &'static str {
        "Enriches inline example tags with their sources"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let mut count = 0;
        for element in project.indexes().elements.values() {
            let description = element.with_base(|base| base.description().to_string());
            if !INLINE_EXAMPLE_RE.is_match(&description) {
                continue;
            }

            let enriched = self.replace_inline_examples(&description);
            debug!(element:? = element; "Inlined examples");
            element.with_base_mut(|base| base.set_description(enriched));
            count += 1;
        }

        info!(elements = count; "Enriched inline examples");
        Ok(())
    }
}
