use std::{rc::Rc, sync::LazyLock};

use log::{debug, info};
use regex::{Captures, Regex};

use folio_core::{
    collection::Index,
    descriptor::{Element, ProjectDescriptor},
};

use crate::{
    compiler::CompilerPass,
    error::CompileError,
    resolver::{Context, Lookup, lookup},
    router::{Node, Router},
};

static INLINE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{@(see|link)[ ]+([^}]+)\}").expect("Valid inline link regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+://.+$").expect("Valid URL regex"));

/// Replaces inline `{@see ...}` and `{@link ...}` tags in descriptions with
/// Markdown links.
///
/// URLs link to themselves. Element references are resolved in the context
/// of the described element and link to the element's page; references that
/// cannot be found are replaced by the resolved FQSEN.
pub struct ResolveInlineLinkAndSeeTags {
    router: Rc<dyn Router>,
}

impl ResolveInlineLinkAndSeeTags {
    pub fn new(router: Rc<dyn Router>) -> Self {
        Self { router }
    }

    fn resolve_links(
        &self,
        description: &str,
        elements: &Index<String, Element>,
        context: &Context,
    ) -> String {
        INLINE_LINK_RE
            .replace_all(description, |captures: &Captures<'_>| {
                self.render(&captures[2], elements, context)
            })
            .into_owned()
    }

    fn render(&self, body: &str, elements: &Index<String, Element>, context: &Context) -> String {
        let body = body.trim();
        let (link, label) = match body.split_once(char::is_whitespace) {
            Some((link, label)) => (link, label.trim()),
            None => (body, ""),
        };

        if URL_RE.is_match(link) {
            return markdown_link(if label.is_empty() { link } else { label }, link);
        }

        match lookup(elements, link, context) {
            Lookup::Found(element) => {
                let fqsen = element
                    .fqsen()
                    .map_or_else(|| context.resolve(link), |fqsen| fqsen.as_string());
                match self.router.generate(&Node::from(&element)) {
                    Some(url) => {
                        let label = if label.is_empty() { fqsen.as_str() } else { label };
                        markdown_link(label, &format!("..{url}"))
                    }
                    None => fqsen,
                }
            }
            Lookup::Missing(resolved) => {
                debug!(reference:% = resolved; "Inline link target not found");
                resolved
            }
        }
    }
}

fn markdown_link(label: &str, url: &str) -> String {
    format!("[{label}]({url})")
}

impl CompilerPass for ResolveInlineLinkAndSeeTags {
    fn description(&self) -> &'static str {
        "Resolve @link and @see tags in descriptions"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let elements = &project.indexes().elements;
        let mut count = 0;

        for element in elements.values() {
            let description = element.with_base(|base| base.description().to_string());
            if !INLINE_LINK_RE.is_match(&description) {
                continue;
            }

            let context = Context::of(element);
            let resolved = self.resolve_links(&description, elements, &context);
            element.with_base_mut(|base| base.set_description(resolved));
            count += 1;
        }

        info!(elements = count; "Resolved inline links");
        Ok(())
    }
}
