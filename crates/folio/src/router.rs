//! Canonical URLs of documentation nodes.
//!
//! A [`Router`] is an ordered list of [`Rule`]s. The first rule whose matcher
//! accepts a node produces its URL. URLs are absolute within the generated
//! documentation (they start with `/`).

use folio_core::{
    descriptor::{DocumentDescriptor, Element},
    fqsen::{Fqsen, MEMBER_SEPARATOR, NAMESPACE_SEPARATOR},
};

/// Something a URL can be generated for.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Element(&'a Element),
    Document(&'a DocumentDescriptor),
    /// A link to an external page; routed to itself.
    Url(&'a str),
}

impl<'a> From<&'a Element> for Node<'a> {
    fn from(element: &'a Element) -> Self {
        Node::Element(element)
    }
}

impl<'a> From<&'a DocumentDescriptor> for Node<'a> {
    fn from(document: &'a DocumentDescriptor) -> Self {
        Node::Document(document)
    }
}

/// A routing rule: `matcher` selects the nodes `generator` builds URLs for.
#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    matcher: fn(&Node<'_>) -> bool,
    generator: fn(&Node<'_>) -> Option<String>,
}

impl Rule {
    pub fn new(
        name: &'static str,
        matcher: fn(&Node<'_>) -> bool,
        generator: fn(&Node<'_>) -> Option<String>,
    ) -> Self {
        Self {
            name,
            matcher,
            generator,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, node: &Node<'_>) -> bool {
        (self.matcher)(node)
    }

    /// Builds the URL of `node`; `None` when the node has no page.
    pub fn generate(&self, node: &Node<'_>) -> Option<String> {
        (self.generator)(node)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Produces canonical URLs for nodes.
pub trait Router {
    /// The first rule matching `node`.
    fn match_rule(&self, node: &Node<'_>) -> Option<&Rule>;

    /// The URL of `node`, if a rule matches and produces one.
    fn generate(&self, node: &Node<'_>) -> Option<String> {
        self.match_rule(node).and_then(|rule| rule.generate(node))
    }
}

/// The router used for HTML output.
///
/// | Node                          | URL                                   |
/// |-------------------------------|---------------------------------------|
/// | file `src/A/B.php`            | `/files/src.A.B.php.html`             |
/// | namespace `\A\B`              | `/namespaces/a.b.html`                |
/// | package `\A\B`                | `/packages/a.b.html`                  |
/// | class-like `\A\B`             | `/classes/A.B.html`                   |
/// | member `\A\B::run()`          | `/classes/A.B.html#method_run`        |
/// | function `\A\f()`             | `/namespaces/a.html#function_f`       |
/// | document `guide/install`      | `/guide/install.html`                 |
///
/// # Examples
///
/// ```
/// use folio::router::{Node, Router, StandardRouter};
///
/// let router = StandardRouter::new();
/// assert_eq!(
///     router.generate(&Node::Url("https://example.com")).as_deref(),
///     Some("https://example.com")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StandardRouter {
    rules: Vec<Rule>,
}

impl Default for StandardRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardRouter {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Rule::new("file", is_kind::<FILE>, file_url),
                Rule::new("namespace", is_kind::<NAMESPACE>, namespace_url),
                Rule::new("package", is_kind::<PACKAGE>, package_url),
                Rule::new("class", is_kind::<CLASS_LIKE>, class_url),
                Rule::new("member", is_member, member_url),
                Rule::new("namespaced", is_kind::<NAMESPACED>, namespaced_url),
                Rule::new("document", is_document, document_url),
                Rule::new("url", is_url, url),
            ],
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Router for StandardRouter {
    fn match_rule(&self, node: &Node<'_>) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(node))
    }
}

const FILE: u8 = 0;
const NAMESPACE: u8 = 1;
const PACKAGE: u8 = 2;
const CLASS_LIKE: u8 = 3;
const NAMESPACED: u8 = 4;

fn is_kind<const GROUP: u8>(node: &Node<'_>) -> bool {
    let Node::Element(element) = node else {
        return false;
    };
    let group = match element {
        Element::File(_) => FILE,
        Element::Namespace(_) => NAMESPACE,
        Element::Package(_) => PACKAGE,
        Element::Class(_) | Element::Interface(_) | Element::Trait(_) | Element::Enum(_) => {
            CLASS_LIKE
        }
        Element::Function(_) | Element::Constant(_) if !is_member(node) => NAMESPACED,
        _ => return false,
    };
    group == GROUP
}

fn is_member(node: &Node<'_>) -> bool {
    match node {
        Node::Element(element) => element.fqsen().is_some_and(|fqsen| fqsen.is_member()),
        _ => false,
    }
}

fn is_document(node: &Node<'_>) -> bool {
    matches!(node, Node::Document(_))
}

fn is_url(node: &Node<'_>) -> bool {
    matches!(node, Node::Url(_))
}

fn element_fqsen(node: &Node<'_>) -> Option<Fqsen> {
    match node {
        Node::Element(element) => element.fqsen(),
        _ => None,
    }
}

fn file_url(node: &Node<'_>) -> Option<String> {
    let Node::Element(element) = node else {
        return None;
    };
    let path = element.with_base(|base| base.path().to_string());
    let path = path.trim_start_matches('/').replace(['/', '\\'], ".");
    Some(format!("/files/{path}.html"))
}

fn namespace_url(node: &Node<'_>) -> Option<String> {
    element_fqsen(node).map(|fqsen| format!("/namespaces/{}.html", slug(&fqsen)))
}

fn package_url(node: &Node<'_>) -> Option<String> {
    element_fqsen(node).map(|fqsen| format!("/packages/{}.html", slug(&fqsen)))
}

fn class_url(node: &Node<'_>) -> Option<String> {
    element_fqsen(node).map(|fqsen| format!("/classes/{}.html", dotted(&fqsen)))
}

fn member_url(node: &Node<'_>) -> Option<String> {
    let Node::Element(element) = node else {
        return None;
    };
    let fqsen = element.fqsen()?;
    let prefix = match element {
        Element::Method(_) => "method",
        Element::Property(_) => "property",
        Element::Constant(_) => "constant",
        Element::EnumCase(_) => "case",
        _ => return None,
    };
    Some(format!(
        "/classes/{}.html#{prefix}_{}",
        dotted(&fqsen.container()),
        fqsen.name()
    ))
}

fn namespaced_url(node: &Node<'_>) -> Option<String> {
    let Node::Element(element) = node else {
        return None;
    };
    let fqsen = element.fqsen()?;
    let prefix = match element {
        Element::Function(_) => "function",
        Element::Constant(_) => "constant",
        _ => return None,
    };
    Some(format!(
        "/namespaces/{}.html#{prefix}_{}",
        slug(&fqsen.namespace()),
        fqsen.name()
    ))
}

fn document_url(node: &Node<'_>) -> Option<String> {
    let Node::Document(document) = node else {
        return None;
    };
    let file = document.file().trim_start_matches('/');
    let stem = match file.rsplit_once('.') {
        Some((stem, extension)) if !extension.contains('/') => stem,
        _ => file,
    };
    Some(format!("/{stem}.html"))
}

fn url(node: &Node<'_>) -> Option<String> {
    match node {
        Node::Url(url) => Some(url.to_string()),
        _ => None,
    }
}

/// `\A\B` as `A.B`.
fn dotted(fqsen: &Fqsen) -> String {
    let value = fqsen.as_string();
    let container = value.split(MEMBER_SEPARATOR).next().unwrap_or_default();
    container
        .trim_start_matches(NAMESPACE_SEPARATOR)
        .replace(NAMESPACE_SEPARATOR, ".")
}

/// `\A\B` as `a.b`; the root is `default`.
fn slug(fqsen: &Fqsen) -> String {
    if fqsen.is_root() {
        return "default".to_string();
    }
    dotted(fqsen).to_lowercase()
}
