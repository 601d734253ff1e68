//! Resolution of textual element references.
//!
//! Docblocks refer to other elements the way PHP code does: relative to the
//! current namespace, through `use` imports, or with `self`/`$this`. A
//! [`Context`] captures that environment for one element; [`lookup`] turns a
//! reference into an FQSEN and finds it in the `elements` index.

use indexmap::IndexMap;

use folio_core::{
    collection::Index,
    descriptor::{DescriptorKind, Element},
    fqsen::{Fqsen, MEMBER_SEPARATOR, NAMESPACE_SEPARATOR},
};

/// Placeholder for "the element being documented" in references such as
/// `@context::helper()`.
pub const CONTEXT_MARKER: &str = "@context";

const PSEUDO_TYPES: [&str; 2] = ["self", "$this"];

/// The naming environment of an element.
#[derive(Debug, Clone)]
pub struct Context {
    namespace: Fqsen,
    aliases: IndexMap<String, Fqsen>,
    container: Option<Fqsen>,
}

impl Context {
    pub fn new(namespace: Fqsen, aliases: IndexMap<String, Fqsen>, container: Option<Fqsen>) -> Self {
        Self {
            namespace,
            aliases,
            container,
        }
    }

    /// The context of `element`: its namespace, the imports of its file and,
    /// for class-likes and their members, the class-like itself.
    pub fn of(element: &Element) -> Self {
        let aliases = element
            .file()
            .map(|file| file.borrow().namespace_aliases().clone())
            .unwrap_or_default();

        let Some(fqsen) = element.fqsen() else {
            return Self::new(Fqsen::root(), aliases, None);
        };

        let (namespace, container) = match element.kind() {
            DescriptorKind::Namespace => (fqsen, None),
            DescriptorKind::Class
            | DescriptorKind::Interface
            | DescriptorKind::Trait
            | DescriptorKind::Enum => (fqsen.namespace(), Some(fqsen)),
            _ if fqsen.is_member() => (fqsen.namespace(), Some(fqsen.container())),
            _ => (fqsen.namespace(), None),
        };
        Self::new(namespace, aliases, container)
    }

    pub fn namespace(&self) -> Fqsen {
        self.namespace
    }

    pub fn container(&self) -> Option<Fqsen> {
        self.container
    }

    /// Expands `reference` into a fully qualified name.
    ///
    /// References containing [`CONTEXT_MARKER`] are returned unchanged; see
    /// [`lookup`] for how they are resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::resolver::Context;
    /// use folio_core::fqsen::Fqsen;
    ///
    /// let mut aliases = indexmap::IndexMap::new();
    /// aliases.insert("Client".to_string(), Fqsen::new("\\Http\\Client").unwrap());
    /// let context = Context::new(Fqsen::new("\\App").unwrap(), aliases, None);
    ///
    /// assert_eq!(context.resolve("User"), "\\App\\User");
    /// assert_eq!(context.resolve("Client::send()"), "\\Http\\Client::send()");
    /// assert_eq!(context.resolve("\\Other"), "\\Other");
    /// ```
    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.starts_with(NAMESPACE_SEPARATOR) || reference.contains(CONTEXT_MARKER) {
            return reference.to_string();
        }

        if let Some(container) = self.container {
            for pseudo in PSEUDO_TYPES {
                if reference == pseudo {
                    return container.as_string();
                }
                if let Some(member) = reference
                    .strip_prefix(pseudo)
                    .and_then(|rest| rest.strip_prefix(MEMBER_SEPARATOR))
                {
                    return format!("{container}{MEMBER_SEPARATOR}{member}");
                }
            }
        }

        let split = reference
            .find([NAMESPACE_SEPARATOR, ':'])
            .unwrap_or(reference.len());
        let (head, rest) = reference.split_at(split);
        if let Some(alias) = self.aliases.get(head) {
            return format!("{alias}{rest}");
        }

        if self.namespace.is_root() {
            format!("{NAMESPACE_SEPARATOR}{reference}")
        } else {
            format!("{}{NAMESPACE_SEPARATOR}{reference}", self.namespace)
        }
    }
}

/// Outcome of a [`lookup`].
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(Element),
    /// No element is indexed under the resolved name.
    Missing(String),
}

impl Lookup {
    pub fn element(&self) -> Option<&Element> {
        match self {
            Lookup::Found(element) => Some(element),
            Lookup::Missing(_) => None,
        }
    }
}

/// Resolves `reference` against `context` and finds it in `elements`.
///
/// A reference containing `@context::` is tried as a member of the context
/// class-like, then in the context namespace, then in the global namespace.
/// When none exists the namespace variant is reported as missing.
pub fn lookup(elements: &Index<String, Element>, reference: &str, context: &Context) -> Lookup {
    let resolved = context.resolve(reference);
    let marker = format!("{CONTEXT_MARKER}{MEMBER_SEPARATOR}");
    if !resolved.contains(&marker) {
        return find(elements, resolved);
    }

    let mut candidates = Vec::with_capacity(3);
    if let Some(container) = context.container {
        candidates.push(resolved.replace(&marker, &format!("{container}{MEMBER_SEPARATOR}")));
    }
    let namespace_prefix = if context.namespace.is_root() {
        NAMESPACE_SEPARATOR.to_string()
    } else {
        format!("{}{NAMESPACE_SEPARATOR}", context.namespace)
    };
    let in_namespace = resolved.replace(&marker, &namespace_prefix);
    candidates.push(in_namespace.clone());
    candidates.push(resolved.replace(&marker, &NAMESPACE_SEPARATOR.to_string()));

    candidates
        .iter()
        .find_map(|candidate| elements.get(candidate).cloned())
        .map_or(Lookup::Missing(in_namespace), Lookup::Found)
}

fn find(elements: &Index<String, Element>, resolved: String) -> Lookup {
    if let Some(element) = elements.get(&resolved) {
        return Lookup::Found(element.clone());
    }
    // Namespaces are indexed under `~\Name`.
    if !resolved.contains(MEMBER_SEPARATOR) {
        if let Some(namespace) = elements.get(&format!("~{resolved}")) {
            return Lookup::Found(namespace.clone());
        }
    }
    Lookup::Missing(resolved)
}
