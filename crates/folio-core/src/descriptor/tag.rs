//! Docblock tags.

use std::fmt;

use indexmap::IndexMap;

use crate::descriptor::{Element, WeakElement};

/// The element a reference-carrying tag (`@uses`, `@used-by`, `@see`,
/// `@covers`) points at.
#[derive(Clone)]
pub enum TagTarget {
    /// The reference as written in the docblock.
    Unresolved(String),
    /// The element the reference was resolved to.
    Resolved(WeakElement),
}

impl TagTarget {
    /// Returns the live element for a resolved target.
    pub fn element(&self) -> Option<Element> {
        match self {
            TagTarget::Unresolved(_) => None,
            TagTarget::Resolved(element) => element.upgrade(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TagTarget::Resolved(_))
    }
}

impl fmt::Debug for TagTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagTarget::Unresolved(text) => f.debug_tuple("Unresolved").field(text).finish(),
            TagTarget::Resolved(element) => f.debug_tuple("Resolved").field(element).finish(),
        }
    }
}

/// Payload of a tag, depending on its name.
#[derive(Debug, Clone)]
pub enum TagKind {
    /// Any tag without structured content (`@todo`, `@api`, `@package`, ...).
    Generic,
    /// `@uses`, `@used-by`, `@see`, `@covers` pointing at an element.
    Reference { target: TagTarget },
    /// `@link` or `@see` pointing at a URL.
    Link { url: String },
    /// `@return`.
    Return { types: String },
    /// `@param`.
    Param { variable: String, types: String },
    /// `@var`.
    Var {
        variable: Option<String>,
        types: String,
    },
    /// `@method` declaring a magic method.
    Method {
        method_name: String,
        arguments: Vec<String>,
        return_type: String,
        is_static: bool,
    },
    /// `@example` referring to an example file.
    Example { location: ExampleLocation },
}

/// Location of an example, as written in `@example` tags:
/// `path[:start[,length]] [description]`.
///
/// # Examples
///
/// ```
/// use folio_core::descriptor::ExampleLocation;
///
/// let location = ExampleLocation::parse("demo/client.php:10,5 Creating a client");
/// assert_eq!(location.file(), "demo/client.php");
/// assert_eq!(location.start(), Some(10));
/// assert_eq!(location.length(), Some(5));
/// assert_eq!(location.description(), "Creating a client");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleLocation {
    file: String,
    start: Option<usize>,
    length: Option<usize>,
    description: String,
}

impl ExampleLocation {
    /// Parses the body of an example tag.
    pub fn parse(body: &str) -> Self {
        let body = body.trim();
        let (location, description) = match body.split_once(char::is_whitespace) {
            Some((location, description)) => (location, description.trim()),
            None => (body, ""),
        };

        let mut parsed = Self {
            file: location.to_string(),
            description: description.to_string(),
            ..Self::default()
        };

        if let Some((file, range)) = location.rsplit_once(':') {
            let (start, length) = match range.split_once(',') {
                Some((start, length)) => (start, Some(length)),
                None => (range, None),
            };
            if let Ok(start) = start.parse() {
                parsed.file = file.to_string();
                parsed.start = Some(start);
                parsed.length = length.and_then(|length| length.parse().ok());
            }
        }

        parsed
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// First line of the excerpt, starting at 1.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Number of lines of the excerpt.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A single docblock tag.
#[derive(Debug, Clone)]
pub struct TagDescriptor {
    name: String,
    description: String,
    kind: TagKind,
}

impl TagDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: TagKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }

    /// Creates a tag without structured payload.
    pub fn generic(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, TagKind::Generic)
    }

    /// The tag name without the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn kind(&self) -> &TagKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut TagKind {
        &mut self.kind
    }

    /// The target of a reference-carrying tag.
    pub fn target(&self) -> Option<&TagTarget> {
        match &self.kind {
            TagKind::Reference { target } => Some(target),
            _ => None,
        }
    }
}

/// Tags of one element grouped by name, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TagCollection {
    tags: IndexMap<String, Vec<TagDescriptor>>,
}

impl TagCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: TagDescriptor) {
        self.tags.entry(tag.name.clone()).or_default().push(tag);
    }

    /// All tags with the given name; empty when there are none.
    pub fn get(&self, name: &str) -> &[TagDescriptor] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<TagDescriptor>> {
        self.tags.get_mut(name)
    }

    pub fn first(&self, name: &str) -> Option<&TagDescriptor> {
        self.get(name).first()
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    pub fn remove(&mut self, name: &str) -> Vec<TagDescriptor> {
        self.tags.shift_remove(name).unwrap_or_default()
    }

    /// Iterates over tag names and their tags.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<TagDescriptor>)> {
        self.tags.iter()
    }

    /// Iterates over every tag regardless of its name.
    pub fn all(&self) -> impl Iterator<Item = &TagDescriptor> {
        self.tags.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_grouped_by_name() {
        let mut tags = TagCollection::new();
        tags.add(TagDescriptor::generic("todo", "first"));
        tags.add(TagDescriptor::generic("api", ""));
        tags.add(TagDescriptor::generic("todo", "second"));

        let todos: Vec<_> = tags.get("todo").iter().map(|t| t.description()).collect();
        assert_eq!(todos, vec!["first", "second"]);
        assert!(tags.contains("api"));
        assert!(tags.get("missing").is_empty());
    }

    #[test]
    fn test_remove_returns_tags() {
        let mut tags = TagCollection::new();
        tags.add(TagDescriptor::generic("package", "App"));

        assert_eq!(tags.remove("package").len(), 1);
        assert!(!tags.contains("package"));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_example_location_without_range() {
        let location = ExampleLocation::parse("example.php");
        assert_eq!(location.file(), "example.php");
        assert_eq!(location.start(), None);
        assert_eq!(location.description(), "");
    }

    #[test]
    fn test_example_location_with_start_only() {
        let location = ExampleLocation::parse("example.php:3 first lines");
        assert_eq!(location.start(), Some(3));
        assert_eq!(location.length(), None);
        assert_eq!(location.description(), "first lines");
    }

    #[test]
    fn test_reference_target() {
        let tag = TagDescriptor::new(
            "uses",
            "",
            TagKind::Reference {
                target: TagTarget::Unresolved("\\Foo".to_string()),
            },
        );

        let target = tag.target().unwrap();
        assert!(!target.is_resolved());
        assert!(target.element().is_none());
    }
}
