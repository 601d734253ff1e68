//! Narrative documentation: guide documents and tables of contents.

use std::fmt;

use crate::collection::{Index, InvalidKeyError};

/// A guide document.
#[derive(Debug, Clone, Default)]
pub struct DocumentDescriptor {
    file: String,
    title: String,
    tocs: Vec<TocDirective>,
}

impl DocumentDescriptor {
    /// Creates a document for `file`, a path relative to the guide root
    /// without extension (e.g. `getting-started/installing`).
    pub fn new(file: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
            tocs: Vec::new(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The `toctree`-like directives found in the document.
    pub fn tocs(&self) -> &[TocDirective] {
        &self.tocs
    }

    pub fn add_toc(&mut self, toc: TocDirective) {
        self.tocs.push(toc);
    }
}

/// A list of documents a document links to as its sub-sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocDirective {
    files: Vec<String>,
}

impl TocDirective {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

/// Position of an [`Entry`] inside its [`TocDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of a table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    url: String,
    title: String,
    parent: Option<EntryId>,
    children: Vec<EntryId>,
}

impl Entry {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn children(&self) -> &[EntryId] {
        &self.children
    }
}

/// A named table of contents: a forest of [`Entry`] nodes.
///
/// # Examples
///
/// ```
/// use folio_core::descriptor::TocDescriptor;
///
/// let mut toc = TocDescriptor::new("Namespaces");
/// let app = toc.add_entry("namespaces/app.html", "\\App", None);
/// let model = toc.add_entry("namespaces/app.model.html", "\\App\\Model", Some(app));
///
/// assert_eq!(toc.roots(), vec![app]);
/// assert_eq!(toc.entry(app).children(), &[model]);
/// assert_eq!(toc.entry(model).parent(), Some(app));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TocDescriptor {
    name: String,
    entries: Vec<Entry>,
}

impl TocDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an entry, attaching it to `parent` when given.
    pub fn add_entry(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        parent: Option<EntryId>,
    ) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries.push(Entry {
            url: url.into(),
            title: title.into(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.entries[parent.0].children.push(id);
        }
        id
    }

    /// Returns the entry for `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` was not produced by this table of contents.
    pub fn entry(&self, id: EntryId) -> &Entry {
        &self.entries[id.0]
    }

    /// Finds an entry by URL.
    pub fn find(&self, url: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|entry| entry.url == url)
            .map(EntryId)
    }

    /// Entries without a parent, in insertion order.
    pub fn roots(&self) -> Vec<EntryId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(position, _)| EntryId(position))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (EntryId(position), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tables of contents of a documentation set, keyed by name.
pub type Tocs = Index<String, TocDescriptor>;

/// Stores `toc` under its own name, replacing a previous one.
///
/// # Errors
///
/// Returns [`InvalidKeyError`] for a toc without a name.
pub fn store_toc(tocs: &mut Tocs, toc: TocDescriptor) -> Result<(), InvalidKeyError> {
    tocs.set(toc.name().to_string(), toc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forest_with_two_roots() {
        let mut toc = TocDescriptor::new("Packages");
        let a = toc.add_entry("packages/a.html", "\\A", None);
        let b = toc.add_entry("packages/b.html", "\\B", None);
        let a_child = toc.add_entry("packages/a.c.html", "\\A\\C", Some(a));

        assert_eq!(toc.roots(), vec![a, b]);
        assert_eq!(toc.find("packages/a.c.html"), Some(a_child));
        assert_eq!(toc.len(), 3);
    }

    #[test]
    fn test_store_toc_replaces_by_name() {
        let mut tocs = Tocs::new();
        store_toc(&mut tocs, TocDescriptor::new("Namespaces")).unwrap();
        let mut second = TocDescriptor::new("Namespaces");
        second.add_entry("namespaces/a.html", "\\A", None);
        store_toc(&mut tocs, second).unwrap();

        assert_eq!(tocs.len(), 1);
        assert_eq!(tocs.get(&"Namespaces".to_string()).unwrap().len(), 1);
        assert!(store_toc(&mut tocs, TocDescriptor::new("")).is_err());
    }

    #[test]
    fn test_document_tocs() {
        let mut document = DocumentDescriptor::new("index", "Welcome");
        document.add_toc(TocDirective::new(vec!["installing".to_string()]));

        assert_eq!(document.title(), "Welcome");
        assert_eq!(document.tocs()[0].files(), &["installing".to_string()]);
    }
}
