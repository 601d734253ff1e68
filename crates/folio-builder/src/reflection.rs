//! Reflected source code, as produced by a PHP reflection parser.
//!
//! These types are the input of the builder. They mirror the code base file
//! by file and carry names as plain strings; nothing is cross-referenced
//! yet. All types implement [`serde::Deserialize`] so a reflected project
//! can be loaded from JSON.
//!
//! # Example
//!
//! ```
//! # use folio_builder::reflection::Project;
//! let json = r#"{
//!     "name": "Demo",
//!     "files": [{
//!         "path": "src/Foo.php",
//!         "classes": [{ "fqsen": "\\App\\Foo", "line": 3, "parent": "\\App\\Bar" }]
//!     }]
//! }"#;
//!
//! let project: Project = serde_json::from_str(json).unwrap();
//! assert_eq!(project.files[0].classes[0].parent.as_deref(), Some("\\App\\Bar"));
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use folio_core::descriptor::Visibility;

/// A reflected project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: Option<String>,
    pub files: Vec<File>,
    pub namespaces: Vec<Namespace>,
    pub guides: Vec<Guide>,
}

/// A parsed docblock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocBlock {
    pub summary: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

/// A docblock tag: `@name body`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
    pub body: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct File {
    pub path: String,
    pub hash: String,
    pub source: Option<String>,
    pub docblock: Option<DocBlock>,
    /// `use` imports: alias → imported name.
    pub namespace_aliases: IndexMap<String, String>,
    pub includes: Vec<String>,
    pub constants: Vec<Constant>,
    pub functions: Vec<Function>,
    pub classes: Vec<Class>,
    pub interfaces: Vec<Interface>,
    pub traits: Vec<Trait>,
    pub enums: Vec<Enum>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Namespace {
    pub fqsen: String,
    pub docblock: Option<DocBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Class {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
    pub used_traits: Vec<String>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
    pub constants: Vec<Constant>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub parents: Vec<String>,
    pub constants: Vec<Constant>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Trait {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub used_traits: Vec<String>,
    pub constants: Vec<Constant>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Enum {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub backed_type: Option<String>,
    pub interfaces: Vec<String>,
    pub used_traits: Vec<String>,
    pub cases: Vec<EnumCase>,
    pub constants: Vec<Constant>,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumCase {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Constant {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub value: String,
    /// Set for class constants only.
    pub visibility: Option<Visibility>,
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Function {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub arguments: Vec<Argument>,
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Method {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub arguments: Vec<Argument>,
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Property {
    pub fqsen: String,
    pub line: usize,
    pub docblock: Option<DocBlock>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub types: Option<String>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Argument {
    pub name: String,
    pub types: Option<String>,
    pub default: Option<String>,
    pub by_reference: bool,
    pub variadic: bool,
}

/// A set of guide documents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Guide {
    pub name: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Path relative to the guide root, without extension.
    pub file: String,
    pub title: String,
    /// Each entry lists the documents of one toc directive.
    pub tocs: Vec<Vec<String>>,
}
