//! Integration tests compiling reflected projects end to end.

use std::rc::Rc;

use proptest::prelude::*;

use folio::{
    DocumentationBuilder, FolioError,
    config::AppConfig,
    descriptor::{
        ClassDescriptor, Descriptor, DescriptorKind, DocumentationSet, Element,
        NamespaceDescriptor, ProjectDescriptor,
    },
    reference::Shared,
    reflection::{self, DocBlock, Tag},
    router::{Node, Router, Rule},
};

fn compile(json: &str) -> ProjectDescriptor {
    DocumentationBuilder::default()
        .build_from_json(json)
        .expect("Failed to compile project")
}

fn class(project: &ProjectDescriptor, fqsen: &str) -> Shared<ClassDescriptor> {
    Rc::clone(
        project
            .indexes()
            .classes
            .get(&fqsen.to_string())
            .unwrap_or_else(|| panic!("{fqsen} is not indexed")),
    )
}

fn namespace(project: &ProjectDescriptor, fqsen: &str) -> Shared<NamespaceDescriptor> {
    Rc::clone(
        project
            .indexes()
            .namespaces
            .get(&fqsen.to_string())
            .unwrap_or_else(|| panic!("{fqsen} is not a namespace")),
    )
}

fn description(project: &ProjectDescriptor, fqsen: &str) -> String {
    class(project, fqsen).borrow().base().description().to_string()
}

const TWO_FILES: &str = r#"{
    "files": [
        { "path": "src/Foo.php", "classes": [{ "fqsen": "\\NS\\Foo", "parent": "\\NS\\Bar" }] },
        { "path": "src/Bar.php", "classes": [{ "fqsen": "\\NS\\Bar" }] }
    ]
}"#;

#[test]
fn test_parent_across_files() {
    let project = compile(TWO_FILES);

    let foo = class(&project, "\\NS\\Foo");
    let bar = class(&project, "\\NS\\Bar");
    assert!(foo.borrow().parent().unwrap().points_to(&bar));

    let ns = namespace(&project, "\\NS");
    assert_eq!(ns.borrow().elements().classes.len(), 2);
    let root_children: Vec<String> = project
        .namespace()
        .borrow()
        .children()
        .keys()
        .cloned()
        .collect();
    assert_eq!(root_children, vec!["NS"]);
}

#[test]
fn test_orphan_parent_is_counted() {
    let project = compile(
        r#"{ "files": [{ "path": "Orphan.php",
              "classes": [{ "fqsen": "\\NS\\Orphan", "parent": "\\External\\Unknown" }] }] }"#,
    );

    let orphan = class(&project, "\\NS\\Orphan");
    assert!(!orphan.borrow().parent().unwrap().is_resolved());

    let report = DocumentationBuilder::default().analyze(&project);
    assert_eq!(report.unresolved_parent_classes(), 1);
    assert_eq!(report.elements(DescriptorKind::Class), 1);
}

#[test]
fn test_namespace_ancestors_are_synthesised() {
    let project = compile(
        r#"{ "files": [{ "path": "Thing.php", "classes": [{ "fqsen": "\\A\\B\\C\\Thing" }] }] }"#,
    );

    for key in ["\\A", "\\A\\B", "\\A\\B\\C"] {
        let node = namespace(&project, key);
        assert!(node.borrow().parent().is_some(), "{key} has no parent");
        assert!(
            project.indexes().elements.contains_key(&format!("~{key}")),
            "{key} is not registered in elements"
        );
    }
    let c = namespace(&project, "\\A\\B\\C");
    assert!(Rc::ptr_eq(
        &c.borrow().parent().unwrap(),
        &namespace(&project, "\\A\\B")
    ));
}

#[test]
fn test_inline_see_round_trip() {
    let project = compile(
        r#"{ "files": [{ "path": "Foo.php", "classes": [
            { "fqsen": "\\NS\\Foo",
              "docblock": { "summary": "Foo.", "description": "Extends {@see Bar} but not {@see Nope}." } },
            { "fqsen": "\\NS\\Bar" }
        ] }] }"#,
    );

    assert_eq!(
        description(&project, "\\NS\\Foo"),
        "Extends [\\NS\\Bar](../classes/NS.Bar.html) but not \\NS\\Nope."
    );
}

struct SinglePageRouter {
    rules: Vec<Rule>,
}

impl Router for SinglePageRouter {
    fn match_rule(&self, node: &Node<'_>) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(node))
    }
}

#[test]
fn test_custom_router_shapes_links() {
    let router = SinglePageRouter {
        rules: vec![Rule::new(
            "everything",
            |_| true,
            |_| Some("/api.html".to_string()),
        )],
    };
    let builder = DocumentationBuilder::default().with_router(Rc::new(router));

    let project = builder
        .build_from_json(
            r#"{ "files": [{ "path": "Foo.php", "classes": [
                { "fqsen": "\\NS\\Foo", "docblock": { "description": "See {@see Bar the bar}." } },
                { "fqsen": "\\NS\\Bar" }
            ] }] }"#,
        )
        .expect("Failed to compile project");

    assert_eq!(
        description(&project, "\\NS\\Foo"),
        "See [the bar](../api.html)."
    );
}

#[test]
fn test_uses_creates_used_by() {
    let project = compile(
        r#"{ "files": [{ "path": "Foo.php", "classes": [
            { "fqsen": "\\NS\\Foo", "docblock": { "tags": [{ "name": "uses", "body": "Bar" }] } },
            { "fqsen": "\\NS\\Bar" }
        ] }] }"#,
    );

    let bar = Element::from(class(&project, "\\NS\\Bar"));
    let foo = Element::from(class(&project, "\\NS\\Foo"));
    let used_by: Vec<Element> = bar.with_base(|base| {
        base.tags()
            .get("used-by")
            .iter()
            .filter_map(|tag| tag.target()?.element())
            .collect()
    });
    assert_eq!(used_by.len(), 1);
    assert!(used_by[0].ptr_eq(&foo));
}

#[test]
fn test_property_key_uses_dollar() {
    let project = compile(
        r#"{ "files": [{ "path": "Foo.php", "classes": [{
            "fqsen": "\\NS\\Foo",
            "properties": [{ "fqsen": "\\NS\\Foo::$name" }]
        }] }] }"#,
    );

    let elements = &project.indexes().elements;
    assert!(elements.contains_key(&"\\NS\\Foo::$name".to_string()));
    assert!(!elements.contains_key(&"\\NS\\Foo::name".to_string()));
}

#[test]
fn test_markers_from_tags_and_comments() {
    let project = compile(
        r#"{ "files": [{
            "path": "Foo.php",
            "source": "<?php\n// FIXME: leaks memory\nclass Foo {}\n",
            "classes": [{ "fqsen": "\\Foo", "line": 3,
                          "docblock": { "tags": [{ "name": "todo", "body": "rename" }] } }]
        }] }"#,
    );

    let file = project.files().get(&"Foo.php".to_string()).unwrap().borrow();
    let markers: Vec<(String, String, usize)> = file
        .markers()
        .iter()
        .map(|marker| {
            (
                marker.kind().to_string(),
                marker.message().to_string(),
                marker.line(),
            )
        })
        .collect();
    assert_eq!(
        markers,
        vec![
            ("TODO".to_string(), "rename".to_string(), 3),
            ("FIXME".to_string(), "leaks memory".to_string(), 2),
        ]
    );
    assert!(file.source().is_none(), "sources are not published by default");
}

#[test]
fn test_api_tables_of_contents() {
    let project = compile(
        r#"{ "files": [{
            "path": "Foo.php",
            "docblock": { "tags": [{ "name": "package", "body": "Shop" }] },
            "classes": [{ "fqsen": "\\App\\Foo" }]
        }] }"#,
    );

    let version = &project.versions()[0];
    let DocumentationSet::Api(api) = &version.documentation_sets()[0] else {
        panic!("expected the default api set first");
    };
    let namespaces = api.tocs().get(&"Namespaces".to_string()).unwrap();
    let packages = api.tocs().get(&"Packages".to_string()).unwrap();
    assert_eq!(namespaces.entry(namespaces.roots()[0]).url(), "namespaces/app.html");
    assert_eq!(packages.entry(packages.roots()[0]).title(), "\\Shop");
}

#[test]
fn test_untitled_guide_index_compiles() {
    let project = compile(r#"{ "guides": [{ "name": "guide", "documents": [{ "file": "index" }] }] }"#);

    let guide = project.versions()[0]
        .documentation_sets()
        .iter()
        .find_map(|set| match set {
            DocumentationSet::Guide(guide) => Some(guide),
            DocumentationSet::Api(_) => None,
        })
        .expect("guide set is missing");
    assert!(guide.tocs().contains_key(&"index".to_string()));
}

#[test]
fn test_recompiling_is_idempotent() {
    let builder = DocumentationBuilder::default();
    let json = r#"{ "files": [{
        "path": "Foo.php",
        "source": "<?php // TODO: later\n",
        "classes": [
            { "fqsen": "\\NS\\Foo", "parent": "\\NS\\Bar",
              "docblock": { "tags": [{ "name": "uses", "body": "Bar" }, { "name": "todo", "body": "x" }] } },
            { "fqsen": "\\NS\\Bar" }
        ]
    }] }"#;
    let mut project = builder.build_from_json(json).unwrap();
    let first = builder.analyze(&project);
    let parent = class(&project, "\\NS\\Foo").borrow().parent().unwrap().target();

    builder.compile(&mut project).unwrap();

    assert_eq!(builder.analyze(&project), first);
    let again = class(&project, "\\NS\\Foo").borrow().parent().unwrap().target();
    assert!(Rc::ptr_eq(&parent.unwrap(), &again.unwrap()));
    let bar = class(&project, "\\NS\\Bar");
    assert_eq!(bar.borrow().base().tags().get("used-by").len(), 1);
    assert_eq!(namespace(&project, "\\NS").borrow().elements().classes.len(), 2);
    let file = project.files().get(&"Foo.php".to_string()).unwrap().borrow();
    assert_eq!(file.markers().len(), 2);
}

#[test]
fn test_malformed_json_is_an_input_error() {
    let result = DocumentationBuilder::default().build_from_json("{ not json");
    assert!(matches!(result, Err(FolioError::Input(_))));
}

#[test]
fn test_configured_project_name_wins() {
    let config: AppConfig = toml::from_str(
        r#"
        [project]
        name = "Configured"
        "#,
    )
    .unwrap();

    let project = DocumentationBuilder::new(config)
        .build_from_json(r#"{ "name": "Reflected" }"#)
        .unwrap();

    assert_eq!(project.name(), "Configured");
}

fn packaged_project(package: &str) -> reflection::Project {
    reflection::Project {
        files: vec![reflection::File {
            path: "a.php".to_string(),
            classes: vec![reflection::Class {
                fqsen: "\\App\\Thing".to_string(),
                docblock: Some(DocBlock {
                    tags: vec![Tag::new("package", package)],
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn test_legacy_package_names() {
    let builder = DocumentationBuilder::default();
    let mut project = builder.build(&packaged_project("My[Package]")).unwrap();
    builder.compile(&mut project).unwrap();

    assert!(
        project
            .indexes()
            .packages
            .contains_key(&"\\My\\Package".to_string())
    );
}

proptest! {
    #[test]
    fn test_any_package_name_compiles(package in "\\PC{0,24}") {
        let builder = DocumentationBuilder::default();
        let mut project = builder.build(&packaged_project(&package)).unwrap();
        prop_assert!(builder.compile(&mut project).is_ok());
        prop_assert!(project.indexes().packages.contains_key(&"\\".to_string()));
    }
}
