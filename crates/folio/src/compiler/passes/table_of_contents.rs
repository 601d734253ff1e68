use std::rc::Rc;

use log::{error, info, warn};

use folio_core::{
    collection::Index,
    descriptor::{
        Descriptor, DocumentDescriptor, DocumentationSet, Element, EntryId, NamespaceDescriptor,
        PackageDescriptor, ProjectDescriptor, TocDescriptor, store_toc,
    },
    reference::Shared,
};

use crate::{
    compiler::CompilerPass,
    error::CompileError,
    router::{Node, Router},
};

/// The document a guide's table of contents starts from.
const GUIDE_INDEX: &str = "index";

/// Builds the tables of contents of every documentation set.
///
/// API sets get a "Namespaces" and a "Packages" table mirroring the trees.
/// Guide sets get one table named after their `index` document, following
/// the toc directives of each document.
pub struct TableOfContentsBuilder {
    router: Rc<dyn Router>,
}

impl TableOfContentsBuilder {
    pub fn new(router: Rc<dyn Router>) -> Self {
        Self { router }
    }

    fn url(&self, node: Node<'_>) -> String {
        self.router
            .generate(&node)
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string()
    }

    fn tree_toc<T>(&self, name: &str, root: &Shared<T>) -> Option<TocDescriptor>
    where
        T: TreeNode,
        Element: From<Shared<T>>,
    {
        let children = root.borrow().child_nodes();
        if children.is_empty() {
            return None;
        }

        let mut toc = TocDescriptor::new(name);
        let mut pending: Vec<(Shared<T>, Option<EntryId>)> =
            children.into_iter().rev().map(|child| (child, None)).collect();
        while let Some((node, parent)) = pending.pop() {
            let title = node
                .borrow()
                .base()
                .fqsen()
                .map(|fqsen| fqsen.as_string())
                .unwrap_or_default();
            let element = Element::from(Rc::clone(&node));
            let entry = toc.add_entry(self.url(Node::from(&element)), title, parent);
            pending.extend(
                node.borrow()
                    .child_nodes()
                    .into_iter()
                    .rev()
                    .map(|child| (child, Some(entry))),
            );
        }
        Some(toc)
    }

    fn guide_toc(&self, documents: &Index<String, DocumentDescriptor>) -> Option<TocDescriptor> {
        let index = documents.get(&GUIDE_INDEX.to_string())?;
        let name = if index.title().trim().is_empty() {
            GUIDE_INDEX
        } else {
            index.title()
        };
        let mut toc = TocDescriptor::new(name);
        let mut path = vec![index.file().to_string()];
        self.add_guide_entries(index, documents, &mut toc, None, &mut path);
        Some(toc)
    }

    fn add_guide_entries(
        &self,
        document: &DocumentDescriptor,
        documents: &Index<String, DocumentDescriptor>,
        toc: &mut TocDescriptor,
        parent: Option<EntryId>,
        path: &mut Vec<String>,
    ) {
        for directive in document.tocs() {
            for file in directive.files() {
                let key = file.trim_start_matches('/').to_string();
                let Some(child) = documents.get(&key) else {
                    error!(document = file.as_str(); "Toc contains a link to a missing document");
                    continue;
                };
                if path.contains(&key) {
                    warn!(document = key.as_str(); "Toc refers back to a document on its own path, skipping");
                    continue;
                }

                let url = format!("guide/{}", self.url(Node::from(child)));
                let entry = toc.add_entry(url, child.title(), parent);
                path.push(key);
                self.add_guide_entries(child, documents, toc, Some(entry), path);
                path.pop();
            }
        }
    }
}

/// Read access to the children of namespace and package nodes.
trait TreeNode: Descriptor + Sized {
    fn child_nodes(&self) -> Vec<Shared<Self>>;
}

impl TreeNode for NamespaceDescriptor {
    fn child_nodes(&self) -> Vec<Shared<Self>> {
        self.children().values().cloned().collect()
    }
}

impl TreeNode for PackageDescriptor {
    fn child_nodes(&self) -> Vec<Shared<Self>> {
        self.children().values().cloned().collect()
    }
}

impl CompilerPass for TableOfContentsBuilder {
    fn description(&self) -> &'static str {
        "Build tables of contents"
    }

    fn execute(&self, project: &mut ProjectDescriptor) -> Result<(), CompileError> {
        let namespaces = self.tree_toc("Namespaces", &project.namespace());
        let packages = self.tree_toc("Packages", &project.package());

        let mut count = 0;
        for version in project.versions_mut() {
            for set in version.documentation_sets_mut() {
                match set {
                    DocumentationSet::Api(api) => {
                        for toc in [&namespaces, &packages].into_iter().flatten() {
                            store_toc(api.tocs_mut(), toc.clone())?;
                            count += 1;
                        }
                    }
                    DocumentationSet::Guide(guide) => {
                        if let Some(toc) = self.guide_toc(guide.documents()) {
                            store_toc(guide.tocs_mut(), toc)?;
                            count += 1;
                        }
                    }
                }
            }
        }

        info!(tocs = count; "Built tables of contents");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::{
        ApiSetDescriptor, FileDescriptor, GuideSetDescriptor, TocDirective, VersionDescriptor,
    };

    use super::*;
    use crate::{
        compiler::passes::{
            NamespaceTreeBuilder,
            fixtures::{self, class},
        },
        router::StandardRouter,
    };

    fn builder() -> TableOfContentsBuilder {
        TableOfContentsBuilder::new(Rc::new(StandardRouter::new()))
    }

    fn entries(toc: &TocDescriptor) -> Vec<(String, String, Option<String>)> {
        toc.entries()
            .map(|(_, entry)| {
                let parent = entry.parent().map(|id| toc.entry(id).title().to_string());
                (entry.url().to_string(), entry.title().to_string(), parent)
            })
            .collect()
    }

    fn document(file: &str, title: &str, children: &[&str]) -> DocumentDescriptor {
        let mut document = DocumentDescriptor::new(file, title);
        if !children.is_empty() {
            document.add_toc(TocDirective::new(
                children.iter().map(|child| child.to_string()).collect(),
            ));
        }
        document
    }

    fn guide_project(documents: Vec<DocumentDescriptor>) -> ProjectDescriptor {
        let mut guide = GuideSetDescriptor::new("guide");
        for document in documents {
            guide
                .documents_mut()
                .set(document.file().to_string(), document)
                .unwrap();
        }
        let mut version = VersionDescriptor::new("latest");
        version.add_documentation_set(DocumentationSet::Guide(guide));
        let mut project = ProjectDescriptor::default();
        project.add_version(version);
        project
    }

    fn guide_toc(project: &ProjectDescriptor, name: &str) -> TocDescriptor {
        match &project.versions()[0].documentation_sets()[0] {
            DocumentationSet::Guide(guide) => guide.tocs().get(&name.to_string()).unwrap().clone(),
            DocumentationSet::Api(_) => panic!("expected a guide set"),
        }
    }

    #[test]
    fn test_namespace_toc_is_depth_first() {
        let mut file = FileDescriptor::new("a.php", "");
        file.classes_mut().push(class("\\App\\Model\\User"));
        file.classes_mut().push(class("\\Lib\\Client"));
        let mut project = fixtures::indexed_project(vec![file]);
        NamespaceTreeBuilder.execute(&mut project).unwrap();
        let mut version = VersionDescriptor::new("latest");
        version.add_documentation_set(DocumentationSet::Api(ApiSetDescriptor::new("api", false)));
        project.add_version(version);

        builder().execute(&mut project).unwrap();

        let DocumentationSet::Api(api) = &project.versions()[0].documentation_sets()[0] else {
            panic!("expected an api set");
        };
        let toc = api.tocs().get(&"Namespaces".to_string()).unwrap();
        assert_eq!(
            entries(toc),
            vec![
                ("namespaces/app.html".to_string(), "\\App".to_string(), None),
                (
                    "namespaces/app.model.html".to_string(),
                    "\\App\\Model".to_string(),
                    Some("\\App".to_string())
                ),
                ("namespaces/lib.html".to_string(), "\\Lib".to_string(), None),
            ]
        );
        assert!(!api.tocs().contains_key(&"Packages".to_string()));
    }

    #[test]
    fn test_guide_toc_follows_directives() {
        let mut project = guide_project(vec![
            document("index", "Welcome", &["installing", "usage"]),
            document("installing", "Installing", &["installing/composer"]),
            document("installing/composer", "Composer", &[]),
            document("usage", "Usage", &[]),
        ]);

        builder().execute(&mut project).unwrap();

        let toc = guide_toc(&project, "Welcome");
        assert_eq!(
            entries(&toc),
            vec![
                ("guide/installing.html".to_string(), "Installing".to_string(), None),
                (
                    "guide/installing/composer.html".to_string(),
                    "Composer".to_string(),
                    Some("Installing".to_string())
                ),
                ("guide/usage.html".to_string(), "Usage".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_guide_toc_skips_missing_and_cyclic_documents() {
        let mut project = guide_project(vec![
            document("index", "Welcome", &["missing", "loop"]),
            document("loop", "Loop", &["loop", "index"]),
        ]);

        builder().execute(&mut project).unwrap();
        builder().execute(&mut project).unwrap();

        let toc = guide_toc(&project, "Welcome");
        assert_eq!(toc.len(), 1);
        assert_eq!(toc.entry(toc.roots()[0]).title(), "Loop");
    }

    #[test]
    fn test_untitled_guide_index_names_toc_after_file() {
        let mut project = guide_project(vec![
            document("index", "", &["usage"]),
            document("usage", "Usage", &[]),
        ]);

        builder().execute(&mut project).unwrap();

        let toc = guide_toc(&project, "index");
        assert_eq!(toc.name(), "index");
        assert_eq!(toc.len(), 1);
    }
}
