//! Statistics about a compiled project.
//!
//! The analyzer only reads the project descriptor. Its report is what the
//! `Debug` compiler pass logs and what the command line prints.

use std::{collections::BTreeMap, fmt};

use folio_core::descriptor::{DescriptorKind, ProjectDescriptor};

/// Counts gathered from a project descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerReport {
    files: usize,
    top_level_namespaces: usize,
    unresolved_parent_classes: usize,
    elements: BTreeMap<DescriptorKind, usize>,
}

impl AnalyzerReport {
    pub fn files(&self) -> usize {
        self.files
    }

    /// Children of the root namespace.
    pub fn top_level_namespaces(&self) -> usize {
        self.top_level_namespaces
    }

    /// Classes whose parent class is not part of the project.
    pub fn unresolved_parent_classes(&self) -> usize {
        self.unresolved_parent_classes
    }

    /// Number of indexed elements of `kind`.
    pub fn elements(&self, kind: DescriptorKind) -> usize {
        self.elements.get(&kind).copied().unwrap_or_default()
    }
}

impl fmt::Display for AnalyzerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "In the project are:")?;
        writeln!(f, "  {:>6} files", self.files)?;
        writeln!(f, "  {:>6} top-level namespaces", self.top_level_namespaces)?;
        writeln!(
            f,
            "  {:>6} unresolvable parent classes",
            self.unresolved_parent_classes
        )?;
        for (kind, count) in &self.elements {
            writeln!(f, "  {count:>6} {} elements", kind.as_str())?;
        }
        Ok(())
    }
}

/// Builds [`AnalyzerReport`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectAnalyzer;

impl ProjectAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyzes `project`; never fails and never changes it.
    pub fn analyze(&self, project: &ProjectDescriptor) -> AnalyzerReport {
        let mut report = AnalyzerReport {
            files: project.files().len(),
            top_level_namespaces: project.namespace().borrow().children().len(),
            ..AnalyzerReport::default()
        };

        let indexes = project.indexes();
        report.unresolved_parent_classes = indexes
            .classes
            .values()
            .filter(|class| {
                class
                    .borrow()
                    .parent()
                    .is_some_and(|parent| !parent.is_resolved())
            })
            .count();

        for element in indexes.elements.values() {
            *report.elements.entry(element.kind()).or_default() += 1;
        }

        report
    }
}
