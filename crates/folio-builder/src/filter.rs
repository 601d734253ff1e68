//! Filters applied to freshly built descriptors.
//!
//! A filter may rewrite a descriptor (e.g. strip `{@internal}` sections from
//! its description) or drop it altogether. Dropped descriptors never enter
//! the project graph.

use std::{rc::Rc, sync::LazyLock};

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use folio_core::descriptor::{Descriptor, DescriptorKind, Settings, VisibilityFilter};

static INTERNAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{@internal\s(.+?)\}\}").unwrap());

/// The outcome of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filtered {
    Keep,
    Drop,
}

pub trait Filter {
    /// Inspects and possibly rewrites `descriptor`.
    fn filter(&self, descriptor: &mut dyn Descriptor, settings: &Settings) -> Filtered;
}

/// Drops elements tagged `@ignore`.
#[derive(Debug, Default)]
pub struct StripIgnore;

impl Filter for StripIgnore {
    fn filter(&self, descriptor: &mut dyn Descriptor, _: &Settings) -> Filtered {
        if descriptor.base().tags().contains("ignore") {
            Filtered::Drop
        } else {
            Filtered::Keep
        }
    }
}

/// Handles `@internal` elements and `{@internal ...}}` description sections.
///
/// With the `internal` visibility enabled the sections are unwrapped and
/// everything is kept; otherwise the sections are removed and elements
/// tagged `@internal` are dropped.
#[derive(Debug, Default)]
pub struct StripInternal;

impl Filter for StripInternal {
    fn filter(&self, descriptor: &mut dyn Descriptor, settings: &Settings) -> Filtered {
        let include_internal = settings.visibility().contains(VisibilityFilter::INTERNAL);
        let base = descriptor.base_mut();

        let replacement = if include_internal { "$1" } else { "" };
        let description = INTERNAL_RE
            .replace_all(base.description(), replacement)
            .trim()
            .to_string();
        base.set_description(description);

        if !include_internal && base.tags().contains("internal") {
            return Filtered::Drop;
        }
        Filtered::Keep
    }
}

/// Drops members whose visibility is not enabled.
///
/// Elements tagged `@api` always survive when the `api` visibility is
/// enabled. Elements without a visibility are kept.
#[derive(Debug, Default)]
pub struct StripOnVisibility;

impl Filter for StripOnVisibility {
    fn filter(&self, descriptor: &mut dyn Descriptor, settings: &Settings) -> Filtered {
        let allowed = settings.visibility();
        if allowed.contains(VisibilityFilter::API) && descriptor.base().tags().contains("api") {
            return Filtered::Keep;
        }

        match descriptor.visibility() {
            Some(visibility) if !allowed.allows(visibility) => Filtered::Drop,
            _ => Filtered::Keep,
        }
    }
}

/// Ordered filters attached per descriptor kind.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: IndexMap<DescriptorKind, Vec<Rc<dyn Filter>>>,
}

impl FilterChain {
    /// Descriptor kinds the default filters apply to.
    pub const FILTERABLE: [DescriptorKind; 9] = [
        DescriptorKind::Class,
        DescriptorKind::Interface,
        DescriptorKind::Trait,
        DescriptorKind::Enum,
        DescriptorKind::EnumCase,
        DescriptorKind::Function,
        DescriptorKind::Constant,
        DescriptorKind::Method,
        DescriptorKind::Property,
    ];

    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain with `StripIgnore`, `StripInternal` and `StripOnVisibility`
    /// attached to every filterable kind.
    pub fn standard() -> Self {
        let mut chain = Self::new();
        let filters: [Rc<dyn Filter>; 3] = [
            Rc::new(StripIgnore),
            Rc::new(StripInternal),
            Rc::new(StripOnVisibility),
        ];
        for kind in Self::FILTERABLE {
            for filter in &filters {
                chain.attach(kind, Rc::clone(filter));
            }
        }
        chain
    }

    /// Appends `filter` to the filters of `kind`.
    pub fn attach(&mut self, kind: DescriptorKind, filter: Rc<dyn Filter>) {
        self.filters.entry(kind).or_default().push(filter);
    }

    /// Number of filters attached to `kind`.
    pub fn count(&self, kind: DescriptorKind) -> usize {
        self.filters.get(&kind).map_or(0, Vec::len)
    }

    /// Runs the filters of the descriptor's kind in order, stopping at the
    /// first one that drops it.
    pub fn apply(&self, descriptor: &mut dyn Descriptor, settings: &Settings) -> Filtered {
        let kind = descriptor.kind();
        let Some(filters) = self.filters.get(&kind) else {
            return Filtered::Keep;
        };

        for filter in filters {
            if filter.filter(descriptor, settings) == Filtered::Drop {
                debug!(
                    kind:% = kind,
                    fqsen:? = descriptor.base().fqsen();
                    "Element dropped by filter"
                );
                return Filtered::Drop;
            }
        }
        Filtered::Keep
    }
}
