//! Links between descriptors.
//!
//! Descriptors are created from per-file reflection, so a class only knows
//! the name of its parent until a compiler pass finds the parent descriptor.
//! [`Reference`] makes both states explicit.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::fqsen::Fqsen;

/// A shared, mutable handle to a descriptor.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a descriptor into a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// A reference from one descriptor to another.
///
/// Resolved references are non-owning: the target stays owned by its file
/// (or by the namespace/package tree).
pub enum Reference<T> {
    /// Only the name of the target is known.
    Unresolved(Fqsen),
    /// The target descriptor has been found.
    Resolved(Weak<RefCell<T>>),
}

impl<T> Reference<T> {
    /// Creates a resolved reference to `target`.
    pub fn resolved(target: &Shared<T>) -> Self {
        Self::Resolved(Rc::downgrade(target))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the unresolved name, if any.
    pub fn unresolved(&self) -> Option<Fqsen> {
        match self {
            Self::Unresolved(fqsen) => Some(*fqsen),
            Self::Resolved(_) => None,
        }
    }

    /// Returns the live target, if resolved and still alive.
    pub fn target(&self) -> Option<Shared<T>> {
        match self {
            Self::Unresolved(_) => None,
            Self::Resolved(target) => target.upgrade(),
        }
    }

    /// Returns `true` when this reference resolves to exactly `other`.
    pub fn points_to(&self, other: &Shared<T>) -> bool {
        match self {
            Self::Unresolved(_) => false,
            Self::Resolved(target) => std::ptr::eq(target.as_ptr(), Rc::as_ptr(other)),
        }
    }
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Unresolved(fqsen) => Self::Unresolved(*fqsen),
            Self::Resolved(target) => Self::Resolved(target.clone()),
        }
    }
}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved(fqsen) => f.debug_tuple("Unresolved").field(fqsen).finish(),
            Self::Resolved(target) => f
                .debug_tuple("Resolved")
                .field(&target.as_ptr())
                .finish(),
        }
    }
}

impl<T> From<Fqsen> for Reference<T> {
    fn from(fqsen: Fqsen) -> Self {
        Self::Unresolved(fqsen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference() {
        let fqsen = Fqsen::new("\\Target").unwrap();
        let reference: Reference<u8> = fqsen.into();

        assert!(!reference.is_resolved());
        assert_eq!(reference.unresolved(), Some(fqsen));
        assert!(reference.target().is_none());
    }

    #[test]
    fn test_resolved_reference_points_to_target() {
        let target = shared(5u8);
        let other = shared(5u8);
        let reference = Reference::resolved(&target);

        assert!(reference.is_resolved());
        assert!(reference.points_to(&target));
        assert!(!reference.points_to(&other));
        assert_eq!(*reference.target().unwrap().borrow(), 5);
    }

    #[test]
    fn test_resolved_reference_does_not_keep_target_alive() {
        let target = shared(1u8);
        let reference = Reference::resolved(&target);
        drop(target);

        assert!(reference.target().is_none());
    }
}
