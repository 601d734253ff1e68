//! Fully Qualified Structural Element Names backed by string interning.
//!
//! This module provides the [`Fqsen`] type. Every structural element in a
//! project (namespace, class, method, property, constant, function) is
//! identified by one, e.g. `\App\Model\User`, `\App\Model\User::save()`,
//! `\App\Model\User::$name` or `\App\helper()`.
//!
//! FQSENs are the join key of the whole descriptor graph, so they are interned
//! once and compared by symbol afterwards.

use std::{
    fmt,
    str::FromStr,
    sync::{LazyLock, Mutex, OnceLock},
};

use log::trace;
use regex::Regex;
use string_interner::{DefaultStringInterner, DefaultSymbol};
use thiserror::Error;

/// Global string interner for FQSEN storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

static FQSEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let segment = r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*";
    Regex::new(&format!(
        r"^\\(?:{segment}(?:\\{segment})*)?(?:::\$?{segment})?(?:\(\))?$"
    ))
    .unwrap()
});

/// The separator between namespace segments.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// The separator between a structural element and one of its members.
pub const MEMBER_SEPARATOR: &str = "::";

/// Error raised when a string is not a valid FQSEN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{0}\" is not a valid Fqsen")]
pub struct FqsenError(String);

impl FqsenError {
    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.0
    }
}

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// A validated, interned Fully Qualified Structural Element Name.
///
/// # Examples
///
/// ```
/// use folio_core::fqsen::Fqsen;
///
/// let class = Fqsen::new(r"\App\Model\User").unwrap();
/// assert_eq!(class.name(), "User");
/// assert_eq!(class.namespace(), Fqsen::new(r"\App\Model").unwrap());
///
/// let method = class.member("save()").unwrap();
/// assert_eq!(method, r"\App\Model\User::save()");
/// assert_eq!(method.name(), "save");
/// assert_eq!(method.container(), class);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fqsen(DefaultSymbol);

impl Fqsen {
    /// Creates an `Fqsen` after validating its syntax.
    ///
    /// # Errors
    ///
    /// Returns [`FqsenError`] when `fqsen` does not start with `\` or contains
    /// characters that are not allowed in a structural element name.
    pub fn new(fqsen: &str) -> Result<Self, FqsenError> {
        if !FQSEN_RE.is_match(fqsen) {
            trace!(fqsen; "Rejected invalid FQSEN");
            return Err(FqsenError(fqsen.to_string()));
        }
        Ok(Self::intern(fqsen))
    }

    /// The global namespace, `\`.
    pub fn root() -> Self {
        Self::intern("\\")
    }

    fn intern(value: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(value)))
    }

    /// Returns the textual form of this FQSEN.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        })
    }

    /// Returns `true` for the global namespace.
    pub fn is_root(&self) -> bool {
        *self == Self::root()
    }

    /// Returns `true` when this FQSEN points at a member of a structural
    /// element (`\A\B::member`).
    pub fn is_member(&self) -> bool {
        self.as_string().contains(MEMBER_SEPARATOR)
    }

    /// The short name of the element: the member name for members, the last
    /// namespace segment otherwise. Trailing `()` and a leading `$` are
    /// removed.
    pub fn name(&self) -> String {
        let value = self.as_string();
        let tail = match value.rsplit_once(MEMBER_SEPARATOR) {
            Some((_, member)) => member,
            None => value
                .rsplit(NAMESPACE_SEPARATOR)
                .next()
                .unwrap_or_default(),
        };
        tail.trim_start_matches('$').trim_end_matches("()").to_string()
    }

    /// The FQSEN of the structural element owning a member, or `self` when
    /// this is not a member.
    pub fn container(&self) -> Fqsen {
        let value = self.as_string();
        match value.split_once(MEMBER_SEPARATOR) {
            Some((container, _)) => Self::intern(container),
            None => *self,
        }
    }

    /// The namespace this element lives in.
    ///
    /// For members this is the namespace of the owning element; the namespace
    /// of the root is the root itself.
    pub fn namespace(&self) -> Fqsen {
        let container = self.container().as_string();
        match container.rsplit_once(NAMESPACE_SEPARATOR) {
            Some(("", _)) | None => Self::root(),
            Some((namespace, _)) => Self::intern(namespace),
        }
    }

    /// Appends a namespace segment, e.g. `\A` + `B` = `\A\B`.
    ///
    /// # Errors
    ///
    /// Returns [`FqsenError`] when the result is not a valid FQSEN.
    pub fn child(&self, segment: &str) -> Result<Fqsen, FqsenError> {
        let value = self.as_string();
        let joined = if self.is_root() {
            format!("\\{segment}")
        } else {
            format!("{value}\\{segment}")
        };
        Self::new(&joined)
    }

    /// Appends a member, e.g. `\A\B` + `run()` = `\A\B::run()`.
    ///
    /// # Errors
    ///
    /// Returns [`FqsenError`] when the result is not a valid FQSEN.
    pub fn member(&self, member: &str) -> Result<Fqsen, FqsenError> {
        Self::new(&format!("{self}{MEMBER_SEPARATOR}{member}"))
    }

    /// The namespace segments of this FQSEN without the root, e.g.
    /// `["A", "B"]` for `\A\B`.
    pub fn segments(&self) -> Vec<String> {
        self.container()
            .as_string()
            .split(NAMESPACE_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for Fqsen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl fmt::Debug for Fqsen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fqsen({})", self.as_string())
    }
}

impl FromStr for Fqsen {
    type Err = FqsenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Fqsen {
    type Error = FqsenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<str> for Fqsen {
    fn eq(&self, other: &str) -> bool {
        self.as_string() == other
    }
}

impl PartialEq<&str> for Fqsen {
    fn eq(&self, other: &&str) -> bool {
        self.as_string() == *other
    }
}
