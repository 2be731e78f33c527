//! Interned identifiers for decoded objects.
//!
//! Object uids are compared and hashed constantly while decoding and laying out
//! a snapshot, so they are interned once and passed around as a copyable [`Id`].

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned object identifier.
///
/// # Examples
///
/// ```
/// use algviz_core::identifier::Id;
///
/// let root = Id::new("root");
/// assert_eq!(root, "root");
/// assert_eq!(Id::auto(3), "#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Character reserved for automatically generated uids.
    pub const AUTO_PREFIX: char = '#';

    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the automatic uid `#idx` for an object the input left unnamed.
    pub fn auto(idx: usize) -> Self {
        Self::new(&format!("{}{idx}", Self::AUTO_PREFIX))
    }

    /// Returns true for uids produced by [`Id::auto`].
    pub fn is_auto(&self) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .is_some_and(|name| name.starts_with(Self::AUTO_PREFIX))
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
