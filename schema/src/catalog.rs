//! Registry of structural message kinds known to a schema.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Name of a structural message type, e.g. `GamePingPkg`.
///
/// Cheap to clone; tables and decoded messages share the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKind(Arc<str>);

impl MessageKind {
    /// Creates a message kind from its type name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of message kinds a structural decoder can produce, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    kinds: BTreeMap<String, MessageKind>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a message type name, returning its kind.
    pub fn insert(&mut self, name: &str) -> MessageKind {
        self.kinds
            .entry(name.to_owned())
            .or_insert_with(|| MessageKind::new(name))
            .clone()
    }

    /// Looks up a message kind by type name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MessageKind> {
        self.kinds.get(name)
    }

    /// Returns `true` if the type name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterates registered kinds in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageKind> {
        self.kinds.values()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MessageCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for name in iter {
            catalog.insert(name.as_ref());
        }
        catalog
    }
}
