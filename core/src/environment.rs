//! # ENVIRONMENT
//!
//! **IMMUTABLE SNAPSHOT OF PROVIDED DEPENDENCY VALUES**
//!
//! An [`Environment`] maps context identities to the values provided for
//! them. It has no public constructor besides [`Environment::empty`] and no
//! public update surface: the only way to add an entry is a
//! [`Provider`](crate::dependencies::Provider) built by a context.

use crate::dependencies::types::ContextId;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type-erased provided value plus the name of its concrete type.
#[derive(Clone)]
pub(crate) struct Entry {
    pub(crate) value: Arc<dyn Any + Send + Sync>,
    pub(crate) type_name: &'static str,
}

impl Entry {
    pub(crate) fn new<A: Any + Send + Sync>(value: A) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<A>(),
        }
    }
}

/// **ENVIRONMENT**
///
/// **GUARANTEE**: Never mutated after construction. Deriving a child copies
/// the entry table and shares every stored value with the parent.
#[derive(Clone, Default)]
pub struct Environment {
    entries: Arc<HashMap<ContextId, Entry>>,
}

impl Environment {
    /// The root environment with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of provided entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been provided.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn contains(&self, id: ContextId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn entry(&self, id: ContextId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Derive a child with `id` set to `entry`, overwriting any previous value.
    pub(crate) fn with_entry(&self, id: ContextId, entry: Entry) -> Self {
        let mut entries = HashMap::clone(&self.entries);
        entries.insert(id, entry);
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.entries.iter().collect();
        ids.sort_by_key(|(id, _)| **id);
        f.debug_map()
            .entries(ids.into_iter().map(|(id, entry)| (id, entry.type_name)))
            .finish()
    }
}
