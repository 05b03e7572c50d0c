//! Catalog registry modules
//!
//! A module is a named bag of catalog entries for one kind of content
//! (log axes, dye colors, banner pattern shapes). Entries register once;
//! a second registration under the same id is a programmer error.

use facet_core::{CatalogEntry, CatalogKey, CatalogType, FacetError, FacetResult};
use std::collections::BTreeMap;

/// A named collection of catalog entries of one kind
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistryModule {
    id: String,
    entries: BTreeMap<CatalogKey, CatalogEntry>,
}

impl CatalogRegistryModule {
    /// An empty module with the given id
    pub fn new(id: impl Into<String>) -> Self {
        CatalogRegistryModule {
            id: id.into(),
            entries: BTreeMap::new(),
        }
    }

    /// The module id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Register an entry
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::AlreadyRegistered`] when an entry with the
    /// same catalog key is present.
    pub fn register(&mut self, entry: CatalogEntry) -> FacetResult<&mut Self> {
        let key = entry.key().clone();
        if self.entries.contains_key(&key) {
            return Err(FacetError::AlreadyRegistered(key));
        }
        self.entries.insert(key, entry);
        Ok(self)
    }

    /// The entry for the key, if registered
    pub fn get(&self, key: &CatalogKey) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Every registered entry, in key order
    pub fn all(&self) -> Vec<CatalogEntry> {
        self.entries.values().cloned().collect()
    }

    /// Every registered entry in the namespace, in key order
    pub fn all_for(&self, namespace: &str) -> Vec<CatalogEntry> {
        self.entries
            .values()
            .filter(|e| e.key().namespace() == namespace)
            .cloned()
            .collect()
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the module is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
