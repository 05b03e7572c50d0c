//! The game registry
//!
//! One process-wide catalog of content modules, well-known keys,
//! manipulator schemas and builder suppliers. Lookups return copies;
//! interior locking keeps the registry shareable across threads.

use crate::module::CatalogRegistryModule;
use facet_core::{CatalogEntry, CatalogKey, CatalogType, FacetError, FacetResult, Key};
use facet_data::{DataManipulator, ManipulatorSchema};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

type BuilderSupplier = Box<dyn Fn() -> DataManipulator + Send + Sync>;

/// The catalog of game content
#[derive(Default)]
pub struct GameRegistry {
    modules: RwLock<BTreeMap<String, CatalogRegistryModule>>,
    keys: RwLock<BTreeMap<CatalogKey, Key>>,
    schemas: RwLock<BTreeMap<CatalogKey, Arc<ManipulatorSchema>>>,
    builders: RwLock<BTreeMap<String, BuilderSupplier>>,
}

impl std::fmt::Debug for GameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRegistry")
            .field("modules", &self.modules.read().len())
            .field("keys", &self.keys.read().len())
            .field("schemas", &self.schemas.read().len())
            .field("builders", &self.builders.read().len())
            .finish()
    }
}

impl GameRegistry {
    /// An empty registry
    pub fn new() -> Self {
        GameRegistry::default()
    }

    /// Resolve a possibly-unqualified textual id to a catalog key
    ///
    /// # Errors
    ///
    /// Propagates invalid-id errors from the key parser.
    pub fn resolve_key(&self, id: &str) -> FacetResult<CatalogKey> {
        Ok(CatalogKey::resolve(id)?)
    }

    /// Register a content module under its id
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::AlreadyRegistered`] when a module with the
    /// same id is present; the resident module stays in force. Module ids
    /// must be valid catalog names.
    pub fn register_module(&self, module: CatalogRegistryModule) -> FacetResult<()> {
        let marker = CatalogKey::resolve(module.id())?;
        let mut modules = self.modules.write();
        if modules.contains_key(module.id()) {
            return Err(FacetError::AlreadyRegistered(marker));
        }
        tracing::info!(module = module.id(), entries = module.len(), "module registered");
        modules.insert(module.id().to_string(), module);
        Ok(())
    }

    /// The entry of the module for the key, if both exist
    pub fn get_type(&self, module_id: &str, key: &CatalogKey) -> Option<CatalogEntry> {
        self.modules.read().get(module_id)?.get(key).cloned()
    }

    /// Every entry the module carries
    pub fn get_all_of(&self, module_id: &str) -> Vec<CatalogEntry> {
        self.modules
            .read()
            .get(module_id)
            .map(|m| m.all())
            .unwrap_or_default()
    }

    /// Every entry the module carries in the namespace
    pub fn get_all_for(&self, namespace: &str, module_id: &str) -> Vec<CatalogEntry> {
        self.modules
            .read()
            .get(module_id)
            .map(|m| m.all_for(namespace))
            .unwrap_or_default()
    }

    /// Register a well-known key
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::AlreadyRegistered`] for a duplicate key id.
    pub fn register_key(&self, key: Key) -> FacetResult<()> {
        let mut keys = self.keys.write();
        if keys.contains_key(key.id()) {
            return Err(FacetError::AlreadyRegistered(key.id().clone()));
        }
        keys.insert(key.id().clone(), key);
        Ok(())
    }

    /// The well-known key for the id, if registered
    pub fn get_key(&self, id: &CatalogKey) -> Option<Key> {
        self.keys.read().get(id).cloned()
    }

    /// Register a manipulator schema
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::AlreadyRegistered`] for a duplicate schema id.
    pub fn register_schema(&self, schema: Arc<ManipulatorSchema>) -> FacetResult<()> {
        let id = CatalogType::key(schema.as_ref()).clone();
        let mut schemas = self.schemas.write();
        if schemas.contains_key(&id) {
            return Err(FacetError::AlreadyRegistered(id));
        }
        schemas.insert(id, schema);
        Ok(())
    }

    /// The schema for the id, if registered
    pub fn get_schema(&self, id: &CatalogKey) -> Option<Arc<ManipulatorSchema>> {
        self.schemas.read().get(id).cloned()
    }

    /// Every registered schema, in id order
    pub fn schemas(&self) -> Vec<Arc<ManipulatorSchema>> {
        self.schemas.read().values().cloned().collect()
    }

    /// Register a builder supplier under a name
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::AlreadyRegistered`] for a duplicate name;
    /// builder names must be valid catalog names.
    pub fn register_builder_supplier(
        &self,
        name: &str,
        supplier: impl Fn() -> DataManipulator + Send + Sync + 'static,
    ) -> FacetResult<()> {
        let marker = CatalogKey::resolve(name)?;
        let mut builders = self.builders.write();
        if builders.contains_key(name) {
            return Err(FacetError::AlreadyRegistered(marker));
        }
        builders.insert(name.to_string(), Box::new(supplier));
        Ok(())
    }

    /// Run the supplier registered under the name
    ///
    /// # Errors
    ///
    /// Returns [`FacetError::BuilderMissing`] when no supplier is
    /// registered under the name.
    pub fn create_builder(&self, name: &str) -> FacetResult<DataManipulator> {
        let builders = self.builders.read();
        let supplier = builders
            .get(name)
            .ok_or_else(|| FacetError::BuilderMissing(name.to_string()))?;
        Ok(supplier())
    }
}
