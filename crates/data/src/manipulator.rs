//! Manipulator schemas and data manipulators
//!
//! A [`ManipulatorSchema`] declares one cohesive unit of data: the keys it
//! carries, their prototype values (key, default, bounds), a content
//! version for serialised payloads and whether holders must always carry
//! the unit. A [`DataManipulator`] is a live instance of a schema.
//!
//! Contract
//!
//! * A manipulator always carries a value for every key its schema
//!   declares; absent serialised fields fall back to the prototype default.
//! * A serialised payload tagged with a version newer than the schema's is
//!   rejected as a whole, never partially applied.

use crate::merge::MergeStrategy;
use facet_core::{
    CatalogKey, CatalogType, DataContainer, DataSerializable, FacetError, FacetResult, Key,
};
use facet_values::{BaseValue, ImmutableValue, Value, ValueContainer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The query every serialised manipulator stores its schema id under
pub fn manipulator_id_query() -> facet_core::DataQuery {
    facet_core::DataQuery::of("manipulator_id").expect("static query is valid")
}

/// The shape of one unit of manipulable data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManipulatorSchema {
    id: CatalogKey,
    name: String,
    version: u16,
    mandatory: bool,
    prototypes: BTreeMap<CatalogKey, Value>,
}

impl ManipulatorSchema {
    /// Start building a schema
    pub fn builder(id: CatalogKey, name: impl Into<String>, version: u16) -> SchemaBuilder {
        SchemaBuilder {
            id,
            name: name.into(),
            version,
            mandatory: false,
            prototypes: BTreeMap::new(),
        }
    }

    /// Serialised content version this schema reads and writes
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Whether holders always carry an instance of this schema
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// The keys this schema declares
    pub fn keys(&self) -> Vec<Key> {
        self.prototypes
            .values()
            .map(|v| v.key().clone())
            .collect()
    }

    /// The prototype value for the key, if declared
    pub fn prototype(&self, key: &Key) -> Option<&Value> {
        self.prototypes.get(key.id())
    }

    /// Whether this schema declares the key
    pub fn supports(&self, key: &Key) -> bool {
        self.prototypes.contains_key(key.id())
    }
}

impl CatalogType for ManipulatorSchema {
    fn key(&self) -> &CatalogKey {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for [`ManipulatorSchema`]
#[derive(Debug)]
pub struct SchemaBuilder {
    id: CatalogKey,
    name: String,
    version: u16,
    mandatory: bool,
    prototypes: BTreeMap<CatalogKey, Value>,
}

impl SchemaBuilder {
    /// Mark the schema as mandatory on every holder that supports it
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Declare a key through its prototype value
    ///
    /// The prototype's payload is reset to its default before being kept.
    pub fn value(mut self, prototype: impl Into<Value>) -> Self {
        let mut prototype = prototype.into();
        prototype.reset();
        self.prototypes
            .insert(prototype.key().id().clone(), prototype);
        self
    }

    /// Finish the schema
    pub fn build(self) -> Arc<ManipulatorSchema> {
        Arc::new(ManipulatorSchema {
            id: self.id,
            name: self.name,
            version: self.version,
            mandatory: self.mandatory,
            prototypes: self.prototypes,
        })
    }
}

/// A live, mutable instance of a manipulator schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataManipulator {
    schema: Arc<ManipulatorSchema>,
    values: BTreeMap<CatalogKey, Value>,
}

impl DataManipulator {
    /// A manipulator sitting at the schema's defaults
    pub fn new(schema: Arc<ManipulatorSchema>) -> Self {
        let values = schema.prototypes.clone();
        DataManipulator { schema, values }
    }

    /// The schema this manipulator instantiates
    pub fn schema(&self) -> &Arc<ManipulatorSchema> {
        &self.schema
    }

    /// The schema's catalog identifier
    pub fn id(&self) -> &CatalogKey {
        CatalogType::key(self.schema.as_ref())
    }

    /// Replace the value for its own key
    ///
    /// # Errors
    ///
    /// Returns an unsupported-key error when the schema does not declare
    /// the value's key, and a kind mismatch when the value's shape differs
    /// from the prototype's.
    pub fn set(&mut self, value: Value) -> FacetResult<&mut Self> {
        let id = value.key().id().clone();
        let prototype = self
            .schema
            .prototypes
            .get(&id)
            .ok_or_else(|| FacetError::UnsupportedKey(id.clone()))?;
        if value.kind() != prototype.kind() {
            return Err(FacetError::InvalidOperation(format!(
                "value for {} is {} shaped, schema declares {}",
                id,
                value.kind().name(),
                prototype.kind().name()
            )));
        }
        self.values.insert(id, value);
        Ok(self)
    }

    /// Set the scalar element for the key in place
    ///
    /// # Errors
    ///
    /// Unsupported keys, kind mismatches and out-of-range elements all
    /// propagate; the manipulator is unchanged on error.
    pub fn set_element(&mut self, key: &Key, element: facet_core::Element) -> FacetResult<&mut Self> {
        let value = self
            .values
            .get_mut(key.id())
            .ok_or_else(|| FacetError::UnsupportedKey(key.id().clone()))?;
        value.set_element(element)?;
        Ok(self)
    }

    /// Copy every overlapping value from the container, per the strategy
    ///
    /// Only keys this schema declares are considered. `None` when the
    /// container supplies none of them; the manipulator is unchanged then.
    pub fn fill_with(
        &mut self,
        container: &dyn ValueContainer,
        strategy: MergeStrategy,
    ) -> Option<&mut Self> {
        let mut supplied = false;
        for (id, value) in self.values.iter_mut() {
            let key = value.key().clone();
            let Some(incoming) = container.get_value(&key) else {
                continue;
            };
            if incoming.kind() != value.kind() {
                continue;
            }
            supplied = true;
            let take = match strategy {
                MergeStrategy::Ignore => false,
                MergeStrategy::Overwrite => true,
                MergeStrategy::OriginalPreferred => !value.exists(),
                MergeStrategy::ReplacementPreferred => incoming.exists(),
            };
            if take && *value != incoming {
                tracing::trace!(schema = %id, key = %key.id(), "fill replaced value");
                *value = incoming;
            }
        }
        supplied.then_some(self)
    }

    /// Copy every overlapping value from the container, replacing blindly
    ///
    /// `None` when the container supplies none of the schema's keys.
    pub fn fill(&mut self, container: &dyn ValueContainer) -> Option<&mut Self> {
        self.fill_with(container, MergeStrategy::Overwrite)
    }

    /// Reset every value to the schema's defaults
    pub fn reset(&mut self) -> &mut Self {
        self.values = self.schema.prototypes.clone();
        self
    }

    /// An independent copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableDataManipulator {
        ImmutableDataManipulator {
            schema: Arc::clone(&self.schema),
            values: self
                .values
                .iter()
                .map(|(id, v)| (id.clone(), v.as_immutable()))
                .collect(),
        }
    }

    /// Rebuild a manipulator from a serialised container
    ///
    /// Fields absent from the container fall back to the schema defaults.
    /// Returns `None` when the payload is tagged with a newer content
    /// version than the schema knows, or when any present field is
    /// malformed; a rejected payload applies nothing.
    pub fn from_container(
        schema: &Arc<ManipulatorSchema>,
        container: &DataContainer,
    ) -> Option<Self> {
        if let Some(version) = container.content_version() {
            if version > schema.version {
                tracing::debug!(
                    schema = %schema.id,
                    found = version,
                    known = schema.version,
                    "rejecting payload from a newer content version"
                );
                return None;
            }
        }
        if let Some(id) = container.get_text(&manipulator_id_query()) {
            if id != schema.id.to_string() {
                tracing::debug!(schema = %schema.id, found = id, "payload belongs to another schema");
                return None;
            }
        }
        let mut manipulator = DataManipulator::new(Arc::clone(schema));
        for prototype in schema.prototypes.values() {
            let query = prototype.key().query();
            let Some(node) = container.get(query) else {
                continue;
            };
            let value = Value::from_view(prototype, node)?;
            manipulator.values.insert(prototype.key().id().clone(), value);
        }
        Some(manipulator)
    }
}

impl DataSerializable for DataManipulator {
    fn content_version(&self) -> u16 {
        self.schema.version
    }

    fn to_container(&self) -> DataContainer {
        let mut container = DataContainer::new();
        container.set_content_version(self.schema.version);
        container.set(
            &manipulator_id_query(),
            facet_core::Element::Text(self.id().to_string()),
        );
        for value in self.values.values() {
            container.set(value.key().query(), value.to_view());
        }
        container
    }
}

impl ValueContainer for DataManipulator {
    fn get_value(&self, key: &Key) -> Option<Value> {
        self.values.get(key.id()).cloned()
    }

    fn supports_key(&self, key: &Key) -> bool {
        self.schema.supports(key)
    }

    fn keys(&self) -> Vec<Key> {
        self.schema.keys()
    }

    fn values(&self) -> Vec<Value> {
        self.values.values().cloned().collect()
    }
}

impl PartialOrd for DataManipulator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DataManipulator {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}

/// A read-only instance of a manipulator schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableDataManipulator {
    schema: Arc<ManipulatorSchema>,
    values: BTreeMap<CatalogKey, ImmutableValue>,
}

impl ImmutableDataManipulator {
    /// A manipulator sitting at the schema's defaults
    pub fn new(schema: Arc<ManipulatorSchema>) -> Self {
        DataManipulator::new(schema).as_immutable()
    }

    /// The schema this manipulator instantiates
    pub fn schema(&self) -> &Arc<ManipulatorSchema> {
        &self.schema
    }

    /// The schema's catalog identifier
    pub fn id(&self) -> &CatalogKey {
        CatalogType::key(self.schema.as_ref())
    }

    /// The value for the key, if declared
    pub fn get(&self, key: &Key) -> Option<&ImmutableValue> {
        self.values.get(key.id())
    }

    /// A new instance with the value replaced
    ///
    /// # Errors
    ///
    /// As [`DataManipulator::set`].
    pub fn with(&self, value: Value) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.set(value)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance with the scalar element set for the key
    ///
    /// # Errors
    ///
    /// As [`DataManipulator::set_element`].
    pub fn with_element(&self, key: &Key, element: facet_core::Element) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.set_element(key, element)?;
        Ok(mutable.as_immutable())
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> DataManipulator {
        DataManipulator {
            schema: Arc::clone(&self.schema),
            values: self
                .values
                .iter()
                .map(|(id, v)| (id.clone(), v.as_mutable()))
                .collect(),
        }
    }
}

impl DataSerializable for ImmutableDataManipulator {
    fn content_version(&self) -> u16 {
        self.schema.version
    }

    fn to_container(&self) -> DataContainer {
        self.as_mutable().to_container()
    }
}

impl ValueContainer for ImmutableDataManipulator {
    fn get_value(&self, key: &Key) -> Option<Value> {
        self.values.get(key.id()).map(|v| v.as_mutable())
    }

    fn supports_key(&self, key: &Key) -> bool {
        self.schema.supports(key)
    }

    fn keys(&self) -> Vec<Key> {
        self.schema.keys()
    }

    fn values(&self) -> Vec<Value> {
        self.values.values().map(|v| v.as_mutable()).collect()
    }
}
