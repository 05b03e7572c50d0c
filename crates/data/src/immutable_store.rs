//! The immutable composite value store
//!
//! The persistent counterpart of [`CompositeValueStore`]: every mutation
//! returns a new store and leaves the receiver untouched. Mutators return
//! `None` where the mutable store would report a failed transaction.

use crate::holder::DataHolder;
use crate::manipulator::{DataManipulator, ImmutableDataManipulator, ManipulatorSchema};
use crate::merge::MergeStrategy;
use crate::store::CompositeValueStore;
use crate::transaction::DataTransactionStatus;
use facet_core::{CatalogKey, Element, Key};
use facet_values::{Value, ValueContainer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An immutable, persistent collection of manipulator slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableValueStore {
    schemas: Vec<Arc<ManipulatorSchema>>,
    slots: BTreeMap<CatalogKey, ImmutableDataManipulator>,
}

impl ImmutableValueStore {
    /// Create a store admitting the given schemas
    ///
    /// Mandatory schemas start with a slot at their defaults.
    pub fn new(schemas: impl IntoIterator<Item = Arc<ManipulatorSchema>>) -> Self {
        CompositeValueStore::new(schemas).as_immutable()
    }

    /// Snapshot a mutable store
    pub fn from_store(store: &CompositeValueStore) -> Self {
        ImmutableValueStore {
            schemas: store.schemas(),
            slots: store
                .manipulators()
                .into_iter()
                .map(|m| (m.id().clone(), m.as_immutable()))
                .collect(),
        }
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> CompositeValueStore {
        let mut store = CompositeValueStore::new(self.schemas.iter().cloned());
        for slot in self.slots.values() {
            store.offer(slot.as_mutable());
        }
        store
    }

    /// Whether this store admits the schema
    pub fn supports(&self, schema_id: &CatalogKey) -> bool {
        self.schemas
            .iter()
            .any(|s| facet_core::CatalogType::key(s.as_ref()) == schema_id)
    }

    /// The resident manipulator, if the slot is filled
    pub fn get(&self, schema_id: &CatalogKey) -> Option<&ImmutableDataManipulator> {
        self.slots.get(schema_id)
    }

    /// A new store with the manipulator offered in
    ///
    /// `None` when this store does not admit the manipulator's schema.
    pub fn with(&self, manipulator: DataManipulator) -> Option<Self> {
        self.with_merged(manipulator, MergeStrategy::Overwrite)
    }

    /// A new store with the manipulator merged in under the strategy
    pub fn with_merged(
        &self,
        manipulator: DataManipulator,
        strategy: MergeStrategy,
    ) -> Option<Self> {
        let mut mutable = self.as_mutable();
        if !mutable.offer_with(manipulator, strategy).is_successful() {
            return None;
        }
        Some(mutable.as_immutable())
    }

    /// A new store with the element set for the key
    ///
    /// `None` when the key is unsupported or the element invalid.
    pub fn with_element(&self, key: &Key, element: Element) -> Option<Self> {
        let mut mutable = self.as_mutable();
        if !mutable.offer_element(key, element).is_successful() {
            return None;
        }
        Some(mutable.as_immutable())
    }

    /// A new store without the slot for the schema
    ///
    /// Mandatory slots reset instead of emptying. `None` when the slot is
    /// absent or unsupported.
    pub fn without(&self, schema_id: &CatalogKey) -> Option<Self> {
        let mut mutable = self.as_mutable();
        match mutable.remove(schema_id).status() {
            DataTransactionStatus::Success => Some(mutable.as_immutable()),
            _ => None,
        }
    }

    /// A new store folding in every filled slot of another store
    pub fn merge(&self, other: &Self, strategy: MergeStrategy) -> Self {
        let mut mutable = self.as_mutable();
        mutable.copy_from(&other.as_mutable(), strategy);
        mutable.as_immutable()
    }
}

impl ValueContainer for ImmutableValueStore {
    fn get_value(&self, key: &Key) -> Option<Value> {
        self.slots.values().find_map(|m| m.get_value(key))
    }

    fn supports_key(&self, key: &Key) -> bool {
        self.schemas.iter().any(|s| s.supports(key))
    }

    fn keys(&self) -> Vec<Key> {
        self.slots.values().flat_map(|m| m.keys()).collect()
    }

    fn values(&self) -> Vec<Value> {
        self.slots.values().flat_map(|m| m.values()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::{DataQuery, ElementKind, ValueKind};
    use facet_values::ScalarValue;

    fn food_key() -> Key {
        Key::new(
            CatalogKey::game("food_level").unwrap(),
            "Food Level",
            ElementKind::Int,
            ValueKind::Scalar,
            DataQuery::of("food.level").unwrap(),
        )
    }

    fn food_schema() -> Arc<ManipulatorSchema> {
        ManipulatorSchema::builder(CatalogKey::game("food").unwrap(), "Food", 1)
            .value(ScalarValue::new(food_key(), Element::Int(20)).unwrap())
            .build()
    }

    fn store() -> ImmutableValueStore {
        ImmutableValueStore::new(vec![food_schema()])
    }

    #[test]
    fn test_with_element_leaves_receiver() {
        let a = store();
        let b = a.with_element(&food_key(), Element::Int(5)).unwrap();
        assert!(a.get_value(&food_key()).is_none());
        assert_eq!(b.get_element(&food_key()), Some(Element::Int(5)));
    }

    #[test]
    fn test_with_element_rejects_bad_payload() {
        let a = store();
        assert!(a.with_element(&food_key(), Element::Text("soup".into())).is_none());
    }

    #[test]
    fn test_without_absent_slot_is_none() {
        assert!(store().without(&CatalogKey::game("food").unwrap()).is_none());
    }

    #[test]
    fn test_without_filled_slot() {
        let a = store().with_element(&food_key(), Element::Int(5)).unwrap();
        let b = a.without(&CatalogKey::game("food").unwrap()).unwrap();
        assert!(b.get_value(&food_key()).is_none());
        assert_eq!(a.get_element(&food_key()), Some(Element::Int(5)));
    }

    #[test]
    fn test_mutable_round_trip() {
        let a = store().with_element(&food_key(), Element::Int(5)).unwrap();
        assert_eq!(a.as_mutable().as_immutable(), a);
    }

    #[test]
    fn test_merge_prefers_replacement_fields() {
        let a = store().with_element(&food_key(), Element::Int(5)).unwrap();
        let b = store().with_element(&food_key(), Element::Int(9)).unwrap();
        let merged = a.merge(&b, MergeStrategy::ReplacementPreferred);
        assert_eq!(merged.get_element(&food_key()), Some(Element::Int(9)));
    }
}
