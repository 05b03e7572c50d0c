//! The mutable composite value store
//!
//! A [`CompositeValueStore`] is a self-contained holder: it carries the
//! set of schemas it admits and one optional manipulator slot per schema.
//! Mandatory schemas are seeded at construction and never leave.
//!
//! Invariants
//!
//! * Every filled slot is fully populated (one value per schema key).
//! * A failed transaction leaves the store exactly as it was.
//! * `undo` of a transaction this store produced restores the prior
//!   state, slots included.

use crate::holder::DataHolder;
use crate::manipulator::{DataManipulator, ManipulatorSchema};
use crate::merge::MergeStrategy;
use crate::transaction::{DataTransactionResult, DataTransactionStatus};
use facet_core::{CatalogKey, CatalogType, Element, Key};
use facet_values::{BaseValue, ScalarValue, Value, ValueContainer};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A mutable, transactional collection of manipulator slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeValueStore {
    schemas: BTreeMap<CatalogKey, Arc<ManipulatorSchema>>,
    key_index: BTreeMap<CatalogKey, CatalogKey>,
    slots: BTreeMap<CatalogKey, DataManipulator>,
}

impl CompositeValueStore {
    /// Create a store admitting the given schemas
    ///
    /// Mandatory schemas start with a slot at their defaults. When two
    /// schemas declare the same key id, the first registered schema keeps
    /// it and the collision is logged.
    pub fn new(schemas: impl IntoIterator<Item = Arc<ManipulatorSchema>>) -> Self {
        let mut by_id = BTreeMap::new();
        let mut key_index: BTreeMap<CatalogKey, CatalogKey> = BTreeMap::new();
        let mut slots = BTreeMap::new();
        for schema in schemas {
            let id = CatalogType::key(schema.as_ref()).clone();
            for key in schema.keys() {
                match key_index.entry(key.id().clone()) {
                    Entry::Vacant(entry) => {
                        entry.insert(id.clone());
                    }
                    Entry::Occupied(entry) => {
                        tracing::warn!(
                            key = %key.id(),
                            schema = %id,
                            resident = %entry.get(),
                            "key id already owned, keeping resident schema"
                        );
                    }
                }
            }
            if schema.is_mandatory() {
                slots.insert(id.clone(), DataManipulator::new(Arc::clone(&schema)));
            }
            by_id.insert(id, schema);
        }
        CompositeValueStore {
            schemas: by_id,
            key_index,
            slots,
        }
    }

    /// The schemas this store admits
    pub fn schemas(&self) -> Vec<Arc<ManipulatorSchema>> {
        self.schemas.values().cloned().collect()
    }

    /// Copies of every filled slot
    pub fn manipulators(&self) -> Vec<DataManipulator> {
        self.slots.values().cloned().collect()
    }

    /// The schema owning the key, if this store admits it
    fn schema_for_key(&self, key: &Key) -> Option<&Arc<ManipulatorSchema>> {
        let schema_id = self.key_index.get(key.id())?;
        self.schemas.get(schema_id)
    }

    /// A resident copy, or a default-valued instance for a supported schema
    ///
    /// Never aliases store state and never fills the slot; offer the
    /// instance back to persist changes. `None` for unsupported schemas.
    pub fn get_or_create(&self, schema_id: &CatalogKey) -> Option<DataManipulator> {
        if let Some(resident) = self.slots.get(schema_id) {
            return Some(resident.clone());
        }
        self.schemas
            .get(schema_id)
            .map(|schema| DataManipulator::new(Arc::clone(schema)))
    }

    /// Offer every filled slot of this store to another, per the strategy
    pub fn copy_to(
        &self,
        other: &mut CompositeValueStore,
        strategy: MergeStrategy,
    ) -> DataTransactionResult {
        other.copy_from(self, strategy)
    }

    /// Offer every filled slot of another store under the strategy
    pub fn copy_from(
        &mut self,
        other: &CompositeValueStore,
        strategy: MergeStrategy,
    ) -> DataTransactionResult {
        let mut folded = DataTransactionResult::builder().build();
        for manipulator in other.manipulators() {
            folded = folded.absorb(self.offer_with(manipulator, strategy));
        }
        folded
    }

    /// An immutable copy of this store
    pub fn as_immutable(&self) -> crate::immutable_store::ImmutableValueStore {
        crate::immutable_store::ImmutableValueStore::from_store(self)
    }

    // A carrier for a payload the store turned away. Falls back to no
    // data when the element cannot even sit in a scalar under this key.
    fn rejected_carrier(key: &Key, element: Element) -> DataTransactionResult {
        match ScalarValue::new(key.clone(), element) {
            Ok(carrier) => DataTransactionResult::fail(vec![
                facet_values::ImmutableValue::Scalar(carrier.as_immutable()),
            ]),
            Err(_) => DataTransactionResult::fail_no_data(),
        }
    }
}

impl ValueContainer for CompositeValueStore {
    fn get_value(&self, key: &Key) -> Option<Value> {
        let schema_id = self.key_index.get(key.id())?;
        self.slots.get(schema_id)?.get_value(key)
    }

    fn supports_key(&self, key: &Key) -> bool {
        self.key_index.contains_key(key.id())
    }

    fn keys(&self) -> Vec<Key> {
        self.slots.values().flat_map(|m| m.keys()).collect()
    }

    fn values(&self) -> Vec<Value> {
        self.slots.values().flat_map(|m| m.values()).collect()
    }
}

impl DataHolder for CompositeValueStore {
    fn supports(&self, schema_id: &CatalogKey) -> bool {
        self.schemas.contains_key(schema_id)
    }

    fn get_manipulator(&self, schema_id: &CatalogKey) -> Option<DataManipulator> {
        self.slots.get(schema_id).cloned()
    }

    fn offer_element(&mut self, key: &Key, element: Element) -> DataTransactionResult {
        let Some(schema) = self.schema_for_key(key).cloned() else {
            tracing::debug!(key = %key.id(), "offer for unsupported key");
            return Self::rejected_carrier(key, element);
        };
        let schema_id = CatalogType::key(schema.as_ref()).clone();
        let created = !self.slots.contains_key(&schema_id);
        let slot = self
            .slots
            .entry(schema_id.clone())
            .or_insert_with(|| DataManipulator::new(Arc::clone(&schema)));
        let replaced = match slot.get_value(key) {
            Some(old) => old.as_immutable(),
            None => {
                if created {
                    self.slots.remove(&schema_id);
                }
                return DataTransactionResult::fail_no_data();
            }
        };
        if let Err(err) = slot.set_element(key, element.clone()) {
            tracing::debug!(key = %key.id(), %err, "offer rejected");
            if created {
                self.slots.remove(&schema_id);
            }
            return Self::rejected_carrier(key, element);
        }
        let now = slot
            .get_value(key)
            .map(|v| v.as_immutable())
            .into_iter()
            .collect();
        let mut builder = DataTransactionResult::builder()
            .result(DataTransactionStatus::Success)
            .successes(now);
        // A fresh slot restores through the created_slot marker alone;
        // its defaults are not prior state.
        if created {
            builder = builder.created_slot(schema_id);
        } else {
            builder = builder.replace(replaced);
        }
        builder.build()
    }

    fn offer_with(
        &mut self,
        manipulator: DataManipulator,
        strategy: MergeStrategy,
    ) -> DataTransactionResult {
        let schema_id = manipulator.id().clone();
        if !self.supports(&schema_id) {
            tracing::debug!(schema = %schema_id, "offer for unsupported schema");
            return DataTransactionResult::fail(
                manipulator.values().iter().map(|v| v.as_immutable()).collect(),
            );
        }
        let original = self.slots.get(&schema_id).cloned();
        let merged = strategy.merge(original.as_ref(), &manipulator);
        let mut builder = DataTransactionResult::builder()
            .result(DataTransactionStatus::Success)
            .successes(merged.values().iter().map(|v| v.as_immutable()).collect());
        match &original {
            Some(prior) => {
                builder = builder
                    .replacements(prior.values().iter().map(|v| v.as_immutable()).collect());
            }
            None => {
                builder = builder.created_slot(schema_id.clone());
            }
        }
        tracing::debug!(schema = %schema_id, ?strategy, "slot offered");
        self.slots.insert(schema_id, merged);
        builder.build()
    }

    fn remove(&mut self, schema_id: &CatalogKey) -> DataTransactionResult {
        let Some(schema) = self.schemas.get(schema_id).cloned() else {
            return DataTransactionResult::fail_no_data();
        };
        let Some(slot) = self.slots.get_mut(schema_id) else {
            return DataTransactionResult::fail_no_data();
        };
        let replaced: Vec<_> = slot.values().iter().map(|v| v.as_immutable()).collect();
        if schema.is_mandatory() {
            slot.reset();
            let now = slot.values().iter().map(|v| v.as_immutable()).collect();
            tracing::debug!(schema = %schema_id, "mandatory slot reset");
            return DataTransactionResult::success_replaced(now, replaced);
        }
        self.slots.remove(schema_id);
        tracing::debug!(schema = %schema_id, "slot removed");
        DataTransactionResult::builder()
            .result(DataTransactionStatus::Success)
            .replacements(replaced)
            .removed_slot(schema_id.clone())
            .build()
    }

    fn remove_key(&mut self, key: &Key) -> DataTransactionResult {
        let Some(schema_id) = self.key_index.get(key.id()).cloned() else {
            return DataTransactionResult::fail_no_data();
        };
        let Some(slot) = self.slots.get_mut(&schema_id) else {
            return DataTransactionResult::fail_no_data();
        };
        let Some(old) = slot.get_value(key) else {
            return DataTransactionResult::fail_no_data();
        };
        if !old.exists() {
            return DataTransactionResult::fail_no_data();
        }
        let mut fresh = old.clone();
        fresh.reset();
        // Resetting to a value the slot already accepted cannot fail.
        if slot.set(fresh.clone()).is_err() {
            return DataTransactionResult::error(vec![old.as_immutable()]);
        }
        DataTransactionResult::success_replaced(
            vec![fresh.as_immutable()],
            vec![old.as_immutable()],
        )
    }

    fn undo(&mut self, result: &DataTransactionResult) -> DataTransactionResult {
        // A result rolls back only on the holder that produced it, and
        // only while its changes are still in force. Foreign and stale
        // results are a failure no-op.
        for slot_id in result.created_slots().iter().chain(result.removed_slots()) {
            if !self.supports(slot_id) {
                return DataTransactionResult::fail_no_data();
            }
        }
        for value in result.replaced() {
            if !self.supports_key(value.key()) {
                return DataTransactionResult::fail_no_data();
            }
        }
        for slot_id in result.created_slots() {
            if !self.slots.contains_key(slot_id) {
                return DataTransactionResult::fail_no_data();
            }
        }
        for slot_id in result.removed_slots() {
            if self.slots.contains_key(slot_id) {
                return DataTransactionResult::fail_no_data();
            }
        }
        for value in result.successful() {
            match self.get_value(value.key()) {
                Some(current) if current.as_immutable() == *value => {}
                _ => return DataTransactionResult::fail_no_data(),
            }
        }
        let mut folded = DataTransactionResult::builder().build();
        for slot_id in result.created_slots() {
            folded = folded.absorb(self.remove(slot_id));
        }
        for slot_id in result.removed_slots() {
            let schema = match self.schemas.get(slot_id).cloned() {
                Some(schema) => schema,
                None => return DataTransactionResult::fail_no_data(),
            };
            self.slots
                .entry(slot_id.clone())
                .or_insert_with(|| DataManipulator::new(schema));
        }
        for value in result.replaced() {
            folded = folded.absorb(self.offer_value(value.as_mutable()));
        }
        tracing::debug!(status = ?folded.status(), "transaction undone");
        folded
    }
}

impl CompositeValueStore {
    // Re-applies one prior value wholesale, used by undo.
    fn offer_value(&mut self, value: Value) -> DataTransactionResult {
        let key = value.key().clone();
        let Some(schema) = self.schema_for_key(&key).cloned() else {
            return DataTransactionResult::fail_no_data();
        };
        let schema_id = CatalogType::key(schema.as_ref()).clone();
        let created = !self.slots.contains_key(&schema_id);
        let slot = self
            .slots
            .entry(schema_id.clone())
            .or_insert_with(|| DataManipulator::new(Arc::clone(&schema)));
        let replaced = slot.get_value(&key).map(|v| v.as_immutable());
        if slot.set(value.clone()).is_err() {
            if created {
                self.slots.remove(&schema_id);
            }
            return DataTransactionResult::fail(vec![value.as_immutable()]);
        }
        let mut builder = DataTransactionResult::builder()
            .result(DataTransactionStatus::Success)
            .success(value.as_immutable());
        if created {
            builder = builder.created_slot(schema_id);
        } else if let Some(replaced) = replaced {
            builder = builder.replace(replaced);
        }
        builder.build()
    }
}
