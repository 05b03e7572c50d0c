//! The mutable data holder surface
//!
//! A holder owns manipulator slots and accepts or refuses offered data
//! transactionally. Recoverable refusals travel through
//! [`DataTransactionResult`]; only programmer errors surface as `Err`.

use crate::manipulator::DataManipulator;
use crate::merge::MergeStrategy;
use crate::transaction::DataTransactionResult;
use facet_core::{CatalogKey, Element, Key};
use facet_values::ValueContainer;

/// A mutable owner of manipulator slots
pub trait DataHolder: ValueContainer {
    /// Whether this holder admits the schema at all
    fn supports(&self, schema_id: &CatalogKey) -> bool;

    /// A copy of the resident manipulator, if the slot is filled
    fn get_manipulator(&self, schema_id: &CatalogKey) -> Option<DataManipulator>;

    /// Offer a single element for the key
    ///
    /// Creates the owning slot at defaults when absent. Unsupported keys
    /// and invalid elements report as failures, never as errors.
    fn offer_element(&mut self, key: &Key, element: Element) -> DataTransactionResult;

    /// Offer a manipulator, merging with [`MergeStrategy::Overwrite`]
    fn offer(&mut self, manipulator: DataManipulator) -> DataTransactionResult {
        self.offer_with(manipulator, MergeStrategy::Overwrite)
    }

    /// Offer a manipulator under an explicit merge strategy
    fn offer_with(
        &mut self,
        manipulator: DataManipulator,
        strategy: MergeStrategy,
    ) -> DataTransactionResult;

    /// Offer the whole batch, atomically
    ///
    /// Either every manipulator applies (SUCCESS, folded results) or none
    /// does: on the first rejection the offers already applied roll back
    /// and the failure reports every input under `rejected`.
    fn offer_all(
        &mut self,
        manipulators: impl IntoIterator<Item = DataManipulator>,
    ) -> DataTransactionResult
    where
        Self: Sized,
    {
        let manipulators: Vec<DataManipulator> = manipulators.into_iter().collect();
        let mut applied: Vec<DataTransactionResult> = Vec::new();
        for manipulator in &manipulators {
            let result = self.offer(manipulator.clone());
            if !result.is_successful() {
                for prior in applied.iter().rev() {
                    self.undo(prior);
                }
                let rejected = manipulators
                    .iter()
                    .flat_map(|m| m.values().into_iter().map(|v| v.as_immutable()))
                    .collect();
                return DataTransactionResult::fail(rejected);
            }
            applied.push(result);
        }
        let mut folded = DataTransactionResult::builder().build();
        for result in applied {
            folded = folded.absorb(result);
        }
        folded
    }

    /// Empty the slot for the schema
    ///
    /// Mandatory slots reset to their defaults instead of emptying. An
    /// absent slot is a failure with no data.
    fn remove(&mut self, schema_id: &CatalogKey) -> DataTransactionResult;

    /// Empty the whole batch of slots, atomically
    ///
    /// Either every slot empties (SUCCESS, folded results) or none does:
    /// on the first refusal the removals already applied roll back and
    /// the call reports a failure with no data.
    fn remove_all<'a>(
        &mut self,
        schema_ids: impl IntoIterator<Item = &'a CatalogKey>,
    ) -> DataTransactionResult
    where
        Self: Sized,
    {
        let mut applied: Vec<DataTransactionResult> = Vec::new();
        for schema_id in schema_ids {
            let result = self.remove(schema_id);
            if !result.is_successful() {
                for prior in applied.iter().rev() {
                    self.undo(prior);
                }
                return DataTransactionResult::fail_no_data();
            }
            applied.push(result);
        }
        let mut folded = DataTransactionResult::builder().build();
        for result in applied {
            folded = folded.absorb(result);
        }
        folded
    }

    /// Reset the value for the key to its default
    ///
    /// A value already at its default is a failure with no data.
    fn remove_key(&mut self, key: &Key) -> DataTransactionResult;

    /// Roll back a transaction this holder produced
    ///
    /// The result must relate to this holder and its changes must still
    /// be in force. A foreign or stale result touches nothing and comes
    /// back as a failure with no data.
    fn undo(&mut self, result: &DataTransactionResult) -> DataTransactionResult;
}
