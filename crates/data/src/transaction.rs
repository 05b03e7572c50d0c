//! Transaction results
//!
//! Every transactional mutation on a holder reports through a
//! [`DataTransactionResult`] instead of failing loudly. The result carries
//! enough detail to inspect what changed and to undo the transaction
//! exactly: the values that were replaced, the values now in force, the
//! values the holder rejected, and the slots the transaction created or
//! emptied.

use facet_core::CatalogKey;
use facet_values::ImmutableValue;

/// The overall outcome of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTransactionStatus {
    /// The result has not been set yet
    Undefined,
    /// Every offered value was accepted
    Success,
    /// The holder rejected the offered data
    Failure,
    /// The transaction broke off in an unexpected state
    Error,
    /// An outside party cancelled the transaction
    Cancelled,
}

impl DataTransactionStatus {
    /// Whether the transaction applied
    pub fn is_successful(&self) -> bool {
        matches!(self, DataTransactionStatus::Success)
    }
}

/// What a transactional mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTransactionResult {
    status: DataTransactionStatus,
    replaced: Vec<ImmutableValue>,
    successful: Vec<ImmutableValue>,
    rejected: Vec<ImmutableValue>,
    created_slots: Vec<CatalogKey>,
    removed_slots: Vec<CatalogKey>,
}

impl DataTransactionResult {
    /// Start building a result
    pub fn builder() -> DataTransactionResultBuilder {
        DataTransactionResultBuilder {
            inner: DataTransactionResult {
                status: DataTransactionStatus::Undefined,
                replaced: Vec::new(),
                successful: Vec::new(),
                rejected: Vec::new(),
                created_slots: Vec::new(),
                removed_slots: Vec::new(),
            },
        }
    }

    /// A successful result carrying the values now in force
    pub fn success(successful: Vec<ImmutableValue>) -> Self {
        Self::builder()
            .result(DataTransactionStatus::Success)
            .successes(successful)
            .build()
    }

    /// A successful result that replaced prior values
    pub fn success_replaced(successful: Vec<ImmutableValue>, replaced: Vec<ImmutableValue>) -> Self {
        Self::builder()
            .result(DataTransactionStatus::Success)
            .successes(successful)
            .replacements(replaced)
            .build()
    }

    /// A failure carrying the values the holder turned away
    pub fn fail(rejected: Vec<ImmutableValue>) -> Self {
        Self::builder()
            .result(DataTransactionStatus::Failure)
            .rejections(rejected)
            .build()
    }

    /// A failure where there was nothing to act on
    pub fn fail_no_data() -> Self {
        Self::builder().result(DataTransactionStatus::Failure).build()
    }

    /// An erroneous result carrying the values involved
    pub fn error(rejected: Vec<ImmutableValue>) -> Self {
        Self::builder()
            .result(DataTransactionStatus::Error)
            .rejections(rejected)
            .build()
    }

    /// The overall outcome
    pub fn status(&self) -> DataTransactionStatus {
        self.status
    }

    /// Whether the transaction applied
    pub fn is_successful(&self) -> bool {
        self.status.is_successful()
    }

    /// Values that were in force before and got replaced
    pub fn replaced(&self) -> &[ImmutableValue] {
        &self.replaced
    }

    /// Values now in force because of the transaction
    pub fn successful(&self) -> &[ImmutableValue] {
        &self.successful
    }

    /// Values the holder turned away
    pub fn rejected(&self) -> &[ImmutableValue] {
        &self.rejected
    }

    /// Manipulator slots the transaction created
    pub fn created_slots(&self) -> &[CatalogKey] {
        &self.created_slots
    }

    /// Manipulator slots the transaction emptied
    pub fn removed_slots(&self) -> &[CatalogKey] {
        &self.removed_slots
    }

    /// Fold another result into this one
    ///
    /// List contents concatenate. The combined status is the weaker of the
    /// two: any non-success poisons the whole.
    pub fn absorb(mut self, other: DataTransactionResult) -> Self {
        self.status = match (self.status, other.status) {
            (DataTransactionStatus::Undefined, s) => s,
            (s, DataTransactionStatus::Undefined) => s,
            (DataTransactionStatus::Success, s) => s,
            (s, _) => s,
        };
        self.replaced.extend(other.replaced);
        self.successful.extend(other.successful);
        self.rejected.extend(other.rejected);
        self.created_slots.extend(other.created_slots);
        self.removed_slots.extend(other.removed_slots);
        self
    }
}

/// Builder for [`DataTransactionResult`]
#[derive(Debug)]
pub struct DataTransactionResultBuilder {
    inner: DataTransactionResult,
}

impl DataTransactionResultBuilder {
    /// Set the overall outcome
    pub fn result(mut self, status: DataTransactionStatus) -> Self {
        self.inner.status = status;
        self
    }

    /// Record one replaced value
    pub fn replace(mut self, value: ImmutableValue) -> Self {
        self.inner.replaced.push(value);
        self
    }

    /// Record replaced values
    pub fn replacements(mut self, values: Vec<ImmutableValue>) -> Self {
        self.inner.replaced.extend(values);
        self
    }

    /// Record one value now in force
    pub fn success(mut self, value: ImmutableValue) -> Self {
        self.inner.successful.push(value);
        self
    }

    /// Record values now in force
    pub fn successes(mut self, values: Vec<ImmutableValue>) -> Self {
        self.inner.successful.extend(values);
        self
    }

    /// Record one rejected value
    pub fn reject(mut self, value: ImmutableValue) -> Self {
        self.inner.rejected.push(value);
        self
    }

    /// Record rejected values
    pub fn rejections(mut self, values: Vec<ImmutableValue>) -> Self {
        self.inner.rejected.extend(values);
        self
    }

    /// Record a slot the transaction created
    pub fn created_slot(mut self, id: CatalogKey) -> Self {
        self.inner.created_slots.push(id);
        self
    }

    /// Record a slot the transaction emptied
    pub fn removed_slot(mut self, id: CatalogKey) -> Self {
        self.inner.removed_slots.push(id);
        self
    }

    /// Finish the result
    pub fn build(self) -> DataTransactionResult {
        self.inner
    }
}
