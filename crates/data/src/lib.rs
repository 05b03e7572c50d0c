//! Manipulators, stores and transactions for the facet data system
//!
//! This crate builds the transactional layer on top of the value shapes:
//! [`ManipulatorSchema`] declares cohesive units of data,
//! [`DataManipulator`] instantiates them, [`CompositeValueStore`] and
//! [`ImmutableValueStore`] hold them, and every mutation reports through
//! a [`DataTransactionResult`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod holder;
pub mod immutable_store;
pub mod manipulator;
pub mod merge;
pub mod store;
pub mod transaction;

pub use holder::DataHolder;
pub use immutable_store::ImmutableValueStore;
pub use manipulator::{
    manipulator_id_query, DataManipulator, ImmutableDataManipulator, ManipulatorSchema,
    SchemaBuilder,
};
pub use merge::MergeStrategy;
pub use store::CompositeValueStore;
pub use transaction::{
    DataTransactionResult, DataTransactionResultBuilder, DataTransactionStatus,
};
