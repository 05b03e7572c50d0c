//! Facet: typed, transactional attribute data for game objects
//!
//! Facet models the data attached to game objects as keyed, shaped
//! values: a [`Key`] names an attribute and its shape, a
//! [`ManipulatorSchema`] groups keys into cohesive units, and holders
//! such as [`CompositeValueStore`] accept or refuse offered data through
//! [`DataTransactionResult`]s that can be undone exactly.
//!
//! The crate is a facade over the workspace members:
//!
//! * `facet-core`: catalog identity, elements, keys, data containers.
//! * `facet-values`: the six value shapes and their immutable twins.
//! * `facet-data`: manipulators, merge strategies, transactional stores.
//! * `facet-registry`: the content registry and built-in game content.
//!
//! ```
//! use facetdb::data::DataHolder;
//! use facetdb::values::ValueContainer;
//! use facetdb::core::Element;
//! use facetdb::registry::content;
//!
//! let mut store = facetdb::data::CompositeValueStore::new(content::registry().schemas());
//! let level = content::experience_level_key();
//! assert!(store.offer_element(&level, Element::Int(7)).is_successful());
//! assert_eq!(store.get_element(&level), Some(Element::Int(7)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use facet_core as core;
pub use facet_data as data;
pub use facet_registry as registry;
pub use facet_values as values;

pub use facet_core::{
    CatalogEntry, CatalogKey, CatalogType, DataContainer, DataQuery, DataSerializable, DataView,
    Element, ElementKind, FacetError, FacetResult, Key, PatternLayer, ValueKind,
};
pub use facet_data::{
    CompositeValueStore, DataHolder, DataManipulator, DataTransactionResult,
    DataTransactionStatus, ImmutableDataManipulator, ImmutableValueStore, ManipulatorSchema,
    MergeStrategy,
};
pub use facet_registry::{CatalogRegistryModule, GameRegistry};
pub use facet_values::{BaseValue, ImmutableValue, Value, ValueContainer};
