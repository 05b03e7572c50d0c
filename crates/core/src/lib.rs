//! Core types for Facet
//!
//! This crate defines the foundational types used throughout the system:
//! - CatalogKey / CatalogType: process-wide textual identity
//! - Element / ElementKind: the scalar payload model
//! - Key / ValueKind: attribute identifiers with element and shape metadata
//! - DataQuery / DataView / DataContainer: the self-describing tree
//! - FacetError: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod container;
pub mod element;
pub mod error;
pub mod key;
pub mod query;

pub use catalog::{CatalogEntry, CatalogKey, CatalogKeyError, CatalogType, DEFAULT_NAMESPACE};
pub use container::{content_version_query, DataContainer, DataSerializable, DataView};
pub use element::{Element, ElementKind, PatternLayer};
pub use error::{FacetError, FacetResult};
pub use key::{Key, ValueKind};
pub use query::{DataQuery, QueryError};
