//! Error types for Facet
//!
//! This module defines the crate-wide error taxonomy. We use `thiserror`
//! for automatic `Display` and `Error` implementations.
//!
//! ## Propagation policy
//!
//! Recoverable conditions such as unsupported keys, out-of-range writes and
//! missing serialised fields surface as absent options or FAILURE transaction
//! results at the store boundary, never as `Err`. The variants here are for
//! programmer errors (duplicate registration, unknown builders, invalid
//! identifiers) and for direct low-level operations (a raw `set` on a
//! bounded value).

use crate::catalog::{CatalogKey, CatalogKeyError};
use crate::element::ElementKind;
use crate::query::QueryError;
use thiserror::Error;

/// Result type alias for Facet operations
pub type FacetResult<T> = std::result::Result<T, FacetError>;

/// Error taxonomy for the data/value core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FacetError {
    /// A module, key or catalog entry is already registered under this id
    #[error("Already registered: {0}")]
    AlreadyRegistered(CatalogKey),

    /// No builder supplier is registered for the requested builder type
    #[error("No builder supplier registered for '{0}'")]
    BuilderMissing(String),

    /// A textual catalog id failed validation
    #[error("Invalid catalog key: {0}")]
    InvalidCatalogKey(#[from] CatalogKeyError),

    /// A data query failed validation
    #[error("Invalid data query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// The holder does not admit this key
    #[error("Unsupported key: {0}")]
    UnsupportedKey(CatalogKey),

    /// The store cannot carry this manipulator type
    #[error("Unsupported manipulator: {0}")]
    UnsupportedManipulator(CatalogKey),

    /// A write to a bounded value fell outside its range
    #[error("Value out of bounds for {key}")]
    OutOfBounds {
        /// The bounded key that rejected the write
        key: CatalogKey,
    },

    /// An element of the wrong kind was offered for a key
    #[error("Element kind mismatch for {key}: expected {expected:?}, got {actual:?}")]
    KindMismatch {
        /// The key the element was offered to
        key: CatalogKey,
        /// The element kind the key declares
        expected: ElementKind,
        /// The element kind that was offered
        actual: ElementKind,
    },

    /// A serialised form is missing fields or carries incompatible types
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// An operation was invalid for the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CatalogKey {
        CatalogKey::game(name).unwrap()
    }

    #[test]
    fn test_display_already_registered() {
        let err = FacetError::AlreadyRegistered(id("log_axis"));
        assert!(err.to_string().contains("Already registered"));
        assert!(err.to_string().contains("game:log_axis"));
    }

    #[test]
    fn test_display_builder_missing() {
        let err = FacetError::BuilderMissing("ParticleEffectBuilder".into());
        assert!(err.to_string().contains("No builder supplier"));
    }

    #[test]
    fn test_display_out_of_bounds() {
        let err = FacetError::OutOfBounds { key: id("xp_level") };
        assert!(err.to_string().contains("out of bounds"));
        assert!(err.to_string().contains("xp_level"));
    }

    #[test]
    fn test_display_kind_mismatch() {
        let err = FacetError::KindMismatch {
            key: id("xp_level"),
            expected: ElementKind::Int,
            actual: ElementKind::Text,
        };
        let msg = err.to_string();
        assert!(msg.contains("Int"));
        assert!(msg.contains("Text"));
    }

    #[test]
    fn test_from_catalog_key_error() {
        let err: FacetError = CatalogKeyError::Empty.into();
        assert!(matches!(err, FacetError::InvalidCatalogKey(_)));
    }

    #[test]
    fn test_from_query_error() {
        let err: FacetError = QueryError::EmptySegment.into();
        assert!(matches!(err, FacetError::InvalidQuery(_)));
    }

    #[test]
    fn test_result_alias() {
        fn ok() -> FacetResult<i32> {
            Ok(7)
        }
        assert_eq!(ok().unwrap(), 7);
    }
}
