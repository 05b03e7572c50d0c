//! Common read surface for values and containers
//!
//! Every value shape, mutable or immutable, exposes its owning key and
//! whether it currently differs from its default. Anything that holds a set
//! of keyed values (manipulators, stores) is a [`ValueContainer`].

use crate::value::Value;
use facet_core::{Element, FacetError, FacetResult, Key};

/// Reject elements whose kind does not match the key's declared kind
pub(crate) fn check_kind(key: &Key, element: &Element) -> FacetResult<()> {
    if element.kind() != key.element_kind() {
        return Err(FacetError::KindMismatch {
            key: key.id().clone(),
            expected: key.element_kind(),
            actual: element.kind(),
        });
    }
    Ok(())
}

/// Read-only surface shared by all value shapes
pub trait BaseValue {
    /// The key this value belongs to
    fn key(&self) -> &Key;

    /// Whether the current payload differs from the default
    fn exists(&self) -> bool;
}

/// A read-only view over a set of keyed values
///
/// A container only contains "data": it is not known from this trait
/// whether the underlying store is mutable. Returned values are copies;
/// mutating them never affects the container.
pub trait ValueContainer {
    /// A copy of the value for the key, if present and supported
    fn get_value(&self, key: &Key) -> Option<Value>;

    /// Whether this container admits the key at all
    fn supports_key(&self, key: &Key) -> bool;

    /// The keys this container currently carries
    fn keys(&self) -> Vec<Key>;

    /// Copies of all values this container currently carries
    fn values(&self) -> Vec<Value>;

    /// The scalar element for the key, if present and scalar-shaped
    fn get_element(&self, key: &Key) -> Option<Element> {
        self.get_value(key).and_then(|v| v.element().cloned())
    }

    /// The scalar element for the key, or the given default
    fn get_or_else(&self, key: &Key, default: Element) -> Element {
        self.get_element(key).unwrap_or(default)
    }

    /// Alias of [`ValueContainer::get_element`] for call sites that pair
    /// it with [`ValueContainer::get_or_else`]
    fn get_or_none(&self, key: &Key) -> Option<Element> {
        self.get_element(key)
    }
}
