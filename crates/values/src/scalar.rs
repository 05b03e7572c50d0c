//! Scalar values
//!
//! The simplest shape: one element, one default. The mutable and immutable
//! variants are independent concrete types; converting between them copies
//! the payload.

use crate::base::{check_kind, BaseValue};
use facet_core::{Element, FacetResult, Key};
use serde::{Deserialize, Serialize};

/// A mutable scalar attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarValue {
    key: Key,
    default: Element,
    current: Element,
}

impl ScalarValue {
    /// Create a value sitting at its default
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if the default does not match the key's
    /// element kind.
    pub fn new(key: Key, default: Element) -> FacetResult<Self> {
        check_kind(&key, &default)?;
        Ok(ScalarValue {
            current: default.clone(),
            default,
            key,
        })
    }

    /// Create a value with an explicit current element
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if either element does not match the key.
    pub fn with_current(key: Key, default: Element, current: Element) -> FacetResult<Self> {
        check_kind(&key, &default)?;
        check_kind(&key, &current)?;
        Ok(ScalarValue {
            key,
            default,
            current,
        })
    }

    /// The current element
    pub fn get(&self) -> &Element {
        &self.current
    }

    /// The default element
    pub fn get_default(&self) -> &Element {
        &self.default
    }

    /// Set the current element in place, fluently
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch and leaves the value unchanged if the
    /// element does not match the key.
    pub fn set(&mut self, element: Element) -> FacetResult<&mut Self> {
        check_kind(&self.key, &element)?;
        self.current = element;
        Ok(self)
    }

    /// Reset the current element to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.default.clone();
        self
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableScalarValue {
        ImmutableScalarValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ScalarValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

/// An immutable scalar attribute value
///
/// All modifiers return new instances; the receiver is never altered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableScalarValue {
    key: Key,
    default: Element,
    current: Element,
}

impl ImmutableScalarValue {
    /// Create a value sitting at its default
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if the default does not match the key.
    pub fn new(key: Key, default: Element) -> FacetResult<Self> {
        Ok(ScalarValue::new(key, default)?.as_immutable())
    }

    /// The current element
    pub fn get(&self) -> &Element {
        &self.current
    }

    /// The default element
    pub fn get_default(&self) -> &Element {
        &self.default
    }

    /// A new instance carrying the given element
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if the element does not match the key.
    pub fn with(&self, element: Element) -> FacetResult<Self> {
        check_kind(&self.key, &element)?;
        Ok(ImmutableScalarValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: element,
        })
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> ScalarValue {
        ScalarValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ImmutableScalarValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}
