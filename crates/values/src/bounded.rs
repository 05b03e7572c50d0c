//! Bounded scalar values
//!
//! A bounded value is a scalar constrained to `[min, max]` under the
//! element total order. Construction enforces `min <= default <= max`;
//! writes outside the range are rejected and leave the value unchanged.
//! At the store boundary an out-of-range offer surfaces as a FAILURE
//! transaction result; a direct `set` here returns the error.

use crate::base::{check_kind, BaseValue};
use facet_core::{Element, FacetError, FacetResult, Key};
use serde::{Deserialize, Serialize};

/// A mutable bounded attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedValue {
    key: Key,
    default: Element,
    current: Element,
    min: Element,
    max: Element,
}

impl BoundedValue {
    /// Create a bounded value sitting at its default
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if any element does not match the key, an
    /// invalid-operation error if `min > max`, or out-of-bounds if the
    /// default falls outside the range.
    pub fn new(key: Key, default: Element, min: Element, max: Element) -> FacetResult<Self> {
        check_kind(&key, &default)?;
        check_kind(&key, &min)?;
        check_kind(&key, &max)?;
        if min > max {
            return Err(FacetError::InvalidOperation(format!(
                "bounded value {} has min above max",
                key.id()
            )));
        }
        if default < min || default > max {
            return Err(FacetError::OutOfBounds {
                key: key.id().clone(),
            });
        }
        Ok(BoundedValue {
            current: default.clone(),
            default,
            min,
            max,
            key,
        })
    }

    /// Create a bounded value with an explicit current element
    ///
    /// # Errors
    ///
    /// As [`BoundedValue::new`], plus out-of-bounds if the current element
    /// falls outside the range.
    pub fn with_current(
        key: Key,
        default: Element,
        current: Element,
        min: Element,
        max: Element,
    ) -> FacetResult<Self> {
        let mut value = BoundedValue::new(key, default, min, max)?;
        value.set(current)?;
        Ok(value)
    }

    /// The current element
    pub fn get(&self) -> &Element {
        &self.current
    }

    /// The default element
    pub fn get_default(&self) -> &Element {
        &self.default
    }

    /// The inclusive lower bound
    pub fn min_value(&self) -> &Element {
        &self.min
    }

    /// The inclusive upper bound
    pub fn max_value(&self) -> &Element {
        &self.max
    }

    /// Whether an element lies inside `[min, max]`
    pub fn in_range(&self, element: &Element) -> bool {
        element >= &self.min && element <= &self.max
    }

    /// Set the current element in place, fluently
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch or out-of-bounds and leaves the value
    /// unchanged.
    pub fn set(&mut self, element: Element) -> FacetResult<&mut Self> {
        check_kind(&self.key, &element)?;
        if !self.in_range(&element) {
            return Err(FacetError::OutOfBounds {
                key: self.key.id().clone(),
            });
        }
        self.current = element;
        Ok(self)
    }

    /// Reset the current element to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.default.clone();
        self
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableBoundedValue {
        ImmutableBoundedValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }
}

impl BaseValue for BoundedValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

/// An immutable bounded attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableBoundedValue {
    key: Key,
    default: Element,
    current: Element,
    min: Element,
    max: Element,
}

impl ImmutableBoundedValue {
    /// Create a bounded value sitting at its default
    ///
    /// # Errors
    ///
    /// As [`BoundedValue::new`].
    pub fn new(key: Key, default: Element, min: Element, max: Element) -> FacetResult<Self> {
        Ok(BoundedValue::new(key, default, min, max)?.as_immutable())
    }

    /// The current element
    pub fn get(&self) -> &Element {
        &self.current
    }

    /// The default element
    pub fn get_default(&self) -> &Element {
        &self.default
    }

    /// The inclusive lower bound
    pub fn min_value(&self) -> &Element {
        &self.min
    }

    /// The inclusive upper bound
    pub fn max_value(&self) -> &Element {
        &self.max
    }

    /// A new instance carrying the given element
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch or out-of-bounds; the receiver is never
    /// altered.
    pub fn with(&self, element: Element) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.set(element)?;
        Ok(mutable.as_immutable())
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> BoundedValue {
        BoundedValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }
}

impl BaseValue for ImmutableBoundedValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::{CatalogKey, DataQuery, ElementKind, ValueKind};

    fn level_key() -> Key {
        Key::new(
            CatalogKey::game("xp_level").unwrap(),
            "Experience Level",
            ElementKind::Int,
            ValueKind::Bounded,
            DataQuery::of("xp.level").unwrap(),
        )
    }

    fn level(v: i64) -> BoundedValue {
        let mut value =
            BoundedValue::new(level_key(), Element::Int(0), Element::Int(0), Element::Int(30))
                .unwrap();
        value.set(Element::Int(v)).unwrap();
        value
    }

    // === Construction ===

    #[test]
    fn test_new_validates_range_order() {
        let err = BoundedValue::new(
            level_key(),
            Element::Int(0),
            Element::Int(10),
            Element::Int(5),
        );
        assert!(matches!(err, Err(FacetError::InvalidOperation(_))));
    }

    #[test]
    fn test_new_rejects_default_outside_range() {
        let err = BoundedValue::new(
            level_key(),
            Element::Int(99),
            Element::Int(0),
            Element::Int(30),
        );
        assert!(matches!(err, Err(FacetError::OutOfBounds { .. })));
    }

    #[test]
    fn test_bounds_accessors() {
        let v = level(10);
        assert_eq!(v.min_value(), &Element::Int(0));
        assert_eq!(v.max_value(), &Element::Int(30));
    }

    // === Writes ===

    #[test]
    fn test_set_inside_range_succeeds() {
        let mut v = level(10);
        v.set(Element::Int(30)).unwrap();
        assert_eq!(v.get(), &Element::Int(30));
    }

    #[test]
    fn test_set_outside_range_fails_and_preserves_current() {
        let mut v = level(10);
        let err = v.set(Element::Int(31));
        assert!(matches!(err, Err(FacetError::OutOfBounds { .. })));
        assert_eq!(v.get(), &Element::Int(10));
    }

    #[test]
    fn test_set_below_range_fails() {
        let mut v = level(10);
        assert!(v.set(Element::Int(-1)).is_err());
        assert_eq!(v.get(), &Element::Int(10));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let mut v = level(10);
        assert!(v.set(Element::Int(0)).is_ok());
        assert!(v.set(Element::Int(30)).is_ok());
    }

    #[test]
    fn test_set_rejects_wrong_kind() {
        let mut v = level(10);
        assert!(matches!(
            v.set(Element::Float(5.0)),
            Err(FacetError::KindMismatch { .. })
        ));
    }

    // === Immutable sibling ===

    #[test]
    fn test_immutable_with_respects_bounds() {
        let v = level(10).as_immutable();
        assert!(v.with(Element::Int(31)).is_err());
        let w = v.with(Element::Int(5)).unwrap();
        assert_eq!(v.get(), &Element::Int(10));
        assert_eq!(w.get(), &Element::Int(5));
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let v = level(7);
        assert_eq!(v.as_immutable().as_mutable(), v);
    }

    #[test]
    fn test_exists_tracks_default() {
        let v = level(0);
        assert!(!v.exists());
        assert!(level(1).exists());
    }
}
