//! Set values
//!
//! A set value wraps a deduplicated collection of elements ordered by the
//! element total order. Re-adding a present element is a no-op, per the
//! backing shape's duplicate policy.

use crate::base::{check_kind, BaseValue};
use facet_core::{Element, FacetResult, Key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A mutable set attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetValue {
    key: Key,
    default: BTreeSet<Element>,
    current: BTreeSet<Element>,
}

impl SetValue {
    /// Create a set value sitting at its default
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if any default element does not match the
    /// key's element kind.
    pub fn new(key: Key, default: BTreeSet<Element>) -> FacetResult<Self> {
        for element in &default {
            check_kind(&key, element)?;
        }
        Ok(SetValue {
            current: default.clone(),
            default,
            key,
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Insert one element, fluently; present elements dedupe
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch and leaves the set unchanged.
    pub fn add(&mut self, element: Element) -> FacetResult<&mut Self> {
        check_kind(&self.key, &element)?;
        self.current.insert(element);
        Ok(self)
    }

    /// Insert every element; present elements dedupe
    ///
    /// # Errors
    ///
    /// Rejects the whole batch on the first kind mismatch; nothing is
    /// inserted.
    pub fn add_all(&mut self, elements: impl IntoIterator<Item = Element>) -> FacetResult<&mut Self> {
        let elements: Vec<Element> = elements.into_iter().collect();
        for element in &elements {
            check_kind(&self.key, element)?;
        }
        self.current.extend(elements);
        Ok(self)
    }

    /// Remove the element if present
    pub fn remove(&mut self, element: &Element) -> &mut Self {
        self.current.remove(element);
        self
    }

    /// Remove each given element
    pub fn remove_all<'a>(&mut self, elements: impl IntoIterator<Item = &'a Element>) -> &mut Self {
        for element in elements {
            self.current.remove(element);
        }
        self
    }

    /// Remove every element matching the predicate
    pub fn remove_if(&mut self, predicate: impl Fn(&Element) -> bool) -> &mut Self {
        self.current.retain(|e| !predicate(e));
        self
    }

    /// Replace the whole payload
    ///
    /// # Errors
    ///
    /// Rejects the batch on kind mismatch; the payload is unchanged.
    pub fn set_all(&mut self, elements: BTreeSet<Element>) -> FacetResult<&mut Self> {
        for element in &elements {
            check_kind(&self.key, element)?;
        }
        self.current = elements;
        Ok(self)
    }

    /// A new value keeping only elements matching the predicate
    ///
    /// The receiver is not mutated.
    pub fn filter(&self, predicate: impl Fn(&Element) -> bool) -> Self {
        SetValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.iter().filter(|e| predicate(e)).cloned().collect(),
        }
    }

    /// Whether the set contains the element
    pub fn contains(&self, element: &Element) -> bool {
        self.current.contains(element)
    }

    /// Whether the set contains every given element
    pub fn contains_all<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) -> bool {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// A copy of the backing set
    pub fn get_all(&self) -> BTreeSet<Element> {
        self.current.clone()
    }

    /// Iterate the elements in order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.current.iter()
    }

    /// Reset the payload to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.default.clone();
        self
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableSetValue {
        ImmutableSetValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for SetValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

/// An immutable set attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableSetValue {
    key: Key,
    default: BTreeSet<Element>,
    current: BTreeSet<Element>,
}

impl ImmutableSetValue {
    /// Create a set value sitting at its default
    ///
    /// # Errors
    ///
    /// As [`SetValue::new`].
    pub fn new(key: Key, default: BTreeSet<Element>) -> FacetResult<Self> {
        Ok(SetValue::new(key, default)?.as_immutable())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// A new instance with the element inserted
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch; the receiver is never altered.
    pub fn with(&self, element: Element) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.add(element)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance with every element inserted
    ///
    /// # Errors
    ///
    /// Rejects the whole batch on kind mismatch.
    pub fn with_all(&self, elements: impl IntoIterator<Item = Element>) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.add_all(elements)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance without the element
    pub fn without(&self, element: &Element) -> Self {
        let mut mutable = self.as_mutable();
        mutable.remove(element);
        mutable.as_immutable()
    }

    /// A new instance without each given element
    pub fn without_all<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) -> Self {
        let mut mutable = self.as_mutable();
        mutable.remove_all(elements);
        mutable.as_immutable()
    }

    /// A new instance without every element matching the predicate
    pub fn without_all_if(&self, predicate: impl Fn(&Element) -> bool) -> Self {
        let mut mutable = self.as_mutable();
        mutable.remove_if(predicate);
        mutable.as_immutable()
    }

    /// A new instance keeping only elements matching the predicate
    pub fn filter(&self, predicate: impl Fn(&Element) -> bool) -> Self {
        self.as_mutable().filter(predicate).as_immutable()
    }

    /// Whether the set contains the element
    pub fn contains(&self, element: &Element) -> bool {
        self.current.contains(element)
    }

    /// Whether the set contains every given element
    pub fn contains_all<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) -> bool {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// A copy of the backing set
    pub fn get_all(&self) -> BTreeSet<Element> {
        self.current.clone()
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> SetValue {
        SetValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ImmutableSetValue {
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

    fn tags_key() -> Key {
        Key::new(
            CatalogKey::game("tags").unwrap(),
            "Tags",
            ElementKind::Text,
            ValueKind::Set,
            DataQuery::of("tags").unwrap(),
        )
    }

    fn tags() -> SetValue {
        SetValue::new(tags_key(), BTreeSet::new()).unwrap()
    }

    fn text(s: &str) -> Element {
        Element::Text(s.into())
    }

    #[test]
    fn test_add_dedupes() {
        let mut v = tags();
        v.add(text("a")).unwrap().add(text("a")).unwrap();
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_add_rejects_wrong_kind() {
        let mut v = tags();
        assert!(v.add(Element::Int(1)).is_err());
        assert!(v.is_empty());
    }

    #[test]
    fn test_remove_and_contains() {
        let mut v = tags();
        v.add_all(vec![text("a"), text("b")]).unwrap();
        v.remove(&text("a"));
        assert!(!v.contains(&text("a")));
        assert!(v.contains(&text("b")));
    }

    #[test]
    fn test_iteration_order_is_element_order() {
        let mut v = tags();
        v.add_all(vec![text("b"), text("a")]).unwrap();
        let all: Vec<Element> = v.iter().cloned().collect();
        assert_eq!(all, vec![text("a"), text("b")]);
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let mut v = tags();
        v.add_all(vec![text("a"), text("b")]).unwrap();
        let filtered = v.filter(|e| e.as_text() == Some("b"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_content() {
        let mut v = tags();
        v.add(text("a")).unwrap();
        let before = v.clone();
        v.add(text("x")).unwrap();
        v.remove(&text("x"));
        assert_eq!(v, before);
    }

    #[test]
    fn test_immutable_with_dedupes() {
        let v = ImmutableSetValue::new(tags_key(), BTreeSet::new()).unwrap();
        let w = v.with(text("a")).unwrap().with(text("a")).unwrap();
        assert_eq!(w.len(), 1);
        assert!(v.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let mut v = tags();
        v.add_all(vec![text("a"), text("b")]).unwrap();
        assert_eq!(v.as_immutable().as_mutable(), v);
    }
}
