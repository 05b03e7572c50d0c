//! Map values
//!
//! A map value wraps a mapping from elements to elements, ordered by the
//! key element total order. The key's declared element kind constrains the
//! MAP KEYS; map payload values are free-kinded at this layer. Key, value
//! and entry views are snapshots, never live views.

use crate::base::{check_kind, BaseValue};
use facet_core::{Element, FacetResult, Key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mutable map attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapValue {
    key: Key,
    default: BTreeMap<Element, Element>,
    current: BTreeMap<Element, Element>,
}

impl MapValue {
    /// Create a map value sitting at its default
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if any default map key does not match the
    /// key's element kind.
    pub fn new(key: Key, default: BTreeMap<Element, Element>) -> FacetResult<Self> {
        for map_key in default.keys() {
            check_kind(&key, map_key)?;
        }
        Ok(MapValue {
            current: default.clone(),
            default,
            key,
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Insert or replace an entry, fluently
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch for the map key and leaves the map
    /// unchanged.
    pub fn put(&mut self, map_key: Element, value: Element) -> FacetResult<&mut Self> {
        check_kind(&self.key, &map_key)?;
        self.current.insert(map_key, value);
        Ok(self)
    }

    /// Insert or replace every entry
    ///
    /// # Errors
    ///
    /// Rejects the whole batch on the first kind mismatch; nothing is
    /// inserted.
    pub fn put_all(
        &mut self,
        entries: impl IntoIterator<Item = (Element, Element)>,
    ) -> FacetResult<&mut Self> {
        let entries: Vec<(Element, Element)> = entries.into_iter().collect();
        for (map_key, _) in &entries {
            check_kind(&self.key, map_key)?;
        }
        self.current.extend(entries);
        Ok(self)
    }

    /// Remove the entry for the map key, returning its value
    pub fn remove(&mut self, map_key: &Element) -> Option<Element> {
        self.current.remove(map_key)
    }

    /// The value for the map key, if present
    pub fn get(&self, map_key: &Element) -> Option<&Element> {
        self.current.get(map_key)
    }

    /// Whether the map carries the key
    pub fn contains_key(&self, map_key: &Element) -> bool {
        self.current.contains_key(map_key)
    }

    /// Whether any entry carries the value
    pub fn contains_value(&self, value: &Element) -> bool {
        self.current.values().any(|v| v == value)
    }

    /// A snapshot of the map keys
    pub fn map_keys(&self) -> Vec<Element> {
        self.current.keys().cloned().collect()
    }

    /// A snapshot of the map values
    pub fn map_values(&self) -> Vec<Element> {
        self.current.values().cloned().collect()
    }

    /// A snapshot of the entries
    pub fn entries(&self) -> Vec<(Element, Element)> {
        self.current
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// A copy of the backing map
    pub fn get_all(&self) -> BTreeMap<Element, Element> {
        self.current.clone()
    }

    /// Replace the whole payload
    ///
    /// # Errors
    ///
    /// Rejects the batch on kind mismatch; the payload is unchanged.
    pub fn set_all(&mut self, entries: BTreeMap<Element, Element>) -> FacetResult<&mut Self> {
        for map_key in entries.keys() {
            check_kind(&self.key, map_key)?;
        }
        self.current = entries;
        Ok(self)
    }

    /// Reset the payload to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.default.clone();
        self
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableMapValue {
        ImmutableMapValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for MapValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

/// An immutable map attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableMapValue {
    key: Key,
    default: BTreeMap<Element, Element>,
    current: BTreeMap<Element, Element>,
}

impl ImmutableMapValue {
    /// Create a map value sitting at its default
    ///
    /// # Errors
    ///
    /// As [`MapValue::new`].
    pub fn new(key: Key, default: BTreeMap<Element, Element>) -> FacetResult<Self> {
        Ok(MapValue::new(key, default)?.as_immutable())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// A new instance with the entry inserted or replaced
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch for the map key.
    pub fn with(&self, map_key: Element, value: Element) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.put(map_key, value)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance with every entry inserted or replaced
    ///
    /// # Errors
    ///
    /// Rejects the whole batch on kind mismatch.
    pub fn with_all(
        &self,
        entries: impl IntoIterator<Item = (Element, Element)>,
    ) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.put_all(entries)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance without the entry for the map key
    pub fn without(&self, map_key: &Element) -> Self {
        let mut mutable = self.as_mutable();
        mutable.remove(map_key);
        mutable.as_immutable()
    }

    /// A new instance without every entry matching the predicate
    pub fn without_all_if(&self, predicate: impl Fn(&Element, &Element) -> bool) -> Self {
        let mut mutable = self.as_mutable();
        mutable.current.retain(|k, v| !predicate(k, v));
        mutable.as_immutable()
    }

    /// The value for the map key, if present
    pub fn get(&self, map_key: &Element) -> Option<&Element> {
        self.current.get(map_key)
    }

    /// Whether the map carries the key
    pub fn contains_key(&self, map_key: &Element) -> bool {
        self.current.contains_key(map_key)
    }

    /// Whether any entry carries the value
    pub fn contains_value(&self, value: &Element) -> bool {
        self.current.values().any(|v| v == value)
    }

    /// A snapshot of the map keys
    pub fn map_keys(&self) -> Vec<Element> {
        self.current.keys().cloned().collect()
    }

    /// A snapshot of the map values
    pub fn map_values(&self) -> Vec<Element> {
        self.current.values().cloned().collect()
    }

    /// A snapshot of the entries
    pub fn entries(&self) -> Vec<(Element, Element)> {
        self.current
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// A copy of the backing map
    pub fn get_all(&self) -> BTreeMap<Element, Element> {
        self.current.clone()
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> MapValue {
        MapValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ImmutableMapValue {
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

    fn ench_key() -> Key {
        Key::new(
            CatalogKey::game("enchantments").unwrap(),
            "Enchantments",
            ElementKind::Catalog,
            ValueKind::Map,
            DataQuery::of("enchantments").unwrap(),
        )
    }

    fn ench(name: &str) -> Element {
        Element::Catalog(CatalogKey::game(name).unwrap())
    }

    fn enchantments() -> MapValue {
        MapValue::new(ench_key(), BTreeMap::new()).unwrap()
    }

    #[test]
    fn test_put_and_get() {
        let mut v = enchantments();
        v.put(ench("sharpness"), Element::Int(3)).unwrap();
        assert_eq!(v.get(&ench("sharpness")), Some(&Element::Int(3)));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_put_replaces_existing() {
        let mut v = enchantments();
        v.put(ench("sharpness"), Element::Int(3)).unwrap();
        v.put(ench("sharpness"), Element::Int(5)).unwrap();
        assert_eq!(v.get(&ench("sharpness")), Some(&Element::Int(5)));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_put_rejects_wrong_key_kind() {
        let mut v = enchantments();
        assert!(v.put(Element::Int(1), Element::Int(3)).is_err());
        assert!(v.is_empty());
    }

    #[test]
    fn test_remove_returns_value() {
        let mut v = enchantments();
        v.put(ench("sharpness"), Element::Int(3)).unwrap();
        assert_eq!(v.remove(&ench("sharpness")), Some(Element::Int(3)));
        assert!(v.remove(&ench("sharpness")).is_none());
    }

    #[test]
    fn test_contains_key_and_value() {
        let mut v = enchantments();
        v.put(ench("sharpness"), Element::Int(3)).unwrap();
        assert!(v.contains_key(&ench("sharpness")));
        assert!(v.contains_value(&Element::Int(3)));
        assert!(!v.contains_value(&Element::Int(4)));
    }

    #[test]
    fn test_views_are_snapshots() {
        let mut v = enchantments();
        v.put(ench("sharpness"), Element::Int(3)).unwrap();
        let keys = v.map_keys();
        let values = v.map_values();
        let entries = v.entries();
        v.put(ench("looting"), Element::Int(2)).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(values.len(), 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_immutable_with_and_without() {
        let v = ImmutableMapValue::new(ench_key(), BTreeMap::new()).unwrap();
        let w = v.with(ench("sharpness"), Element::Int(3)).unwrap();
        assert!(v.is_empty());
        assert_eq!(w.len(), 1);
        let x = w.without(&ench("sharpness"));
        assert!(x.is_empty());
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_immutable_without_all_if() {
        let v = ImmutableMapValue::new(ench_key(), BTreeMap::new())
            .unwrap()
            .with_all(vec![
                (ench("sharpness"), Element::Int(3)),
                (ench("looting"), Element::Int(1)),
            ])
            .unwrap();
        let trimmed = v.without_all_if(|_, level| level < &Element::Int(2));
        assert_eq!(trimmed.len(), 1);
        assert!(trimmed.contains_key(&ench("sharpness")));
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let mut v = enchantments();
        v.put(ench("sharpness"), Element::Int(3)).unwrap();
        assert_eq!(v.as_immutable().as_mutable(), v);
    }
}
