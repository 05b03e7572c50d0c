//! Single-dispatch value enums
//!
//! Heterogeneous values travel through the system as [`Value`] and
//! [`ImmutableValue`]: one tagged variant per shape. Stores, manipulators
//! and transaction results hold these; the concrete shape types stay
//! available through the `as_*` accessors.

use crate::base::BaseValue;
use crate::bounded::{BoundedValue, ImmutableBoundedValue};
use crate::list::{ImmutableListValue, ListValue};
use crate::map::{ImmutableMapValue, MapValue};
use crate::pattern::{ImmutablePatternListValue, PatternListValue};
use crate::scalar::{ImmutableScalarValue, ScalarValue};
use crate::set::{ImmutableSetValue, SetValue};
use facet_core::{
    DataView, Element, FacetError, FacetResult, Key, PatternLayer, ValueKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mutable value of any shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A scalar value
    Scalar(ScalarValue),
    /// A bounded scalar value
    Bounded(BoundedValue),
    /// An ordered list value
    List(ListValue),
    /// A set value
    Set(SetValue),
    /// A map value
    Map(MapValue),
    /// A positional pattern list value
    PatternList(PatternListValue),
}

impl Value {
    /// The shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Bounded(_) => ValueKind::Bounded,
            Value::List(_) => ValueKind::List,
            Value::Set(_) => ValueKind::Set,
            Value::Map(_) => ValueKind::Map,
            Value::PatternList(_) => ValueKind::PatternList,
        }
    }

    /// The current element, for scalar-shaped values
    pub fn element(&self) -> Option<&Element> {
        match self {
            Value::Scalar(v) => Some(v.get()),
            Value::Bounded(v) => Some(v.get()),
            _ => None,
        }
    }

    /// Set the current element, for scalar-shaped values
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch or out-of-bounds for scalar shapes, and an
    /// invalid-operation error for collection shapes.
    pub fn set_element(&mut self, element: Element) -> FacetResult<()> {
        match self {
            Value::Scalar(v) => {
                v.set(element)?;
                Ok(())
            }
            Value::Bounded(v) => {
                v.set(element)?;
                Ok(())
            }
            other => Err(FacetError::InvalidOperation(format!(
                "cannot set a single element on a {} value",
                other.kind().name()
            ))),
        }
    }

    /// Reset the payload to the shape's default
    pub fn reset(&mut self) {
        match self {
            Value::Scalar(v) => {
                v.reset();
            }
            Value::Bounded(v) => {
                v.reset();
            }
            Value::List(v) => {
                v.reset();
            }
            Value::Set(v) => {
                v.reset();
            }
            Value::Map(v) => {
                v.reset();
            }
            Value::PatternList(v) => {
                v.reset();
            }
        }
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableValue {
        match self {
            Value::Scalar(v) => ImmutableValue::Scalar(v.as_immutable()),
            Value::Bounded(v) => ImmutableValue::Bounded(v.as_immutable()),
            Value::List(v) => ImmutableValue::List(v.as_immutable()),
            Value::Set(v) => ImmutableValue::Set(v.as_immutable()),
            Value::Map(v) => ImmutableValue::Map(v.as_immutable()),
            Value::PatternList(v) => ImmutableValue::PatternList(v.as_immutable()),
        }
    }

    /// Get as scalar value if this is a Scalar
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Value::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Get as bounded value if this is a Bounded
    pub fn as_bounded(&self) -> Option<&BoundedValue> {
        match self {
            Value::Bounded(v) => Some(v),
            _ => None,
        }
    }

    /// Get as list value if this is a List
    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Get as set value if this is a Set
    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Value::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Get as map value if this is a Map
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Get as pattern list value if this is a PatternList
    pub fn as_pattern_list(&self) -> Option<&PatternListValue> {
        match self {
            Value::PatternList(v) => Some(v),
            _ => None,
        }
    }

    /// Get as mutable pattern list value if this is a PatternList
    pub fn as_pattern_list_mut(&mut self) -> Option<&mut PatternListValue> {
        match self {
            Value::PatternList(v) => Some(v),
            _ => None,
        }
    }

    /// Serialise the current payload into a data tree node
    pub fn to_view(&self) -> DataView {
        match self {
            Value::Scalar(v) => DataView::Element(v.get().clone()),
            Value::Bounded(v) => DataView::Element(v.get().clone()),
            Value::List(v) => {
                DataView::List(v.get_all().into_iter().map(DataView::Element).collect())
            }
            Value::Set(v) => {
                DataView::List(v.get_all().into_iter().map(DataView::Element).collect())
            }
            Value::Map(v) => DataView::List(
                v.entries()
                    .into_iter()
                    .map(|(k, val)| {
                        let mut entry = BTreeMap::new();
                        entry.insert("key".to_string(), DataView::Element(k));
                        entry.insert("value".to_string(), DataView::Element(val));
                        DataView::Map(entry)
                    })
                    .collect(),
            ),
            Value::PatternList(v) => DataView::List(
                v.get_all()
                    .into_iter()
                    .map(|layer| {
                        let mut entry = BTreeMap::new();
                        entry.insert(
                            "shape".to_string(),
                            DataView::Element(Element::Catalog(layer.shape)),
                        );
                        entry.insert(
                            "color".to_string(),
                            DataView::Element(Element::Catalog(layer.color)),
                        );
                        DataView::Map(entry)
                    })
                    .collect(),
            ),
        }
    }

    /// Rebuild a value from a prototype and a serialised payload
    ///
    /// The prototype supplies the key, defaults and bounds; the view
    /// supplies the current payload. Returns `None` for missing fields,
    /// wrong node shapes, kind mismatches or out-of-range bounded payloads
    /// (malformed data never panics and never half-applies).
    pub fn from_view(prototype: &Value, view: &DataView) -> Option<Value> {
        let mut value = prototype.clone();
        value.reset();
        match &mut value {
            Value::Scalar(v) => {
                v.set(view.as_element()?.clone()).ok()?;
            }
            Value::Bounded(v) => {
                v.set(view.as_element()?.clone()).ok()?;
            }
            Value::List(v) => {
                let elements = elements_of(view)?;
                v.set_all(elements).ok()?;
            }
            Value::Set(v) => {
                let elements = elements_of(view)?;
                v.set_all(elements.into_iter().collect()).ok()?;
            }
            Value::Map(v) => {
                let mut entries = Vec::new();
                for node in view.as_list()? {
                    let map = node.as_map()?;
                    let k = map.get("key")?.as_element()?.clone();
                    let val = map.get("value")?.as_element()?.clone();
                    entries.push((k, val));
                }
                v.set_all(entries.into_iter().collect()).ok()?;
            }
            Value::PatternList(v) => {
                let mut layers = Vec::new();
                for node in view.as_list()? {
                    let map = node.as_map()?;
                    let shape = map.get("shape")?.as_element()?.as_catalog()?.clone();
                    let color = map.get("color")?.as_element()?.as_catalog()?.clone();
                    layers.push(PatternLayer::new(shape, color));
                }
                v.set_all(layers);
            }
        }
        Some(value)
    }
}

fn elements_of(view: &DataView) -> Option<Vec<Element>> {
    view.as_list()?
        .iter()
        .map(|node| node.as_element().cloned())
        .collect()
}

impl BaseValue for Value {
    fn key(&self) -> &Key {
        match self {
            Value::Scalar(v) => v.key(),
            Value::Bounded(v) => v.key(),
            Value::List(v) => v.key(),
            Value::Set(v) => v.key(),
            Value::Map(v) => v.key(),
            Value::PatternList(v) => v.key(),
        }
    }

    fn exists(&self) -> bool {
        match self {
            Value::Scalar(v) => v.exists(),
            Value::Bounded(v) => v.exists(),
            Value::List(v) => v.exists(),
            Value::Set(v) => v.exists(),
            Value::Map(v) => v.exists(),
            Value::PatternList(v) => v.exists(),
        }
    }
}

impl From<ScalarValue> for Value {
    fn from(v: ScalarValue) -> Self {
        Value::Scalar(v)
    }
}

impl From<BoundedValue> for Value {
    fn from(v: BoundedValue) -> Self {
        Value::Bounded(v)
    }
}

impl From<ListValue> for Value {
    fn from(v: ListValue) -> Self {
        Value::List(v)
    }
}

impl From<SetValue> for Value {
    fn from(v: SetValue) -> Self {
        Value::Set(v)
    }
}

impl From<MapValue> for Value {
    fn from(v: MapValue) -> Self {
        Value::Map(v)
    }
}

impl From<PatternListValue> for Value {
    fn from(v: PatternListValue) -> Self {
        Value::PatternList(v)
    }
}

/// An immutable value of any shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImmutableValue {
    /// A scalar value
    Scalar(ImmutableScalarValue),
    /// A bounded scalar value
    Bounded(ImmutableBoundedValue),
    /// An ordered list value
    List(ImmutableListValue),
    /// A set value
    Set(ImmutableSetValue),
    /// A map value
    Map(ImmutableMapValue),
    /// A positional pattern list value
    PatternList(ImmutablePatternListValue),
}

impl ImmutableValue {
    /// The shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            ImmutableValue::Scalar(_) => ValueKind::Scalar,
            ImmutableValue::Bounded(_) => ValueKind::Bounded,
            ImmutableValue::List(_) => ValueKind::List,
            ImmutableValue::Set(_) => ValueKind::Set,
            ImmutableValue::Map(_) => ValueKind::Map,
            ImmutableValue::PatternList(_) => ValueKind::PatternList,
        }
    }

    /// The current element, for scalar-shaped values
    pub fn element(&self) -> Option<&Element> {
        match self {
            ImmutableValue::Scalar(v) => Some(v.get()),
            ImmutableValue::Bounded(v) => Some(v.get()),
            _ => None,
        }
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> Value {
        match self {
            ImmutableValue::Scalar(v) => Value::Scalar(v.as_mutable()),
            ImmutableValue::Bounded(v) => Value::Bounded(v.as_mutable()),
            ImmutableValue::List(v) => Value::List(v.as_mutable()),
            ImmutableValue::Set(v) => Value::Set(v.as_mutable()),
            ImmutableValue::Map(v) => Value::Map(v.as_mutable()),
            ImmutableValue::PatternList(v) => Value::PatternList(v.as_mutable()),
        }
    }
}

impl BaseValue for ImmutableValue {
    fn key(&self) -> &Key {
        match self {
            ImmutableValue::Scalar(v) => v.key(),
            ImmutableValue::Bounded(v) => v.key(),
            ImmutableValue::List(v) => v.key(),
            ImmutableValue::Set(v) => v.key(),
            ImmutableValue::Map(v) => v.key(),
            ImmutableValue::PatternList(v) => v.key(),
        }
    }

    fn exists(&self) -> bool {
        match self {
            ImmutableValue::Scalar(v) => v.exists(),
            ImmutableValue::Bounded(v) => v.exists(),
            ImmutableValue::List(v) => v.exists(),
            ImmutableValue::Set(v) => v.exists(),
            ImmutableValue::Map(v) => v.exists(),
            ImmutableValue::PatternList(v) => v.exists(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_core::{CatalogKey, DataQuery, ElementKind};

    fn scalar_key() -> Key {
        Key::new(
            CatalogKey::game("log_axis").unwrap(),
            "Log Axis",
            ElementKind::Catalog,
            ValueKind::Scalar,
            DataQuery::of("axis").unwrap(),
        )
    }

    fn bounded_key() -> Key {
        Key::new(
            CatalogKey::game("xp_level").unwrap(),
            "Experience Level",
            ElementKind::Int,
            ValueKind::Bounded,
            DataQuery::of("xp.level").unwrap(),
        )
    }

    fn axis(name: &str) -> Element {
        Element::Catalog(CatalogKey::game(name).unwrap())
    }

    fn scalar(name: &str) -> Value {
        let mut v = ScalarValue::new(scalar_key(), axis("y")).unwrap();
        v.set(axis(name)).unwrap();
        Value::Scalar(v)
    }

    fn bounded(level: i64) -> Value {
        Value::Bounded(
            BoundedValue::with_current(
                bounded_key(),
                Element::Int(0),
                Element::Int(level),
                Element::Int(0),
                Element::Int(30),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(scalar("x").kind(), ValueKind::Scalar);
        assert_eq!(bounded(1).kind(), ValueKind::Bounded);
    }

    #[test]
    fn test_element_access() {
        assert_eq!(scalar("x").element(), Some(&axis("x")));
        assert_eq!(bounded(5).element(), Some(&Element::Int(5)));
    }

    #[test]
    fn test_set_element_respects_bounds() {
        let mut v = bounded(5);
        assert!(v.set_element(Element::Int(31)).is_err());
        assert_eq!(v.element(), Some(&Element::Int(5)));
        v.set_element(Element::Int(30)).unwrap();
        assert_eq!(v.element(), Some(&Element::Int(30)));
    }

    #[test]
    fn test_set_element_rejected_for_collections() {
        let key = Key::new(
            CatalogKey::game("lore").unwrap(),
            "Lore",
            ElementKind::Text,
            ValueKind::List,
            DataQuery::of("lore").unwrap(),
        );
        let mut v = Value::List(ListValue::new(key, vec![]).unwrap());
        assert!(matches!(
            v.set_element(Element::Text("a".into())),
            Err(FacetError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_immutable_round_trip() {
        let v = scalar("z");
        assert_eq!(v.as_immutable().as_mutable(), v);
    }

    // === View serialisation ===

    #[test]
    fn test_scalar_view_round_trip() {
        let v = scalar("x");
        let view = v.to_view();
        let prototype = scalar("y");
        let back = Value::from_view(&prototype, &view).unwrap();
        assert_eq!(back.element(), Some(&axis("x")));
    }

    #[test]
    fn test_bounded_view_rejects_out_of_range() {
        // A tampered container carrying 99 for a [0, 30] value is malformed
        let view = DataView::Element(Element::Int(99));
        assert!(Value::from_view(&bounded(0), &view).is_none());
    }

    #[test]
    fn test_bounded_view_rejects_wrong_node_shape() {
        let view = DataView::List(vec![]);
        assert!(Value::from_view(&bounded(0), &view).is_none());
    }

    #[test]
    fn test_pattern_list_view_round_trip() {
        let key = Key::new(
            CatalogKey::game("banner_patterns").unwrap(),
            "Banner Patterns",
            ElementKind::Catalog,
            ValueKind::PatternList,
            DataQuery::of("banner.patterns").unwrap(),
        );
        let mut v = PatternListValue::new(key, vec![]);
        v.add(PatternLayer::new(
            CatalogKey::game("stripe").unwrap(),
            CatalogKey::game("red").unwrap(),
        ));
        let v = Value::PatternList(v);
        let view = v.to_view();
        let back = Value::from_view(&v, &view).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_map_view_round_trip() {
        let key = Key::new(
            CatalogKey::game("enchantments").unwrap(),
            "Enchantments",
            ElementKind::Catalog,
            ValueKind::Map,
            DataQuery::of("enchantments").unwrap(),
        );
        let mut v = MapValue::new(key, BTreeMap::new()).unwrap();
        v.put(axis("sharpness"), Element::Int(3)).unwrap();
        let v = Value::Map(v);
        let back = Value::from_view(&v, &v.to_view()).unwrap();
        assert_eq!(back, v);
    }
}
