//! Attribute keys
//!
//! A [`Key`] names one attribute: the log axis of a log block, the
//! experience level of a player, the pattern layers of a banner. A key
//! carries its catalog identity, the element type of the attribute, the
//! shape of the value that wraps it, and the query it serialises under.
//!
//! ## Identity
//!
//! Key equality, ordering and hashing are by catalog identity ONLY. The
//! element kind, shape and query are descriptive metadata; two keys with
//! the same identity are the same key. Keys are registered once and shared
//! process-wide.

use crate::catalog::{CatalogKey, CatalogType};
use crate::element::ElementKind;
use crate::query::DataQuery;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// The structural shape of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// A single element
    Scalar,
    /// A single element constrained to a range
    Bounded,
    /// An ordered sequence of elements
    List,
    /// An unordered, deduplicated set of elements
    Set,
    /// A mapping from elements to elements
    Map,
    /// A positional list of banner pattern layers
    PatternList,
}

impl ValueKind {
    /// The shape name as a string, for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Scalar => "Scalar",
            ValueKind::Bounded => "Bounded",
            ValueKind::List => "List",
            ValueKind::Set => "Set",
            ValueKind::Map => "Map",
            ValueKind::PatternList => "PatternList",
        }
    }
}

/// Identifier for one attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    id: CatalogKey,
    display_name: String,
    element: ElementKind,
    shape: ValueKind,
    query: DataQuery,
}

impl Key {
    /// Create a key
    pub fn new(
        id: CatalogKey,
        display_name: &str,
        element: ElementKind,
        shape: ValueKind,
        query: DataQuery,
    ) -> Self {
        Key {
            id,
            display_name: display_name.to_string(),
            element,
            shape,
            query,
        }
    }

    /// The element type this key's attribute carries
    pub fn element_kind(&self) -> ElementKind {
        self.element
    }

    /// The value shape wrapping the element
    pub fn shape(&self) -> ValueKind {
        self.shape
    }

    /// The query this key's value serialises under
    pub fn query(&self) -> &DataQuery {
        &self.query
    }

    /// The catalog identity
    pub fn id(&self) -> &CatalogKey {
        &self.id
    }
}

impl CatalogType for Key {
    fn key(&self) -> &CatalogKey {
        &self.id
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

// Identity by catalog key only; metadata does not participate.
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str, shape: ValueKind) -> Key {
        Key::new(
            CatalogKey::game(id).unwrap(),
            id,
            ElementKind::Int,
            shape,
            DataQuery::of(id).unwrap(),
        )
    }

    #[test]
    fn test_key_exposes_metadata() {
        let k = key("xp_level", ValueKind::Bounded);
        assert_eq!(k.element_kind(), ElementKind::Int);
        assert_eq!(k.shape(), ValueKind::Bounded);
        assert_eq!(k.query().to_string(), "xp_level");
        assert_eq!(k.id().name(), "xp_level");
    }

    #[test]
    fn test_equality_by_identity_only() {
        let a = key("axis", ValueKind::Scalar);
        let mut b = key("axis", ValueKind::Scalar);
        b.display_name = "Different Display".into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_identities_differ() {
        assert_ne!(key("axis", ValueKind::Scalar), key("level", ValueKind::Scalar));
    }

    #[test]
    fn test_ordering_follows_identity() {
        let a = key("aaa", ValueKind::Scalar);
        let b = key("bbb", ValueKind::Scalar);
        assert!(a < b);
    }

    #[test]
    fn test_usable_as_map_key() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(key("axis", ValueKind::Scalar), 1);
        map.insert(key("axis", ValueKind::Scalar), 2);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_value_kind_names() {
        assert_eq!(ValueKind::Scalar.name(), "Scalar");
        assert_eq!(ValueKind::PatternList.name(), "PatternList");
    }

    #[test]
    fn test_serde_round_trip() {
        let k = key("axis", ValueKind::Scalar);
        let json = serde_json::to_string(&k).unwrap();
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(k, back);
        assert_eq!(back.shape(), ValueKind::Scalar);
    }
}
