//! Self-describing data tree
//!
//! Manipulators and values serialise through a [`DataContainer`]: a tree of
//! [`DataView`] nodes addressed by [`DataQuery`] paths. A node is a scalar
//! element, a list of nodes, or a string-keyed map of nodes. The tree is the
//! persistence boundary: everything that round-trips to storage goes through
//! it.
//!
//! ## Versioning
//!
//! Serialised forms carry a content version under [`CONTENT_VERSION_QUERY`].
//! Deserialisers must treat an unknown NEWER version as "rejected, not
//! corrupt" and return absence rather than an error.

use crate::element::Element;
use crate::query::DataQuery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The query every serialised form stores its content version under
pub fn content_version_query() -> DataQuery {
    DataQuery::of("content_version").expect("static query is valid")
}

/// One node in a data tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataView {
    /// A scalar element
    Element(Element),
    /// An ordered list of nodes
    List(Vec<DataView>),
    /// A string-keyed map of nodes
    Map(BTreeMap<String, DataView>),
}

impl DataView {
    /// Get as element if this node is a scalar
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            DataView::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as list if this node is a list
    pub fn as_list(&self) -> Option<&[DataView]> {
        match self {
            DataView::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get as map if this node is a map
    pub fn as_map(&self) -> Option<&BTreeMap<String, DataView>> {
        match self {
            DataView::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Element> for DataView {
    fn from(e: Element) -> Self {
        DataView::Element(e)
    }
}

/// A self-describing tree addressed by dotted queries
///
/// The container owns its nodes; `get` hands out references and `set`
/// creates intermediate map nodes as needed. Setting through a non-map
/// node replaces that node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContainer {
    root: BTreeMap<String, DataView>,
}

impl DataContainer {
    /// An empty container
    pub fn new() -> Self {
        DataContainer::default()
    }

    /// Set the node at the query, creating intermediate maps
    pub fn set(&mut self, query: &DataQuery, node: impl Into<DataView>) -> &mut Self {
        let node = node.into();
        let parts = query.parts();
        let mut map = &mut self.root;
        for part in &parts[..parts.len() - 1] {
            let entry = map
                .entry(part.clone())
                .or_insert_with(|| DataView::Map(BTreeMap::new()));
            if !matches!(entry, DataView::Map(_)) {
                *entry = DataView::Map(BTreeMap::new());
            }
            map = match entry {
                DataView::Map(m) => m,
                _ => unreachable!("entry was just made a map"),
            };
        }
        map.insert(parts[parts.len() - 1].clone(), node);
        self
    }

    /// The node at the query, if present
    pub fn get(&self, query: &DataQuery) -> Option<&DataView> {
        let parts = query.parts();
        let mut map = &self.root;
        for part in &parts[..parts.len() - 1] {
            map = map.get(part)?.as_map()?;
        }
        map.get(&parts[parts.len() - 1])
    }

    /// The element at the query, if present and scalar
    pub fn get_element(&self, query: &DataQuery) -> Option<&Element> {
        self.get(query)?.as_element()
    }

    /// The integer at the query, if present and an Int element
    pub fn get_int(&self, query: &DataQuery) -> Option<i64> {
        self.get_element(query)?.as_int()
    }

    /// The text at the query, if present and a Text element
    pub fn get_text(&self, query: &DataQuery) -> Option<&str> {
        self.get_element(query)?.as_text()
    }

    /// The list at the query, if present and a list
    pub fn get_list(&self, query: &DataQuery) -> Option<&[DataView]> {
        self.get(query)?.as_list()
    }

    /// Whether a node exists at the query
    pub fn contains(&self, query: &DataQuery) -> bool {
        self.get(query).is_some()
    }

    /// Remove and return the node at the query
    pub fn remove(&mut self, query: &DataQuery) -> Option<DataView> {
        fn remove_in(map: &mut BTreeMap<String, DataView>, query: &DataQuery) -> Option<DataView> {
            let (head, rest) = query.split_first();
            match rest {
                None => map.remove(head),
                Some(rest) => match map.get_mut(head)? {
                    DataView::Map(inner) => remove_in(inner, &rest),
                    _ => None,
                },
            }
        }
        remove_in(&mut self.root, query)
    }

    /// Top-level keys, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Whether the container holds no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The content version stored in this container, if any
    pub fn content_version(&self) -> Option<u16> {
        let v = self.get_int(&content_version_query())?;
        u16::try_from(v).ok()
    }

    /// Stamp a content version into this container
    pub fn set_content_version(&mut self, version: u16) -> &mut Self {
        self.set(&content_version_query(), Element::Int(i64::from(version)))
    }
}

/// Anything that serialises through a [`DataContainer`]
///
/// Deserialisation is defined per type (there is no registry of
/// deserialisers at this layer); implementors provide a `from_container`
/// inherent function returning `Option<Self>` that rejects containers whose
/// [`DataContainer::content_version`] is newer than [`Self::content_version`].
pub trait DataSerializable {
    /// The version this type writes into its serialised form
    fn content_version(&self) -> u16;

    /// Serialise into a fresh container, including the version tag
    fn to_container(&self) -> DataContainer;
}

impl From<DataContainer> for serde_json::Value {
    fn from(container: DataContainer) -> Self {
        fn node_to_json(node: DataView) -> serde_json::Value {
            match node {
                DataView::Element(e) => {
                    serde_json::to_value(e).unwrap_or(serde_json::Value::Null)
                }
                DataView::List(l) => {
                    serde_json::Value::Array(l.into_iter().map(node_to_json).collect())
                }
                DataView::Map(m) => serde_json::Value::Object(
                    m.into_iter().map(|(k, v)| (k, node_to_json(v))).collect(),
                ),
            }
        }
        serde_json::Value::Object(
            container
                .root
                .into_iter()
                .map(|(k, v)| (k, node_to_json(v)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKey;

    fn q(path: &str) -> DataQuery {
        DataQuery::of(path).unwrap()
    }

    // === Set and get ===

    #[test]
    fn test_set_and_get_scalar() {
        let mut c = DataContainer::new();
        c.set(&q("axis"), Element::Text("y".into()));
        assert_eq!(c.get_text(&q("axis")), Some("y"));
    }

    #[test]
    fn test_set_creates_intermediate_maps() {
        let mut c = DataContainer::new();
        c.set(&q("banner.base.color"), Element::Text("red".into()));
        assert!(c.get(&q("banner")).unwrap().as_map().is_some());
        assert_eq!(c.get_text(&q("banner.base.color")), Some("red"));
    }

    #[test]
    fn test_set_through_scalar_replaces_it() {
        let mut c = DataContainer::new();
        c.set(&q("a"), Element::Int(1));
        c.set(&q("a.b"), Element::Int(2));
        assert_eq!(c.get_int(&q("a.b")), Some(2));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let c = DataContainer::new();
        assert!(c.get(&q("missing")).is_none());
        assert!(c.get(&q("missing.deeper")).is_none());
        assert!(!c.contains(&q("missing")));
    }

    #[test]
    fn test_typed_getters_reject_wrong_kind() {
        let mut c = DataContainer::new();
        c.set(&q("n"), Element::Int(3));
        assert_eq!(c.get_int(&q("n")), Some(3));
        assert!(c.get_text(&q("n")).is_none());
        assert!(c.get_list(&q("n")).is_none());
    }

    #[test]
    fn test_list_nodes() {
        let mut c = DataContainer::new();
        c.set(
            &q("tags"),
            DataView::List(vec![
                DataView::Element(Element::Text("a".into())),
                DataView::Element(Element::Text("b".into())),
            ]),
        );
        let list = c.get_list(&q("tags")).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].as_element().unwrap().as_text(), Some("a"));
    }

    #[test]
    fn test_remove() {
        let mut c = DataContainer::new();
        c.set(&q("a.b"), Element::Int(1));
        let removed = c.remove(&q("a.b")).unwrap();
        assert_eq!(removed.as_element().unwrap().as_int(), Some(1));
        assert!(!c.contains(&q("a.b")));
        assert!(c.remove(&q("a.b")).is_none());
    }

    #[test]
    fn test_keys_and_is_empty() {
        let mut c = DataContainer::new();
        assert!(c.is_empty());
        c.set(&q("b"), Element::Int(1));
        c.set(&q("a"), Element::Int(2));
        let keys: Vec<&str> = c.keys().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    // === Content version ===

    #[test]
    fn test_content_version_round_trip() {
        let mut c = DataContainer::new();
        assert!(c.content_version().is_none());
        c.set_content_version(2);
        assert_eq!(c.content_version(), Some(2));
    }

    #[test]
    fn test_content_version_rejects_non_int() {
        let mut c = DataContainer::new();
        c.set(&content_version_query(), Element::Text("two".into()));
        assert!(c.content_version().is_none());
    }

    // === Serde and interop ===

    #[test]
    fn test_container_serde_round_trip() {
        let mut c = DataContainer::new();
        c.set_content_version(1);
        c.set(&q("axis"), Element::Catalog(CatalogKey::game("y").unwrap()));
        c.set(&q("level"), Element::Int(10));
        let json = serde_json::to_string(&c).unwrap();
        let back: DataContainer = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn test_into_serde_json_value() {
        let mut c = DataContainer::new();
        c.set(&q("meta.level"), Element::Int(10));
        let json: serde_json::Value = c.into();
        assert!(json.get("meta").unwrap().get("level").is_some());
    }
}
