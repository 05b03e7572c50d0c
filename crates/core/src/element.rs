//! Element model for Facet
//!
//! An [`Element`] is the scalar payload an attribute ultimately carries:
//! a boolean, integer, float, text string, or a reference to a catalog
//! entry (e.g. a log axis variant). Value shapes in `facet-values` wrap
//! elements into scalars, bounded scalars, collections, maps and pattern
//! lists.
//!
//! ## Type rules
//!
//! - Different element types are NEVER equal: `Int(1) != Float(1.0)`.
//! - Elements are totally ordered (type rank first, then value) so they can
//!   serve as ordered-set members and map keys.
//! - Floats order and equate by `f64::total_cmp`. This diverges from plain
//!   IEEE-754 comparison: `NaN == NaN` and `-0.0 < 0.0` here. Collection
//!   shapes require the total order; the trade-off is documented and
//!   deliberate.

use crate::catalog::CatalogKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Scalar payload carried by an attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    /// Boolean flag
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Reference to a catalog entry by identity
    Catalog(CatalogKey),
}

/// Discriminant for [`Element`], used by keys to declare their element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Boolean flag
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 text
    Text,
    /// Catalog entry reference
    Catalog,
}

impl Element {
    /// The kind of this element
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Bool(_) => ElementKind::Bool,
            Element::Int(_) => ElementKind::Int,
            Element::Float(_) => ElementKind::Float,
            Element::Text(_) => ElementKind::Text,
            Element::Catalog(_) => ElementKind::Catalog,
        }
    }

    /// The kind name as a string, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Bool(_) => "Bool",
            Element::Int(_) => "Int",
            Element::Float(_) => "Float",
            Element::Text(_) => "Text",
            Element::Catalog(_) => "Catalog",
        }
    }

    /// Get as bool if this is a Bool element
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Element::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int element
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Element::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float element
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Element::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a Text element
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Element::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as catalog key if this is a Catalog element
    pub fn as_catalog(&self) -> Option<&CatalogKey> {
        match self {
            Element::Catalog(k) => Some(k),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Element::Bool(_) => 0,
            Element::Int(_) => 1,
            Element::Float(_) => 2,
            Element::Text(_) => 3,
            Element::Catalog(_) => 4,
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Element {}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Element::Bool(a), Element::Bool(b)) => a.cmp(b),
            (Element::Int(a), Element::Int(b)) => a.cmp(b),
            (Element::Float(a), Element::Float(b)) => a.total_cmp(b),
            (Element::Text(a), Element::Text(b)) => a.cmp(b),
            (Element::Catalog(a), Element::Catalog(b)) => a.cmp(b),
            // Cross-type: rank decides, so different types are never equal
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Element::Bool(b) => b.hash(state),
            Element::Int(i) => i.hash(state),
            Element::Float(f) => f.to_bits().hash(state),
            Element::Text(s) => s.hash(state),
            Element::Catalog(k) => k.hash(state),
        }
    }
}

impl From<bool> for Element {
    fn from(b: bool) -> Self {
        Element::Bool(b)
    }
}

impl From<i64> for Element {
    fn from(i: i64) -> Self {
        Element::Int(i)
    }
}

impl From<i32> for Element {
    fn from(i: i32) -> Self {
        Element::Int(i as i64)
    }
}

impl From<f64> for Element {
    fn from(f: f64) -> Self {
        Element::Float(f)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Text(s.to_string())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Text(s)
    }
}

impl From<CatalogKey> for Element {
    fn from(k: CatalogKey) -> Self {
        Element::Catalog(k)
    }
}

/// One layer of a banner pattern: a pattern shape in a dye color
///
/// Pattern list values are ordered sequences of these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatternLayer {
    /// The banner pattern shape, by catalog identity
    pub shape: CatalogKey,
    /// The dye color, by catalog identity
    pub color: CatalogKey,
}

impl PatternLayer {
    /// Create a layer from a shape and a color
    pub fn new(shape: CatalogKey, color: CatalogKey) -> Self {
        PatternLayer { shape, color }
    }
}
