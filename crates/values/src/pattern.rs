//! Pattern list values
//!
//! A positional list of banner [`PatternLayer`]s. Beyond the collection
//! surface it supports zero-based positional addressing: `get(i)`,
//! `set(i, layer)`, `insert(i, layer)` and `without(i)`. Out-of-range
//! indices fail without mutating.

use crate::base::BaseValue;
use facet_core::{FacetError, FacetResult, Key, PatternLayer};
use serde::{Deserialize, Serialize};

fn index_error(key: &Key, index: usize, len: usize) -> FacetError {
    FacetError::InvalidOperation(format!(
        "index {index} out of range for {} (len {len})",
        key.id()
    ))
}

/// A mutable positional list of pattern layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternListValue {
    key: Key,
    default: Vec<PatternLayer>,
    current: Vec<PatternLayer>,
}

impl PatternListValue {
    /// Create a pattern list sitting at its default
    pub fn new(key: Key, default: Vec<PatternLayer>) -> Self {
        PatternListValue {
            current: default.clone(),
            default,
            key,
        }
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// The layer at the index, if in range
    pub fn get(&self, index: usize) -> Option<&PatternLayer> {
        self.current.get(index)
    }

    /// Append a layer, fluently
    pub fn add(&mut self, layer: PatternLayer) -> &mut Self {
        self.current.push(layer);
        self
    }

    /// Append every layer in order
    pub fn add_all(&mut self, layers: impl IntoIterator<Item = PatternLayer>) -> &mut Self {
        self.current.extend(layers);
        self
    }

    /// Replace the layer at the index
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error and leaves the list unchanged if
    /// the index is out of range.
    pub fn set(&mut self, index: usize, layer: PatternLayer) -> FacetResult<&mut Self> {
        if index >= self.current.len() {
            return Err(index_error(&self.key, index, self.current.len()));
        }
        self.current[index] = layer;
        Ok(self)
    }

    /// Insert a layer at the index, shifting later layers down
    ///
    /// An index equal to the length appends.
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error if the index is past the end.
    pub fn insert(&mut self, index: usize, layer: PatternLayer) -> FacetResult<&mut Self> {
        if index > self.current.len() {
            return Err(index_error(&self.key, index, self.current.len()));
        }
        self.current.insert(index, layer);
        Ok(self)
    }

    /// Remove the layer at the index
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error if the index is out of range.
    pub fn without(&mut self, index: usize) -> FacetResult<&mut Self> {
        if index >= self.current.len() {
            return Err(index_error(&self.key, index, self.current.len()));
        }
        self.current.remove(index);
        Ok(self)
    }

    /// Remove the first occurrence of the layer
    pub fn remove(&mut self, layer: &PatternLayer) -> &mut Self {
        if let Some(pos) = self.current.iter().position(|l| l == layer) {
            self.current.remove(pos);
        }
        self
    }

    /// The index of the first occurrence of the layer
    pub fn index_of(&self, layer: &PatternLayer) -> Option<usize> {
        self.current.iter().position(|l| l == layer)
    }

    /// Whether the list contains the layer
    pub fn contains(&self, layer: &PatternLayer) -> bool {
        self.current.contains(layer)
    }

    /// A new value keeping only layers matching the predicate
    ///
    /// The receiver is not mutated.
    pub fn filter(&self, predicate: impl Fn(&PatternLayer) -> bool) -> Self {
        PatternListValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.iter().filter(|l| predicate(l)).cloned().collect(),
        }
    }

    /// A copy of the backing sequence
    pub fn get_all(&self) -> Vec<PatternLayer> {
        self.current.clone()
    }

    /// Replace the whole payload
    pub fn set_all(&mut self, layers: Vec<PatternLayer>) -> &mut Self {
        self.current = layers;
        self
    }

    /// Reset the payload to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.default.clone();
        self
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutablePatternListValue {
        ImmutablePatternListValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for PatternListValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

/// An immutable positional list of pattern layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutablePatternListValue {
    key: Key,
    default: Vec<PatternLayer>,
    current: Vec<PatternLayer>,
}

impl ImmutablePatternListValue {
    /// Create a pattern list sitting at its default
    pub fn new(key: Key, default: Vec<PatternLayer>) -> Self {
        PatternListValue::new(key, default).as_immutable()
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// The layer at the index, if in range
    pub fn get(&self, index: usize) -> Option<&PatternLayer> {
        self.current.get(index)
    }

    /// A new instance with the layer appended
    pub fn with(&self, layer: PatternLayer) -> Self {
        let mut mutable = self.as_mutable();
        mutable.add(layer);
        mutable.as_immutable()
    }

    /// A new instance with the layer inserted at the index
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error if the index is past the end;
    /// the receiver is never altered.
    pub fn with_at(&self, index: usize, layer: PatternLayer) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.insert(index, layer)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance with the layer at the index replaced
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error if the index is out of range.
    pub fn set(&self, index: usize, layer: PatternLayer) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.set(index, layer)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance without the layer at the index
    ///
    /// # Errors
    ///
    /// Returns an invalid-operation error if the index is out of range.
    pub fn without(&self, index: usize) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.without(index)?;
        Ok(mutable.as_immutable())
    }

    /// The index of the first occurrence of the layer
    pub fn index_of(&self, layer: &PatternLayer) -> Option<usize> {
        self.current.iter().position(|l| l == layer)
    }

    /// Whether the list contains the layer
    pub fn contains(&self, layer: &PatternLayer) -> bool {
        self.current.contains(layer)
    }

    /// A new instance keeping only layers matching the predicate
    pub fn filter(&self, predicate: impl Fn(&PatternLayer) -> bool) -> Self {
        self.as_mutable().filter(predicate).as_immutable()
    }

    /// A copy of the backing sequence
    pub fn get_all(&self) -> Vec<PatternLayer> {
        self.current.clone()
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> PatternListValue {
        PatternListValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ImmutablePatternListValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}
