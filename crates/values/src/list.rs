//! Ordered list values
//!
//! A list value wraps an ordered sequence of elements. Duplicates are
//! allowed and appends preserve insertion order. `filter` always returns a
//! new value and never mutates the receiver.

use crate::base::{check_kind, BaseValue};
use facet_core::{Element, FacetResult, Key};
use serde::{Deserialize, Serialize};

/// A mutable ordered-sequence attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListValue {
    key: Key,
    default: Vec<Element>,
    current: Vec<Element>,
}

impl ListValue {
    /// Create a list value sitting at its default
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch if any default element does not match the
    /// key's element kind.
    pub fn new(key: Key, default: Vec<Element>) -> FacetResult<Self> {
        for element in &default {
            check_kind(&key, element)?;
        }
        Ok(ListValue {
            current: default.clone(),
            default,
            key,
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Append one element, fluently
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch and leaves the list unchanged.
    pub fn add(&mut self, element: Element) -> FacetResult<&mut Self> {
        check_kind(&self.key, &element)?;
        self.current.push(element);
        Ok(self)
    }

    /// Append every element in order
    ///
    /// # Errors
    ///
    /// Rejects the whole batch on the first kind mismatch; nothing is
    /// appended.
    pub fn add_all(&mut self, elements: impl IntoIterator<Item = Element>) -> FacetResult<&mut Self> {
        let elements: Vec<Element> = elements.into_iter().collect();
        for element in &elements {
            check_kind(&self.key, element)?;
        }
        self.current.extend(elements);
        Ok(self)
    }

    /// Remove the first occurrence of the element
    pub fn remove(&mut self, element: &Element) -> &mut Self {
        if let Some(pos) = self.current.iter().position(|e| e == element) {
            self.current.remove(pos);
        }
        self
    }

    /// Remove the first occurrence of each given element
    pub fn remove_all<'a>(&mut self, elements: impl IntoIterator<Item = &'a Element>) -> &mut Self {
        for element in elements {
            self.remove(element);
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
    pub fn set_all(&mut self, elements: Vec<Element>) -> FacetResult<&mut Self> {
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
        ListValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.iter().filter(|e| predicate(e)).cloned().collect(),
        }
    }

    /// Whether the list contains the element
    pub fn contains(&self, element: &Element) -> bool {
        self.current.contains(element)
    }

    /// Whether the list contains every given element
    pub fn contains_all<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) -> bool {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// A copy of the backing sequence
    pub fn get_all(&self) -> Vec<Element> {
        self.current.clone()
    }

    /// Iterate the elements in order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.current.iter()
    }

    /// The default payload
    pub fn get_default(&self) -> &[Element] {
        &self.default
    }

    /// Reset the payload to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.default.clone();
        self
    }

    /// An independent immutable copy
    pub fn as_immutable(&self) -> ImmutableListValue {
        ImmutableListValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ListValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}

/// An immutable ordered-sequence attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableListValue {
    key: Key,
    default: Vec<Element>,
    current: Vec<Element>,
}

impl ImmutableListValue {
    /// Create a list value sitting at its default
    ///
    /// # Errors
    ///
    /// As [`ListValue::new`].
    pub fn new(key: Key, default: Vec<Element>) -> FacetResult<Self> {
        Ok(ListValue::new(key, default)?.as_immutable())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// A new instance with the element appended
    ///
    /// # Errors
    ///
    /// Returns a kind mismatch; the receiver is never altered.
    pub fn with(&self, element: Element) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.add(element)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance with every element appended in order
    ///
    /// # Errors
    ///
    /// Rejects the whole batch on kind mismatch.
    pub fn with_all(&self, elements: impl IntoIterator<Item = Element>) -> FacetResult<Self> {
        let mut mutable = self.as_mutable();
        mutable.add_all(elements)?;
        Ok(mutable.as_immutable())
    }

    /// A new instance without the first occurrence of the element
    pub fn without(&self, element: &Element) -> Self {
        let mut mutable = self.as_mutable();
        mutable.remove(element);
        mutable.as_immutable()
    }

    /// A new instance without the first occurrence of each given element
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

    /// Whether the list contains the element
    pub fn contains(&self, element: &Element) -> bool {
        self.current.contains(element)
    }

    /// Whether the list contains every given element
    pub fn contains_all<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) -> bool {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// A copy of the backing sequence
    pub fn get_all(&self) -> Vec<Element> {
        self.current.clone()
    }

    /// An independent mutable copy
    pub fn as_mutable(&self) -> ListValue {
        ListValue {
            key: self.key.clone(),
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }
}

impl BaseValue for ImmutableListValue {
    fn key(&self) -> &Key {
        &self.key
    }

    fn exists(&self) -> bool {
        self.current != self.default
    }
}
