//! Value shapes for the facet data system
//!
//! This crate carries the six concrete value shapes (scalar, bounded,
//! list, set, map, pattern list), their immutable counterparts, and the
//! [`Value`]/[`ImmutableValue`] dispatch enums that heterogeneous
//! containers work with.
//!
//! Every shape comes as a mutable/immutable pair sharing one read
//! surface, [`BaseValue`]. Conversions between the pair copy the payload;
//! neither side can reach back and alter the other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base;
pub mod bounded;
pub mod list;
pub mod map;
pub mod pattern;
pub mod scalar;
pub mod set;
pub mod value;

pub use base::{BaseValue, ValueContainer};
pub use bounded::{BoundedValue, ImmutableBoundedValue};
pub use list::{ImmutableListValue, ListValue};
pub use map::{ImmutableMapValue, MapValue};
pub use pattern::{ImmutablePatternListValue, PatternListValue};
pub use scalar::{ImmutableScalarValue, ScalarValue};
pub use set::{ImmutableSetValue, SetValue};
pub use value::{ImmutableValue, Value};
