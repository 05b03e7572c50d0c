//! Merge strategies
//!
//! When a manipulator is offered to a store that already carries one with
//! the same schema, a [`MergeStrategy`] decides how the two collapse into
//! one. The field-aware strategies decide per value, using whether each
//! side's payload differs from its default.

use crate::manipulator::DataManipulator;

/// How an offered manipulator combines with a resident one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeStrategy {
    /// Keep the resident manipulator untouched
    Ignore,
    /// Take the replacement wholesale
    #[default]
    Overwrite,
    /// Field-wise: keep resident fields that differ from their default
    OriginalPreferred,
    /// Field-wise: take replacement fields that differ from their default
    ReplacementPreferred,
}

impl MergeStrategy {
    /// Collapse an optional resident and a replacement into one manipulator
    ///
    /// With no resident the replacement wins regardless of strategy. The
    /// two manipulators must instantiate the same schema; the field-aware
    /// strategies skip keys the resident does not carry.
    pub fn merge(
        &self,
        original: Option<&DataManipulator>,
        replacement: &DataManipulator,
    ) -> DataManipulator {
        let Some(original) = original else {
            return replacement.copy();
        };
        match self {
            MergeStrategy::Ignore => original.copy(),
            MergeStrategy::Overwrite => replacement.copy(),
            MergeStrategy::OriginalPreferred => {
                let mut merged = replacement.copy();
                let _ = merged.fill_with(original, MergeStrategy::ReplacementPreferred);
                merged
            }
            MergeStrategy::ReplacementPreferred => {
                let mut merged = original.copy();
                let _ = merged.fill_with(replacement, MergeStrategy::ReplacementPreferred);
                merged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manipulator::ManipulatorSchema;
    use facet_core::{CatalogKey, DataQuery, Element, ElementKind, Key, ValueKind};
    use facet_values::{ScalarValue, ValueContainer};
    use std::sync::Arc;

    fn key(name: &str, path: &str) -> Key {
        Key::new(
            CatalogKey::game(name).unwrap(),
            name,
            ElementKind::Int,
            ValueKind::Scalar,
            DataQuery::of(path).unwrap(),
        )
    }

    fn schema() -> Arc<ManipulatorSchema> {
        ManipulatorSchema::builder(CatalogKey::game("stats").unwrap(), "Stats", 1)
            .value(ScalarValue::new(key("hits", "stats.hits"), Element::Int(0)).unwrap())
            .value(ScalarValue::new(key("kills", "stats.kills"), Element::Int(0)).unwrap())
            .build()
    }

    fn with_hits(hits: i64) -> DataManipulator {
        let mut m = DataManipulator::new(schema());
        m.set_element(&key("hits", "stats.hits"), Element::Int(hits))
            .unwrap();
        m
    }

    fn with_kills(kills: i64) -> DataManipulator {
        let mut m = DataManipulator::new(schema());
        m.set_element(&key("kills", "stats.kills"), Element::Int(kills))
            .unwrap();
        m
    }

    #[test]
    fn test_no_resident_replacement_wins() {
        let r = with_hits(3);
        assert_eq!(MergeStrategy::Ignore.merge(None, &r), r);
        assert_eq!(MergeStrategy::OriginalPreferred.merge(None, &r), r);
    }

    #[test]
    fn test_ignore_keeps_resident() {
        let o = with_hits(1);
        let r = with_hits(9);
        assert_eq!(MergeStrategy::Ignore.merge(Some(&o), &r), o);
    }

    #[test]
    fn test_overwrite_takes_replacement() {
        let o = with_hits(1);
        let r = with_hits(9);
        assert_eq!(MergeStrategy::Overwrite.merge(Some(&o), &r), r);
    }

    #[test]
    fn test_original_preferred_is_field_wise() {
        let o = with_hits(1);
        let r = with_kills(5);
        let merged = MergeStrategy::OriginalPreferred.merge(Some(&o), &r);
        assert_eq!(
            merged.get_element(&key("hits", "stats.hits")),
            Some(Element::Int(1))
        );
        assert_eq!(
            merged.get_element(&key("kills", "stats.kills")),
            Some(Element::Int(5))
        );
    }

    #[test]
    fn test_replacement_preferred_overrides_touched_fields_only() {
        let mut o = with_hits(1);
        o.set_element(&key("kills", "stats.kills"), Element::Int(2))
            .unwrap();
        let r = with_kills(5);
        let merged = MergeStrategy::ReplacementPreferred.merge(Some(&o), &r);
        assert_eq!(
            merged.get_element(&key("hits", "stats.hits")),
            Some(Element::Int(1))
        );
        assert_eq!(
            merged.get_element(&key("kills", "stats.kills")),
            Some(Element::Int(5))
        );
    }
}
