//! End-to-end scenarios across the whole stack

use facetdb::registry::content;
use facetdb::{
    CatalogKey, CompositeValueStore, DataHolder, DataManipulator, DataSerializable,
    DataTransactionStatus, Element, ImmutableValueStore, MergeStrategy, PatternLayer,
    ValueContainer,
};

fn axis(name: &str) -> Element {
    Element::Catalog(CatalogKey::game(name).unwrap())
}

fn store() -> CompositeValueStore {
    CompositeValueStore::new(content::registry().schemas())
}

#[test]
fn test_bounded_range_rejects_out_of_band() {
    let level = content::experience_level_key();
    let mut holder = store();
    holder.offer_element(&level, Element::Int(10));

    let result = holder.offer_element(&level, Element::Int(31));

    assert_eq!(result.status(), DataTransactionStatus::Failure);
    assert_eq!(result.rejected().len(), 1);
    assert_eq!(result.rejected()[0].element(), Some(&Element::Int(31)));
    assert_eq!(holder.get_element(&level), Some(Element::Int(10)));
}

#[test]
fn test_manipulator_round_trip() {
    let schema = content::log_axis_schema();
    let mut manipulator = DataManipulator::new(schema.clone());
    manipulator
        .set_element(&content::log_axis_key(), axis("y"))
        .unwrap();

    let container = manipulator.to_container();
    let back = DataManipulator::from_container(&schema, &container).unwrap();

    assert_eq!(back, manipulator);
}

#[test]
fn test_undo_restores_exactly() {
    let key = content::log_axis_key();
    let mut holder = store();
    holder.offer_element(&key, axis("y"));

    let result = holder.offer_element(&key, axis("x"));
    assert_eq!(result.replaced()[0].element(), Some(&axis("y")));
    assert_eq!(holder.get_element(&key), Some(axis("x")));

    let undone = holder.undo(&result);
    assert!(undone.is_successful());
    assert_eq!(holder.get_element(&key), Some(axis("y")));
}

#[test]
fn test_offer_remove_undo_chain_restores_holder() {
    let key = content::log_axis_key();
    let schema_id = CatalogKey::game("log_axis_data").unwrap();
    let mut holder = store();
    holder.offer_element(&key, axis("z"));
    let before = holder.clone();

    let mut fresh = DataManipulator::new(content::log_axis_schema());
    fresh.set_element(&key, axis("x")).unwrap();
    let offered = holder.offer(fresh);
    let removed = holder.remove(&schema_id);
    assert!(holder.get_manipulator(&schema_id).is_none());

    holder.undo(&removed);
    holder.undo(&offered);
    assert_eq!(holder, before);
}

#[test]
fn test_pattern_list_positional_edits() {
    let key = content::banner_patterns_key();
    let mut holder = store();
    let stripe_red = PatternLayer::new(
        CatalogKey::game("stripe_bottom").unwrap(),
        CatalogKey::game("red").unwrap(),
    );
    let cross_blue = PatternLayer::new(
        CatalogKey::game("cross").unwrap(),
        CatalogKey::game("blue").unwrap(),
    );

    let banner_id = CatalogKey::game("banner_data").unwrap();
    holder.offer(DataManipulator::new(content::banner_schema()));
    let mut banner = holder.get_manipulator(&banner_id).unwrap();
    {
        let mut patterns = banner.get_value(&key).unwrap();
        let list = patterns.as_pattern_list_mut().unwrap();
        list.insert(0, stripe_red.clone()).unwrap();
        assert_eq!(list.get_all(), vec![stripe_red.clone()]);
        list.insert(0, cross_blue.clone()).unwrap();
        assert_eq!(list.get_all(), vec![cross_blue.clone(), stripe_red.clone()]);
        list.without(0).unwrap();
        assert_eq!(list.get_all(), vec![stripe_red.clone()]);
        assert_eq!(list.index_of(&stripe_red), Some(0));
        banner.set(patterns).unwrap();
    }
    holder.offer(banner);

    let stored = holder.get_value(&key).unwrap();
    assert_eq!(
        stored.as_pattern_list().unwrap().get_all(),
        vec![stripe_red]
    );
}

#[test]
fn test_merge_strategy_field_selection() {
    let level = content::experience_level_key();
    let total = content::experience_total_key();

    let mut s1 = store();
    s1.offer_element(&level, Element::Int(1));
    let mut s2 = store();
    s2.offer_element(&level, Element::Int(2));
    s2.offer_element(&total, Element::Int(100));

    let mut overwrite = s1.clone();
    overwrite.copy_from(&s2, MergeStrategy::Overwrite);
    assert_eq!(overwrite.get_element(&level), Some(Element::Int(2)));

    let mut ignore = s1.clone();
    ignore.copy_from(&s2, MergeStrategy::Ignore);
    assert_eq!(ignore.get_element(&level), Some(Element::Int(1)));

    let mut original_preferred = s1.clone();
    original_preferred.copy_from(&s2, MergeStrategy::OriginalPreferred);
    assert_eq!(original_preferred.get_element(&level), Some(Element::Int(1)));
    // A field only the replacement defines still comes through.
    assert_eq!(original_preferred.get_element(&total), Some(Element::Int(100)));
}

#[test]
fn test_immutable_store_purity() {
    let key = content::log_axis_key();
    let snapshot = ImmutableValueStore::new(content::registry().schemas());

    let changed = snapshot.with_element(&key, axis("x")).unwrap();

    assert!(snapshot.get_value(&key).is_none());
    assert_eq!(changed.get_element(&key), Some(axis("x")));
}

#[test]
fn test_copy_to_then_undo_restores_target() {
    let level = content::experience_level_key();
    let mut source = store();
    source.offer_element(&level, Element::Int(9));
    let mut target = store();
    target.offer_element(&level, Element::Int(4));
    let before = target.clone();

    let result = target.copy_from(&source, MergeStrategy::Overwrite);
    assert_eq!(target.get_element(&level), Some(Element::Int(9)));

    target.undo(&result);
    assert_eq!(target, before);
}

#[test]
fn test_unsupported_offer_always_fails() {
    use facetdb::core::{DataQuery, ElementKind, ValueKind};
    let stranger = facetdb::Key::new(
        CatalogKey::game("stranger").unwrap(),
        "Stranger",
        ElementKind::Int,
        ValueKind::Scalar,
        DataQuery::of("stranger").unwrap(),
    );
    let mut holder = store();
    for payload in [Element::Int(0), Element::Int(1), Element::Text("x".into())] {
        let result = holder.offer_element(&stranger, payload);
        assert_eq!(result.status(), DataTransactionStatus::Failure);
    }
}
