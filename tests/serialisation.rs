//! Serialised-form behavior across the container boundary

use facetdb::registry::content;
use facetdb::{
    CatalogKey, DataContainer, DataManipulator, DataQuery, DataSerializable, Element,
};

#[test]
fn test_container_converts_to_json() {
    let mut manipulator = DataManipulator::new(content::experience_schema());
    manipulator
        .set_element(&content::experience_level_key(), Element::Int(12))
        .unwrap();

    let json: serde_json::Value = manipulator.to_container().into();

    assert_eq!(json["content_version"]["Int"], serde_json::json!(1));
    assert_eq!(json["experience"]["level"]["Int"], serde_json::json!(12));
}

#[test]
fn test_unversioned_payload_is_accepted() {
    // Payloads from before versioning carry no tag and read as-is.
    let schema = content::log_axis_schema();
    let mut container = DataContainer::new();
    container.set(
        content::log_axis_key().query(),
        Element::Catalog(CatalogKey::game("x").unwrap()),
    );

    let manipulator = DataManipulator::from_container(&schema, &container).unwrap();

    assert_eq!(
        manipulator.to_container().get_element(content::log_axis_key().query()),
        Some(&Element::Catalog(CatalogKey::game("x").unwrap()))
    );
}

#[test]
fn test_stray_fields_are_ignored() {
    let schema = content::log_axis_schema();
    let mut container = DataContainer::new();
    container.set_content_version(1);
    container.set(content::log_axis_key().query(), Element::Catalog(CatalogKey::game("z").unwrap()));
    container.set(
        &DataQuery::of("somebody.elses.path").unwrap(),
        Element::Int(5),
    );

    let manipulator = DataManipulator::from_container(&schema, &container).unwrap();
    let written = manipulator.to_container();

    assert!(!written.contains(&DataQuery::of("somebody.elses.path").unwrap()));
}
