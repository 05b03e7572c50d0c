//! Built-in game content
//!
//! The modules, well-known keys and manipulator schemas every game ships
//! with: log axes, the sixteen dye colors, banner pattern shapes, and the
//! data units built on them. [`registry`] hands out the process-wide
//! registry seeded with all of it.
//!
//! The accessor functions look their constants up in the seeded registry.
//! A missing built-in means the seeding itself is broken, so they panic
//! rather than propagate.

use crate::module::CatalogRegistryModule;
use crate::registry::GameRegistry;
use facet_core::{
    CatalogEntry, CatalogKey, DataQuery, Element, ElementKind, Key, ValueKind,
};
use facet_data::{DataManipulator, ManipulatorSchema};
use facet_values::{BoundedValue, PatternListValue, ScalarValue};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Module id for log axes
pub const LOG_AXIS_MODULE: &str = "log_axis";
/// Module id for dye colors
pub const DYE_COLOR_MODULE: &str = "dye_color";
/// Module id for banner pattern shapes
pub const BANNER_PATTERN_SHAPE_MODULE: &str = "banner_pattern_shape";

const LOG_AXES: [&str; 4] = ["x", "y", "z", "none"];

const DYE_COLORS: [&str; 16] = [
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "light_gray",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

const BANNER_PATTERN_SHAPES: [&str; 12] = [
    "base",
    "border",
    "bricks",
    "circle",
    "cross",
    "flower",
    "gradient",
    "skull",
    "stripe_bottom",
    "stripe_left",
    "stripe_right",
    "stripe_top",
];

fn module_of(id: &str, names: &[&str]) -> CatalogRegistryModule {
    let mut module = CatalogRegistryModule::new(id);
    for name in names {
        let key = CatalogKey::game(name).expect("built-in catalog name is valid");
        let display = name.replace('_', " ");
        module
            .register(CatalogEntry::new(key, &display))
            .expect("built-in catalog names are distinct");
    }
    module
}

fn builtin_key(name: &str, display: &str, element: ElementKind, shape: ValueKind, path: &str) -> Key {
    Key::new(
        CatalogKey::game(name).expect("built-in key id is valid"),
        display,
        element,
        shape,
        DataQuery::of(path).expect("built-in key path is valid"),
    )
}

/// The key of the log axis value
pub fn log_axis_key() -> Key {
    builtin_key("log_axis", "Log Axis", ElementKind::Catalog, ValueKind::Scalar, "axis")
}

/// The key of the bounded experience level
pub fn experience_level_key() -> Key {
    builtin_key(
        "experience_level",
        "Experience Level",
        ElementKind::Int,
        ValueKind::Bounded,
        "experience.level",
    )
}

/// The key of the total accumulated experience
pub fn experience_total_key() -> Key {
    builtin_key(
        "experience_total",
        "Total Experience",
        ElementKind::Int,
        ValueKind::Scalar,
        "experience.total",
    )
}

/// The key of the banner base color
pub fn banner_base_color_key() -> Key {
    builtin_key(
        "banner_base_color",
        "Banner Base Color",
        ElementKind::Catalog,
        ValueKind::Scalar,
        "banner.base",
    )
}

/// The key of the positional banner pattern list
pub fn banner_patterns_key() -> Key {
    builtin_key(
        "banner_patterns",
        "Banner Patterns",
        ElementKind::Catalog,
        ValueKind::PatternList,
        "banner.patterns",
    )
}

/// The log axis data unit
pub fn log_axis_schema() -> Arc<ManipulatorSchema> {
    ManipulatorSchema::builder(
        CatalogKey::game("log_axis_data").expect("built-in schema id is valid"),
        "Log Axis Data",
        1,
    )
    .value(
        ScalarValue::new(
            log_axis_key(),
            Element::Catalog(CatalogKey::game("y").expect("built-in axis id is valid")),
        )
        .expect("built-in prototype matches its key"),
    )
    .build()
}

/// The mandatory experience data unit
pub fn experience_schema() -> Arc<ManipulatorSchema> {
    ManipulatorSchema::builder(
        CatalogKey::game("experience_data").expect("built-in schema id is valid"),
        "Experience Data",
        1,
    )
    .mandatory()
    .value(
        BoundedValue::new(
            experience_level_key(),
            Element::Int(0),
            Element::Int(0),
            Element::Int(30),
        )
        .expect("built-in bounds are well formed"),
    )
    .value(
        ScalarValue::new(experience_total_key(), Element::Int(0))
            .expect("built-in prototype matches its key"),
    )
    .build()
}

/// The banner data unit
pub fn banner_schema() -> Arc<ManipulatorSchema> {
    ManipulatorSchema::builder(
        CatalogKey::game("banner_data").expect("built-in schema id is valid"),
        "Banner Data",
        1,
    )
    .value(
        ScalarValue::new(
            banner_base_color_key(),
            Element::Catalog(CatalogKey::game("white").expect("built-in color id is valid")),
        )
        .expect("built-in prototype matches its key"),
    )
    .value(PatternListValue::new(banner_patterns_key(), Vec::new()))
    .build()
}

static REGISTRY: Lazy<GameRegistry> = Lazy::new(|| {
    let registry = GameRegistry::new();
    registry
        .register_module(module_of(LOG_AXIS_MODULE, &LOG_AXES))
        .expect("log axes register once");
    registry
        .register_module(module_of(DYE_COLOR_MODULE, &DYE_COLORS))
        .expect("dye colors register once");
    registry
        .register_module(module_of(BANNER_PATTERN_SHAPE_MODULE, &BANNER_PATTERN_SHAPES))
        .expect("banner shapes register once");
    for key in [
        log_axis_key(),
        experience_level_key(),
        experience_total_key(),
        banner_base_color_key(),
        banner_patterns_key(),
    ] {
        registry.register_key(key).expect("built-in keys register once");
    }
    for schema in [log_axis_schema(), experience_schema(), banner_schema()] {
        let builder_name = facet_core::CatalogType::key(schema.as_ref()).name().to_string();
        let supplier_schema = Arc::clone(&schema);
        registry
            .register_builder_supplier(&builder_name, move || {
                DataManipulator::new(Arc::clone(&supplier_schema))
            })
            .expect("built-in builders register once");
        registry.register_schema(schema).expect("built-in schemas register once");
    }
    registry
});

/// The process-wide registry, seeded with the built-in content
pub fn registry() -> &'static GameRegistry {
    &REGISTRY
}
