//! Catalog registry and built-in content for the facet data system
//!
//! [`GameRegistry`] catalogs content modules, well-known keys, manipulator
//! schemas and builder suppliers. [`content`] seeds a process-wide
//! instance with the built-in game content and exposes it through
//! [`content::registry`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod module;
pub mod registry;

pub use content::registry;
pub use module::CatalogRegistryModule;
pub use registry::GameRegistry;
