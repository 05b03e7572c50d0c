//! Catalog identity for Facet
//!
//! Everything the game exposes by name (value keys, block variants, dye
//! colors) is identified by a [`CatalogKey`]: a `namespace:name` pair.
//! Identity is textual: two catalog entries with equal keys are the same
//! entry, regardless of object identity, so registries can be rebuilt across
//! test runs without breaking comparisons.
//!
//! ## Contract
//!
//! Catalog key rules are FROZEN:
//! - Both parts must be non-empty
//! - Both parts are restricted to `[a-z0-9_.-]`
//! - A textual id contains at most one `:`
//! - An unqualified id resolves into the default namespace (`game`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The namespace an unqualified id resolves into
pub const DEFAULT_NAMESPACE: &str = "game";

/// Checks one side of a `namespace:name` pair
fn validate_part(part: &str) -> Result<(), CatalogKeyError> {
    if part.is_empty() {
        return Err(CatalogKeyError::Empty);
    }
    if let Some(c) = part
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')))
    {
        return Err(CatalogKeyError::InvalidCharacter { character: c });
    }
    Ok(())
}

/// Catalog key validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogKeyError {
    /// The namespace or name part is empty
    #[error("Catalog key parts cannot be empty")]
    Empty,

    /// A part contains a character outside `[a-z0-9_.-]`
    #[error("Catalog key contains invalid character '{character}'")]
    InvalidCharacter {
        /// The offending character
        character: char,
    },

    /// The textual form contains more than one `:`
    #[error("Catalog key must contain at most one ':'")]
    TooManyColons,
}

/// A `namespace:name` identity for a catalog entry
///
/// Equality, ordering and hashing are defined by the two strings only.
/// Keys are cheap to clone and are used as map keys throughout the system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogKey {
    namespace: String,
    name: String,
}

impl CatalogKey {
    /// Create a key from validated parts
    ///
    /// # Errors
    ///
    /// Returns an error if either part is empty or contains a character
    /// outside `[a-z0-9_.-]`.
    pub fn new(namespace: &str, name: &str) -> Result<Self, CatalogKeyError> {
        validate_part(namespace)?;
        validate_part(name)?;
        Ok(CatalogKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    /// Create a key in the default namespace
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid.
    pub fn game(name: &str) -> Result<Self, CatalogKeyError> {
        CatalogKey::new(DEFAULT_NAMESPACE, name)
    }

    /// Parse a qualified textual id (`namespace:name`)
    ///
    /// # Errors
    ///
    /// Returns an error for empty parts, invalid characters, or more than
    /// one `:`.
    pub fn parse(id: &str) -> Result<Self, CatalogKeyError> {
        let mut parts = id.splitn(3, ':');
        let first = parts.next().unwrap_or("");
        match (parts.next(), parts.next()) {
            (None, _) => CatalogKey::game(first),
            (Some(second), None) => CatalogKey::new(first, second),
            (Some(_), Some(_)) => Err(CatalogKeyError::TooManyColons),
        }
    }

    /// Resolve a possibly-unqualified legacy id
    ///
    /// `"oak_log"` resolves to `game:oak_log`; a qualified id parses as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not a valid key in either form.
    pub fn resolve(id: &str) -> Result<Self, CatalogKeyError> {
        CatalogKey::parse(id)
    }

    /// The namespace part
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name part
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for CatalogKey {
    type Err = CatalogKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogKey::parse(s)
    }
}

/// A named catalog singleton
///
/// Implementations compare equal by [`CatalogKey`] identity only.
pub trait CatalogType {
    /// The catalog identity of this entry
    fn key(&self) -> &CatalogKey;

    /// Human-readable display name
    fn name(&self) -> &str;
}

/// A plain catalog entry: an identity plus a display name
///
/// Most enum-like game constants (log axes, dye colors, banner pattern
/// shapes) need nothing beyond identity and a display name, so they share
/// this one concrete type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    key: CatalogKey,
    display_name: String,
}

impl CatalogEntry {
    /// Create an entry with an explicit display name
    pub fn new(key: CatalogKey, display_name: &str) -> Self {
        CatalogEntry {
            key,
            display_name: display_name.to_string(),
        }
    }
}

impl CatalogType for CatalogEntry {
    fn key(&self) -> &CatalogKey {
        &self.key
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

// Identity is the catalog key; display names do not participate.
impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CatalogEntry {}
