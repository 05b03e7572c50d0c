//! Dotted-path addressing into data containers
//!
//! A [`DataQuery`] names a position in a self-describing data tree:
//! `"banner.patterns"` addresses the `patterns` node under the `banner`
//! node. Queries are cheap, comparable and hashable so keys can carry the
//! query they serialise under.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Query parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query or one of its segments is empty
    #[error("Data query segments cannot be empty")]
    EmptySegment,
}

/// A dotted path into a [`crate::container::DataContainer`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DataQuery {
    parts: Vec<String>,
}

impl DataQuery {
    /// Parse a dotted path such as `"banner.patterns"`
    ///
    /// # Errors
    ///
    /// Returns an error if the query or any segment is empty.
    pub fn of(path: &str) -> Result<Self, QueryError> {
        if path.is_empty() {
            return Err(QueryError::EmptySegment);
        }
        let parts: Vec<String> = path.split('.').map(str::to_string).collect();
        if parts.iter().any(String::is_empty) {
            return Err(QueryError::EmptySegment);
        }
        Ok(DataQuery { parts })
    }

    /// Build a query from explicit segments
    ///
    /// # Errors
    ///
    /// Returns an error if no segments are given or any segment is empty.
    pub fn from_parts<I, S>(parts: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        if parts.is_empty() || parts.iter().any(String::is_empty) {
            return Err(QueryError::EmptySegment);
        }
        Ok(DataQuery { parts })
    }

    /// A new query with one more segment appended
    pub fn then(&self, segment: &str) -> Result<Self, QueryError> {
        if segment.is_empty() || segment.contains('.') {
            return Err(QueryError::EmptySegment);
        }
        let mut parts = self.parts.clone();
        parts.push(segment.to_string());
        Ok(DataQuery { parts })
    }

    /// The path segments, outermost first
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Split into the first segment and the remainder, if any
    pub(crate) fn split_first(&self) -> (&str, Option<DataQuery>) {
        let head = &self.parts[0];
        if self.parts.len() == 1 {
            (head, None)
        } else {
            (
                head,
                Some(DataQuery {
                    parts: self.parts[1..].to_vec(),
                }),
            )
        }
    }
}

impl fmt::Display for DataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

impl FromStr for DataQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataQuery::of(s)
    }
}
