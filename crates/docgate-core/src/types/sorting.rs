//! Sorting types for search endpoints.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Sort direction.
///
/// Parsing is lenient: `"DESC"` in any case selects [`SortDirection::Desc`],
/// every other string (including an empty one) selects ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Whether this direction is descending.
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl From<&str> for SortDirection {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// A sort specification consisting of a field name and direction.
///
/// An empty or unknown field leaves the data source order untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name to sort by (resolved case-insensitively).
    #[serde(rename = "sortBy", default)]
    pub field: String,
    /// Sort direction.
    #[serde(rename = "sortDirection", default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a new sort specification.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Whether a field was named at all.
    pub fn is_unset(&self) -> bool {
        self.field.trim().is_empty()
    }
}
