//! Filter types produced by the filter parser and consumed by the
//! predicate compiler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Exact equality.
    Equals,
    /// Not equal.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal.
    LessThanOrEqual,
    /// Substring match (string fields only).
    Contains,
    /// Prefix match (string fields only).
    StartsWith,
    /// Suffix match (string fields only).
    EndsWith,
    /// List membership.
    In,
    /// Field has no value.
    IsNull,
    /// Field has a value.
    IsNotNull,
}

impl FilterOperator {
    /// Canonical filter-string token for this operator.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::NotEquals => "ne",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqual => "ge",
            Self::LessThan => "lt",
            Self::LessThanOrEqual => "le",
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::In => "in",
            Self::IsNull => "isnull",
            Self::IsNotNull => "isnotnull",
        }
    }

    /// Whether the operator is followed by a value in the filter string.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// Whether the operator needs an ordering on the field kind.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::GreaterThanOrEqual | Self::LessThan | Self::LessThanOrEqual
        )
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Connective joining a criterion to the accumulated expression before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    /// First criterion of a chain.
    #[default]
    None,
    /// Both sides must hold.
    And,
    /// Either side must hold.
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// Raw criterion value as decoded from the filter string.
///
/// Typed coercion happens later, once the target field kind is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A single literal (quotes already removed).
    Text(String),
    /// A parenthesized, comma-separated list (for `in`).
    List(Vec<String>),
    /// No value (for `isnull`, `isnotnull`).
    Absent,
}

impl FilterValue {
    /// Return the items if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "'{text}'"),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{item}'")?;
                }
                f.write_str(")")
            }
            Self::Absent => Ok(()),
        }
    }
}

/// A single filter condition on a named property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Property name as written by the client (resolved case-insensitively).
    pub property: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The value to compare against.
    pub value: FilterValue,
    /// Connective to the criteria before this one.
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl FilterCriterion {
    /// Create a new criterion with no connective.
    pub fn new(property: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            property: property.into(),
            operator,
            value,
            logical_operator: LogicalOperator::None,
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.operator)?;
        if !matches!(self.value, FilterValue::Absent) {
            write!(f, " {}", self.value)?;
        }
        Ok(())
    }
}
