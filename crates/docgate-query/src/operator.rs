//! Filter-token to operator lookup table.

use std::collections::HashMap;
use std::sync::LazyLock;

use docgate_core::types::FilterOperator;

static OPERATORS: LazyLock<HashMap<&'static str, FilterOperator>> = LazyLock::new(|| {
    HashMap::from([
        ("eq", FilterOperator::Equals),
        ("ne", FilterOperator::NotEquals),
        ("neq", FilterOperator::NotEquals),
        ("gt", FilterOperator::GreaterThan),
        ("ge", FilterOperator::GreaterThanOrEqual),
        ("gte", FilterOperator::GreaterThanOrEqual),
        ("lt", FilterOperator::LessThan),
        ("le", FilterOperator::LessThanOrEqual),
        ("lte", FilterOperator::LessThanOrEqual),
        ("contains", FilterOperator::Contains),
        ("startswith", FilterOperator::StartsWith),
        ("endswith", FilterOperator::EndsWith),
        ("in", FilterOperator::In),
        ("isnull", FilterOperator::IsNull),
        ("isnotnull", FilterOperator::IsNotNull),
    ])
});

/// Look up an operator token, ignoring ASCII case.
pub fn lookup(token: &str) -> Option<FilterOperator> {
    OPERATORS.get(token.to_ascii_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(lookup("ne"), Some(FilterOperator::NotEquals));
        assert_eq!(lookup("neq"), Some(FilterOperator::NotEquals));
        assert_eq!(lookup("gte"), Some(FilterOperator::GreaterThanOrEqual));
        assert_eq!(lookup("lte"), Some(FilterOperator::LessThanOrEqual));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(lookup("EQ"), Some(FilterOperator::Equals));
        assert_eq!(lookup("StartsWith"), Some(FilterOperator::StartsWith));
        assert_eq!(lookup("IsNotNull"), Some(FilterOperator::IsNotNull));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(lookup("like"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_every_token_round_trips_to_canonical_or_alias() {
        for (token, op) in OPERATORS.iter() {
            assert_eq!(lookup(token), Some(*op));
            assert_eq!(lookup(op.token()), Some(*op));
        }
        assert_eq!(OPERATORS.len(), 15);
    }
}
