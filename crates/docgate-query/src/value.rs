//! Filter-string normalization and raw value decoding.

use std::borrow::Cow;

use docgate_core::types::FilterValue;
use percent_encoding::percent_decode_str;

/// URL-decode a filter string and map `+` to a space.
///
/// Invalid percent sequences are kept verbatim. If the decoded bytes are not
/// valid UTF-8, the undecoded text is used instead.
pub fn normalize(raw: &str) -> String {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw));
    decoded.replace('+', " ")
}

/// Decode the value fragment that follows an operator token.
///
/// - `(a, 'b', "c")` becomes a list, each item stripped of quotes and spaces
/// - `'text'` or `"text"` is unwrapped
/// - anything else is passed through as-is
pub fn decode(raw: &str) -> FilterValue {
    let raw = raw.trim();

    if raw.starts_with('(') && raw.ends_with(')') {
        let inner = raw.trim_matches(|c| c == '(' || c == ')');
        if inner.trim().is_empty() {
            return FilterValue::List(Vec::new());
        }
        let items = inner
            .split(',')
            .map(|item| item.trim_matches(|c| c == '\'' || c == '"' || c == ' ').to_string())
            .collect();
        return FilterValue::List(items);
    }

    FilterValue::Text(unquote(raw).to_string())
}

/// Strip one pair of matching single or double quotes.
fn unquote(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_encoding() {
        assert_eq!(
            normalize("filename%20eq%20'test%20file.pdf'"),
            "filename eq 'test file.pdf'"
        );
        assert_eq!(normalize("status+eq+'SENT'"), "status eq 'SENT'");
    }

    #[test]
    fn test_normalize_keeps_invalid_sequences() {
        assert_eq!(normalize("size gt 100%zz"), "size gt 100%zz");
        assert_eq!(normalize("bad %FF byte"), "bad %FF byte");
    }

    #[test]
    fn test_decode_quoted() {
        assert_eq!(decode("'RECEIVED'"), FilterValue::Text("RECEIVED".into()));
        assert_eq!(decode("\"a b\""), FilterValue::Text("a b".into()));
        assert_eq!(decode("''"), FilterValue::Text(String::new()));
    }

    #[test]
    fn test_decode_bare_and_lone_quote() {
        assert_eq!(decode("1000"), FilterValue::Text("1000".into()));
        assert_eq!(decode("'"), FilterValue::Text("'".into()));
        assert_eq!(decode("'mixed\""), FilterValue::Text("'mixed\"".into()));
    }

    #[test]
    fn test_decode_list() {
        assert_eq!(
            decode("('A', \"B\" , C)"),
            FilterValue::List(vec!["A".into(), "B".into(), "C".into()])
        );
        assert_eq!(decode("( )"), FilterValue::List(Vec::new()));
    }
}
