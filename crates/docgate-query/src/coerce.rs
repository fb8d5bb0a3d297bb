//! Text-to-value coercion of filter literals against a field's kind.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::schema::{Field, FieldKind, FieldValue};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Convert a literal to the kind of `field`, or explain why it cannot be.
pub fn coerce<T>(field: &Field<T>, literal: &str) -> Result<FieldValue, String> {
    let text = literal.trim();
    match field.kind() {
        FieldKind::String => Ok(FieldValue::Text(literal.to_string())),
        FieldKind::Enum => parse_enum(field.variants(), text)
            .map(FieldValue::Enum)
            .ok_or_else(|| {
                format!(
                    "'{literal}' is not one of: {}",
                    field.variants().join(", ")
                )
            }),
        FieldKind::Guid => Uuid::parse_str(text)
            .map(FieldValue::Guid)
            .map_err(|e| format!("'{literal}' is not a valid GUID ({e})")),
        FieldKind::DateTime => parse_datetime(text)
            .map(FieldValue::DateTime)
            .ok_or_else(|| format!("'{literal}' is not an ISO-8601 date or date-time")),
        FieldKind::Bool => parse_bool(text)
            .map(FieldValue::Bool)
            .ok_or_else(|| format!("'{literal}' is not 'true' or 'false'")),
        FieldKind::Numeric => parse_number(text).ok_or_else(|| format!("'{literal}' is not a number")),
    }
}

/// Variant by case-insensitive name, or by its ordinal digits.
fn parse_enum(variants: &[&str], text: &str) -> Option<u32> {
    if let Some(pos) = variants.iter().position(|v| v.eq_ignore_ascii_case(text)) {
        return u32::try_from(pos).ok();
    }
    text.parse::<u32>()
        .ok()
        .filter(|ordinal| (*ordinal as usize) < variants.len())
}

/// RFC 3339, or a naive date/date-time taken as UTC.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_number(text: &str) -> Option<FieldValue> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(FieldValue::Integer(int));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(FieldValue::Float)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use chrono::{Datelike, Timelike};

    struct Probe;

    const LEVELS: &[&str] = &["LOW", "HIGH"];

    fn schema() -> Schema<Probe> {
        Schema::<Probe>::new("Probe")
            .field("text", FieldKind::String, |_| FieldValue::Null)
            .enumeration("level", LEVELS, |_| FieldValue::Enum(0))
            .field("id", FieldKind::Guid, |_| FieldValue::Null)
            .field("at", FieldKind::DateTime, |_| FieldValue::Null)
            .field("flag", FieldKind::Bool, |_| FieldValue::Null)
            .field("n", FieldKind::Numeric, |_| FieldValue::Null)
    }

    fn coerce_on(name: &str, literal: &str) -> Result<FieldValue, String> {
        let schema = schema();
        coerce(schema.resolve(name).unwrap(), literal)
    }

    #[test]
    fn test_enum_by_name_and_ordinal() {
        assert_eq!(coerce_on("level", "high"), Ok(FieldValue::Enum(1)));
        assert_eq!(coerce_on("level", "LOW"), Ok(FieldValue::Enum(0)));
        assert_eq!(coerce_on("level", "1"), Ok(FieldValue::Enum(1)));
        assert!(coerce_on("level", "2").is_err());
        assert!(coerce_on("level", "MEDIUM").unwrap_err().contains("LOW, HIGH"));
    }

    #[test]
    fn test_guid() {
        let id = Uuid::new_v4();
        assert_eq!(coerce_on("id", &id.to_string()), Ok(FieldValue::Guid(id)));
        assert!(coerce_on("id", "not-a-guid").is_err());
    }

    #[test]
    fn test_datetime_formats() {
        let FieldValue::DateTime(dt) = coerce_on("at", "2024-01-15T10:30:00").unwrap() else {
            panic!("expected datetime");
        };
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 1, 15, 10));

        assert!(coerce_on("at", "2024-01-15").is_ok());
        assert!(coerce_on("at", "2024-01-15 10:30:00.250").is_ok());

        let FieldValue::DateTime(dt) = coerce_on("at", "2024-01-15T10:30:00+02:00").unwrap() else {
            panic!("expected datetime");
        };
        assert_eq!(dt.hour(), 8);

        assert!(coerce_on("at", "15/01/2024").is_err());
    }

    #[test]
    fn test_bool() {
        assert_eq!(coerce_on("flag", "TRUE"), Ok(FieldValue::Bool(true)));
        assert_eq!(coerce_on("flag", "false"), Ok(FieldValue::Bool(false)));
        assert!(coerce_on("flag", "yes").is_err());
    }

    #[test]
    fn test_numeric() {
        assert_eq!(coerce_on("n", "1000"), Ok(FieldValue::Integer(1000)));
        assert_eq!(coerce_on("n", " -3 "), Ok(FieldValue::Integer(-3)));
        assert_eq!(coerce_on("n", "2.5"), Ok(FieldValue::Float(2.5)));
        assert!(coerce_on("n", "abc").is_err());
        assert!(coerce_on("n", "NaN").is_err());
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(coerce_on("text", " padded "), Ok(FieldValue::Text(" padded ".into())));
    }
}
