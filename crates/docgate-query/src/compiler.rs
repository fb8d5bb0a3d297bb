//! Predicate compiler: parsed criteria + schema → reusable predicate.
//!
//! Criteria are folded strictly left to right into a tagged expression tree.
//! There is no operator precedence: `a or b and c` means `(a or b) and c`.

use std::fmt;
use std::sync::Arc;

use docgate_core::types::{FilterCriterion, FilterOperator, FilterValue, LogicalOperator};

use crate::coerce::coerce;
use crate::error::QueryError;
use crate::schema::{Field, FieldKind, FieldValue, Schema};

/// Value comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Comparison {
    fn holds(self, field: &FieldValue, literal: &FieldValue) -> bool {
        use std::cmp::Ordering::*;
        let ord = field.compare(literal);
        match self {
            Self::Eq => ord == Some(Equal),
            Self::Ne => ord != Some(Equal),
            Self::Gt => ord == Some(Greater),
            Self::Ge => matches!(ord, Some(Greater | Equal)),
            Self::Lt => ord == Some(Less),
            Self::Le => matches!(ord, Some(Less | Equal)),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }
}

/// String match operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Substring.
    Contains,
    /// Prefix.
    StartsWith,
    /// Suffix.
    EndsWith,
}

impl TextMatch {
    fn holds(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::Contains => haystack.contains(needle),
            Self::StartsWith => haystack.starts_with(needle),
            Self::EndsWith => haystack.ends_with(needle),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
        }
    }
}

/// Compiled filter expression.
#[derive(Debug)]
pub enum Expr<T> {
    /// Constant result (empty filter, null checks on non-nullable fields).
    Const(bool),
    /// Field compared with a coerced literal.
    Compare {
        /// Resolved field.
        field: Field<T>,
        /// Comparison to apply.
        op: Comparison,
        /// Coerced literal.
        value: FieldValue,
    },
    /// String match on a text field.
    Text {
        /// Resolved field.
        field: Field<T>,
        /// Match to apply.
        op: TextMatch,
        /// Literal to look for.
        needle: String,
    },
    /// Null check on a nullable field.
    Null {
        /// Resolved field.
        field: Field<T>,
        /// `true` for `isnotnull`.
        negated: bool,
    },
    /// Both sides hold.
    And(Box<Expr<T>>, Box<Expr<T>>),
    /// Either side holds.
    Or(Box<Expr<T>>, Box<Expr<T>>),
}

impl<T> Expr<T> {
    /// Evaluate against a single record.
    pub fn evaluate(&self, record: &T) -> bool {
        match self {
            Self::Const(value) => *value,
            Self::Compare { field, op, value } => op.holds(&field.read(record), value),
            Self::Text { field, op, needle } => match field.read(record) {
                FieldValue::Text(haystack) => op.holds(&haystack, needle),
                _ => false,
            },
            Self::Null { field, negated } => field.read(record).is_null() != *negated,
            Self::And(left, right) => left.evaluate(record) && right.evaluate(record),
            Self::Or(left, right) => left.evaluate(record) || right.evaluate(record),
        }
    }
}

impl<T> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => write!(f, "{value}"),
            Self::Compare { field, op, value } => {
                write!(f, "{} {} ", field.name(), op.symbol())?;
                fmt_literal(f, field, value)
            }
            Self::Text { field, op, needle } => {
                write!(f, "{} {} '{needle}'", field.name(), op.symbol())
            }
            Self::Null { field, negated } => {
                let op = if *negated { "isnotnull" } else { "isnull" };
                write!(f, "{} {op}", field.name())
            }
            Self::And(left, right) => write!(f, "({left} AND {right})"),
            Self::Or(left, right) => write!(f, "({left} OR {right})"),
        }
    }
}

fn fmt_literal<T>(f: &mut fmt::Formatter<'_>, field: &Field<T>, value: &FieldValue) -> fmt::Result {
    match value {
        FieldValue::Null => f.write_str("null"),
        FieldValue::Text(text) => write!(f, "'{text}'"),
        FieldValue::Enum(ordinal) => match field.variant_name(*ordinal) {
            Some(name) => write!(f, "'{name}'"),
            None => write!(f, "{ordinal}"),
        },
        FieldValue::Guid(id) => write!(f, "'{id}'"),
        FieldValue::DateTime(dt) => write!(f, "'{}'", dt.to_rfc3339()),
        FieldValue::Bool(b) => write!(f, "{b}"),
        FieldValue::Integer(n) => write!(f, "{n}"),
        FieldValue::Float(n) => write!(f, "{n}"),
    }
}

/// A compiled, side-effect-free filter over records of type `T`.
///
/// Cloning is cheap; the expression tree is shared.
pub struct Predicate<T> {
    expr: Arc<Expr<T>>,
}

impl<T> Predicate<T> {
    /// Wrap an expression tree.
    pub fn new(expr: Expr<T>) -> Self {
        Self {
            expr: Arc::new(expr),
        }
    }

    /// A predicate that accepts every record.
    pub fn always() -> Self {
        Self::new(Expr::Const(true))
    }

    /// Whether the record satisfies the filter.
    pub fn matches(&self, record: &T) -> bool {
        self.expr.evaluate(record)
    }

    /// The underlying expression tree.
    pub fn expr(&self) -> &Expr<T> {
        &self.expr
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            expr: Arc::clone(&self.expr),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.expr)
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}

/// Compile parsed criteria against a schema.
///
/// An empty criteria list compiles to [`Predicate::always`]. The first
/// criterion seeds the accumulator; each later one is joined to it with its
/// own connective (`None` is treated as `And`).
pub fn compile<T>(schema: &Schema<T>, criteria: &[FilterCriterion]) -> Result<Predicate<T>, QueryError> {
    let mut acc: Option<Expr<T>> = None;

    for criterion in criteria {
        let expr = compile_criterion(schema, criterion)?;
        acc = Some(match acc {
            None => expr,
            Some(prev) => match criterion.logical_operator {
                LogicalOperator::Or => Expr::Or(Box::new(prev), Box::new(expr)),
                LogicalOperator::And | LogicalOperator::None => {
                    Expr::And(Box::new(prev), Box::new(expr))
                }
            },
        });
    }

    let predicate = acc.map_or_else(Predicate::always, Predicate::new);
    tracing::debug!(
        entity = schema.entity(),
        criteria = criteria.len(),
        predicate = %predicate,
        "Compiled filter"
    );
    Ok(predicate)
}

fn compile_criterion<T>(schema: &Schema<T>, criterion: &FilterCriterion) -> Result<Expr<T>, QueryError> {
    let field = *schema
        .resolve(&criterion.property)
        .ok_or_else(|| QueryError::UnknownProperty {
            property: criterion.property.clone(),
            entity: schema.entity(),
        })?;

    let op = criterion.operator;
    match op {
        FilterOperator::Equals
        | FilterOperator::NotEquals
        | FilterOperator::GreaterThan
        | FilterOperator::GreaterThanOrEqual
        | FilterOperator::LessThan
        | FilterOperator::LessThanOrEqual => {
            if op.is_ordering() && !field.kind().is_ordered() {
                return Err(type_mismatch(criterion, &field));
            }
            let literal = single_literal(criterion)?;
            let value = coerce(&field, literal).map_err(|reason| format_error(criterion, reason))?;
            Ok(Expr::Compare {
                field,
                op: comparison(op),
                value,
            })
        }
        FilterOperator::Contains | FilterOperator::StartsWith | FilterOperator::EndsWith => {
            if field.kind() != FieldKind::String {
                return Err(type_mismatch(criterion, &field));
            }
            let needle = single_literal(criterion)?.to_string();
            let op = match op {
                FilterOperator::StartsWith => TextMatch::StartsWith,
                FilterOperator::EndsWith => TextMatch::EndsWith,
                _ => TextMatch::Contains,
            };
            Ok(Expr::Text { field, op, needle })
        }
        FilterOperator::In => {
            let items = criterion
                .value
                .as_list()
                .filter(|items| !items.is_empty())
                .ok_or_else(|| format_error(criterion, "expected a non-empty list such as ('A', 'B')"))?;

            let mut any: Option<Expr<T>> = None;
            for item in items {
                let value = coerce(&field, item).map_err(|reason| format_error(criterion, reason))?;
                let eq = Expr::Compare {
                    field,
                    op: Comparison::Eq,
                    value,
                };
                any = Some(match any {
                    None => eq,
                    Some(prev) => Expr::Or(Box::new(prev), Box::new(eq)),
                });
            }
            Ok(any.unwrap_or(Expr::Const(false)))
        }
        FilterOperator::IsNull | FilterOperator::IsNotNull => {
            let negated = op == FilterOperator::IsNotNull;
            if field.is_nullable() {
                Ok(Expr::Null { field, negated })
            } else {
                Ok(Expr::Const(negated))
            }
        }
    }
}

fn comparison(op: FilterOperator) -> Comparison {
    match op {
        FilterOperator::NotEquals => Comparison::Ne,
        FilterOperator::GreaterThan => Comparison::Gt,
        FilterOperator::GreaterThanOrEqual => Comparison::Ge,
        FilterOperator::LessThan => Comparison::Lt,
        FilterOperator::LessThanOrEqual => Comparison::Le,
        _ => Comparison::Eq,
    }
}

fn single_literal(criterion: &FilterCriterion) -> Result<&str, QueryError> {
    match &criterion.value {
        FilterValue::Text(text) => Ok(text),
        FilterValue::List(_) => Err(format_error(criterion, "expected a single value, found a list")),
        FilterValue::Absent => Err(format_error(criterion, "missing value")),
    }
}

fn type_mismatch<T>(criterion: &FilterCriterion, field: &Field<T>) -> QueryError {
    QueryError::TypeMismatch {
        property: criterion.property.clone(),
        operator: criterion.operator,
        kind: field.kind(),
    }
}

fn format_error(criterion: &FilterCriterion, reason: impl Into<String>) -> QueryError {
    QueryError::Format {
        criterion: criterion.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use uuid::Uuid;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Status {
        Received,
        Sent,
        Failed,
    }

    const STATUS_NAMES: &[&str] = &["RECEIVED", "SENT", "FAILED"];

    struct Doc {
        id: Uuid,
        filename: String,
        status: Status,
        size: i64,
        customer: Option<String>,
        archived: bool,
    }

    fn doc(filename: &str, status: Status, size: i64) -> Doc {
        Doc {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            status,
            size,
            customer: None,
            archived: false,
        }
    }

    fn schema() -> Schema<Doc> {
        Schema::<Doc>::new("Doc")
            .field("id", FieldKind::Guid, |d| d.id.into())
            .field("filename", FieldKind::String, |d| d.filename.clone().into())
            .enumeration("status", STATUS_NAMES, |d| FieldValue::Enum(d.status as u32))
            .field("size", FieldKind::Numeric, |d| d.size.into())
            .nullable("customerId", FieldKind::String, |d| d.customer.clone().into())
            .field("archived", FieldKind::Bool, |d| d.archived.into())
    }

    fn compile_str(filter: &str) -> Result<Predicate<Doc>, QueryError> {
        compile(&schema(), &parse(filter))
    }

    #[test]
    fn test_empty_matches_everything() {
        let predicate = compile_str("").unwrap();
        assert!(predicate.matches(&doc("a", Status::Sent, 1)));
        assert_eq!(predicate.to_string(), "true");
    }

    #[test]
    fn test_numeric_greater_than() {
        let predicate = compile_str("size gt 1000").unwrap();
        assert!(predicate.matches(&doc("a", Status::Received, 2000)));
        assert!(!predicate.matches(&doc("a", Status::Received, 500)));
        assert!(!predicate.matches(&doc("a", Status::Received, 1000)));
    }

    #[test]
    fn test_contains_and_enum_equals() {
        let predicate = compile_str("filename contains 'test' and status eq 'RECEIVED'").unwrap();
        assert!(predicate.matches(&doc("test.pdf", Status::Received, 1)));
        assert!(!predicate.matches(&doc("test.pdf", Status::Sent, 1)));
        assert!(!predicate.matches(&doc("other.pdf", Status::Received, 1)));
    }

    #[test]
    fn test_left_to_right_without_precedence() {
        // a = filename eq 'x', b = size eq 1, c = status eq 'SENT'.
        // With a true and c false: (a OR b) AND c = false, a OR (b AND c) = true.
        let record = doc("x", Status::Received, 99);
        let predicate = compile_str("filename eq 'x' or size eq 1 and status eq 'SENT'").unwrap();
        assert!(!predicate.matches(&record));
        assert_eq!(
            predicate.to_string(),
            "((filename eq 'x' OR size eq 1) AND status eq 'SENT')"
        );

        let conventional = filename_or_size_and_status(&record);
        assert!(conventional);
    }

    fn filename_or_size_and_status(d: &Doc) -> bool {
        d.filename == "x" || (d.size == 1 && d.status == Status::Sent)
    }

    #[test]
    fn test_in_over_enum() {
        let predicate = compile_str("status in ('received', 'FAILED')").unwrap();
        assert!(predicate.matches(&doc("a", Status::Received, 1)));
        assert!(predicate.matches(&doc("a", Status::Failed, 1)));
        assert!(!predicate.matches(&doc("a", Status::Sent, 1)));
    }

    #[test]
    fn test_in_requires_list() {
        let err = compile_str("status in 'SENT'").unwrap_err();
        assert!(matches!(err, QueryError::Format { .. }));

        let err = compile_str("status in ()").unwrap_err();
        assert!(matches!(err, QueryError::Format { .. }));
    }

    #[test]
    fn test_unknown_property() {
        let err = compile_str("colour eq 'red'").unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownProperty {
                property: "colour".into(),
                entity: "Doc",
            }
        );
    }

    #[test]
    fn test_contains_on_non_string() {
        let err = compile_str("size contains '1'").unwrap_err();
        assert!(matches!(
            err,
            QueryError::TypeMismatch {
                kind: FieldKind::Numeric,
                ..
            }
        ));
    }

    #[test]
    fn test_ordering_on_unordered_kinds_rejected() {
        let id = Uuid::new_v4();
        for filter in [
            "archived gt 'true'".to_string(),
            format!("id lt '{id}'"),
            "status ge 'SENT'".to_string(),
            "filename le 'm'".to_string(),
        ] {
            let err = compile_str(&filter).unwrap_err();
            assert!(
                matches!(err, QueryError::TypeMismatch { .. }),
                "{filter} gave {err:?}"
            );
        }

        assert!(compile_str("archived eq TRUE").is_ok());
        assert!(compile_str(&format!("id ne '{id}'")).is_ok());
        assert!(compile_str("size le 10").is_ok());
    }

    #[test]
    fn test_format_error_names_criterion() {
        let err = compile_str("size gt 'big'").unwrap_err();
        let QueryError::Format { criterion, .. } = &err else {
            panic!("expected format error, got {err:?}");
        };
        assert_eq!(criterion, "size gt 'big'");

        assert!(compile_str("status eq 'ARCHIVED'").is_err());
        assert!(compile_str("id eq 'nope'").is_err());
    }

    #[test]
    fn test_null_checks() {
        let mut with_customer = doc("a", Status::Sent, 1);
        with_customer.customer = Some("c-1".into());
        let without = doc("a", Status::Sent, 1);

        let is_null = compile_str("customerId isnull").unwrap();
        assert!(is_null.matches(&without));
        assert!(!is_null.matches(&with_customer));

        let not_null = compile_str("customerid isnotnull").unwrap();
        assert!(not_null.matches(&with_customer));
        assert!(!not_null.matches(&without));
    }

    #[test]
    fn test_null_check_on_non_nullable_is_constant() {
        let record = doc("a", Status::Sent, 1);
        assert!(!compile_str("size isnull").unwrap().matches(&record));
        assert!(compile_str("size isnotnull").unwrap().matches(&record));
    }

    #[test]
    fn test_null_field_comparisons() {
        let record = doc("a", Status::Sent, 1);
        assert!(!compile_str("customerId eq 'c-1'").unwrap().matches(&record));
        assert!(compile_str("customerId ne 'c-1'").unwrap().matches(&record));
        assert!(!compile_str("customerId contains 'c'").unwrap().matches(&record));
    }

    #[test]
    fn test_guid_equality() {
        let record = doc("a", Status::Sent, 1);
        let predicate = compile_str(&format!("id eq '{}'", record.id)).unwrap();
        assert!(predicate.matches(&record));
        assert!(!predicate.matches(&doc("a", Status::Sent, 1)));
    }

    #[test]
    fn test_text_matching_is_case_sensitive() {
        let record = doc("Report.PDF", Status::Sent, 1);
        assert!(compile_str("filename startswith 'Report'").unwrap().matches(&record));
        assert!(compile_str("filename endswith '.PDF'").unwrap().matches(&record));
        assert!(!compile_str("filename endswith '.pdf'").unwrap().matches(&record));
    }

    #[test]
    fn test_predicate_is_reusable() {
        let predicate = compile_str("size le 10").unwrap();
        let copy = predicate.clone();
        let records = [doc("a", Status::Sent, 5), doc("b", Status::Sent, 50)];
        let first: Vec<bool> = records.iter().map(|r| predicate.matches(r)).collect();
        let second: Vec<bool> = records.iter().map(|r| copy.matches(r)).collect();
        assert_eq!(first, vec![true, false]);
        assert_eq!(first, second);
    }
}
