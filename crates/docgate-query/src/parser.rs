//! Best-effort filter-string parser.
//!
//! ```text
//! filter     := term (connective term)*
//! connective := "and" | "or"
//! term       := property operator value
//!             | property ("isnull" | "isnotnull")
//! ```
//!
//! Terms that match neither shape are dropped; parsing never fails.

use std::sync::LazyLock;

use docgate_core::types::{FilterCriterion, FilterValue, LogicalOperator};
use regex::Regex;

use crate::{operator, value};

static NULL_CHECK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\w+)\s+(isnull|isnotnull)$").expect("null-check pattern is valid")
});

static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\w+)\s+(\w+)\s+(.+)$").expect("comparison pattern is valid")
});

/// A piece of the filter string between connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Term(&'a str),
    Connective(LogicalOperator),
}

/// Parse a filter string into an ordered list of criteria.
///
/// Blank input yields an empty list. The first criterion always carries
/// [`LogicalOperator::None`]; each later one carries the connective written
/// before it, or `And` when none was written.
pub fn parse(input: &str) -> Vec<FilterCriterion> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let normalized = value::normalize(input);
    let mut criteria: Vec<FilterCriterion> = Vec::new();
    let mut pending: Option<LogicalOperator> = None;

    for segment in split_segments(&normalized) {
        match segment {
            Segment::Connective(op) => pending = Some(op),
            Segment::Term(term) => {
                let connective = pending.take();
                let Some(mut criterion) = parse_term(term) else {
                    tracing::debug!(term, "Dropping unrecognized filter term");
                    continue;
                };
                criterion.logical_operator = if criteria.is_empty() {
                    LogicalOperator::None
                } else {
                    connective.unwrap_or(LogicalOperator::And)
                };
                criteria.push(criterion);
            }
        }
    }

    criteria
}

/// Parse one term, returning `None` if it matches no known shape.
fn parse_term(term: &str) -> Option<FilterCriterion> {
    if let Some(caps) = NULL_CHECK.captures(term) {
        let op = operator::lookup(&caps[2])?;
        return Some(FilterCriterion::new(&caps[1], op, FilterValue::Absent));
    }

    let caps = COMPARISON.captures(term)?;
    let op = operator::lookup(&caps[2]).filter(|op| op.takes_value())?;
    Some(FilterCriterion::new(&caps[1], op, value::decode(&caps[3])))
}

/// Split on whole-word `and`/`or`, outside of closed quoted literals.
///
/// A quote after whitespace, `(` or `,` opens a literal only when its next
/// matching quote ends a token. An unclosed quote is plain text, so the
/// connectives after it still split.
fn split_segments(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut term_start = 0;
    let mut resume_at = 0;
    let mut prev: Option<char> = None;

    for (idx, ch) in input.char_indices() {
        if idx < resume_at {
            prev = Some(ch);
            continue;
        }

        if (ch == '\'' || ch == '"') && opens_literal(prev) {
            if let Some(end) = literal_end(input, idx, ch) {
                resume_at = end;
            }
        } else if prev.is_none_or(char::is_whitespace) {
            if let Some((op, len)) = connective_at(input, idx) {
                push_term(&mut segments, &input[term_start..idx]);
                segments.push(Segment::Connective(op));
                resume_at = idx + len;
                term_start = resume_at;
            }
        }

        prev = Some(ch);
    }

    push_term(&mut segments, &input[term_start..]);
    segments
}

fn opens_literal(prev: Option<char>) -> bool {
    prev.is_none_or(|c| c.is_whitespace() || c == '(' || c == ',')
}

/// Byte offset just past the literal opened by `quote` at `at`, if its next
/// matching quote is followed by whitespace, `,`, `)` or the end of input.
fn literal_end(input: &str, at: usize, quote: char) -> Option<usize> {
    let body = at + quote.len_utf8();
    let close = body + input[body..].find(quote)?;
    let end = close + quote.len_utf8();
    input[end..]
        .chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || c == ',' || c == ')')
        .then_some(end)
}

fn push_term<'a>(segments: &mut Vec<Segment<'a>>, raw: &'a str) {
    let term = raw.trim();
    if !term.is_empty() {
        segments.push(Segment::Term(term));
    }
}

/// Match `and`/`or` at `at` when followed by whitespace or the end of input.
fn connective_at(input: &str, at: usize) -> Option<(LogicalOperator, usize)> {
    let rest = &input[at..];
    [("and", LogicalOperator::And), ("or", LogicalOperator::Or)]
        .into_iter()
        .find_map(|(word, op)| {
            let head = rest.get(..word.len())?;
            let bounded = rest[word.len()..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace);
            (head.eq_ignore_ascii_case(word) && bounded).then_some((op, word.len()))
        })
}
