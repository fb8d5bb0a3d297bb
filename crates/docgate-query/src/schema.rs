//! Schema descriptors: the explicit, per-record-type table of searchable
//! fields that the compiler and the sort applier resolve names against.
//!
//! A schema is built once by the crate that owns the record type and then
//! shared (usually through a `LazyLock` static behind [`Searchable`]).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Declared kind of a searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text.
    String,
    /// Closed set of named variants, ordered by declaration.
    Enum,
    /// UUID.
    Guid,
    /// UTC timestamp.
    DateTime,
    /// Boolean flag.
    Bool,
    /// Integer or floating-point number.
    Numeric,
}

impl FieldKind {
    /// Whether `gt`/`ge`/`lt`/`le` are defined on this kind.
    pub fn is_ordered(&self) -> bool {
        matches!(self, Self::Numeric | Self::DateTime)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Enum => "enum",
            Self::Guid => "guid",
            Self::DateTime => "datetime",
            Self::Bool => "bool",
            Self::Numeric => "numeric",
        };
        f.write_str(name)
    }
}

/// A field value read from a record, or a coerced filter literal.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value.
    Null,
    /// Text value.
    Text(String),
    /// Enum variant by declaration ordinal.
    Enum(u32),
    /// UUID value.
    Guid(Uuid),
    /// Timestamp value.
    DateTime(DateTime<Utc>),
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
}

impl FieldValue {
    /// Whether this is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compare two non-null values of compatible kinds.
    ///
    /// Returns `None` when either side is null or the kinds differ, which
    /// makes every ordering comparison against a null evaluate to false.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Enum(a), Self::Enum(b)) => Some(a.cmp(b)),
            (Self::Guid(a), Self::Guid(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    /// Total order used for sorting: nulls first, then [`Self::compare`].
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .compare(other)
                .unwrap_or_else(|| self.rank().cmp(&other.rank())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) | Self::Float(_) => 2,
            Self::Enum(_) => 3,
            Self::DateTime(_) => 4,
            Self::Guid(_) => 5,
            Self::Text(_) => 6,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Guid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Null, Self::DateTime)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Reads one field from a record.
pub type Accessor<T> = fn(&T) -> FieldValue;

/// A searchable field: name, kind, nullability, and accessor.
pub struct Field<T> {
    name: &'static str,
    kind: FieldKind,
    nullable: bool,
    variants: &'static [&'static str],
    accessor: Accessor<T>,
}

impl<T> Field<T> {
    /// Field name as registered.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the accessor may return [`FieldValue::Null`].
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Variant names for enum fields, in ordinal order.
    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Read the field from a record.
    pub fn read(&self, record: &T) -> FieldValue {
        (self.accessor)(record)
    }

    /// Variant name for an enum ordinal, if in range.
    pub fn variant_name(&self, ordinal: u32) -> Option<&'static str> {
        self.variants.get(ordinal as usize).copied()
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// Case-insensitive mapping from field name to [`Field`].
pub struct Schema<T> {
    entity: &'static str,
    fields: HashMap<String, Field<T>>,
}

impl<T> Schema<T> {
    /// Start an empty schema for the named entity.
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            fields: HashMap::new(),
        }
    }

    /// Register a non-nullable field.
    pub fn field(self, name: &'static str, kind: FieldKind, accessor: Accessor<T>) -> Self {
        self.insert(name, kind, false, &[], accessor)
    }

    /// Register a field whose accessor may return [`FieldValue::Null`].
    pub fn nullable(self, name: &'static str, kind: FieldKind, accessor: Accessor<T>) -> Self {
        self.insert(name, kind, true, &[], accessor)
    }

    /// Register a non-nullable enum field with its variant names.
    ///
    /// The accessor must return [`FieldValue::Enum`] holding the index of
    /// the variant in `variants`.
    pub fn enumeration(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        accessor: Accessor<T>,
    ) -> Self {
        self.insert(name, FieldKind::Enum, false, variants, accessor)
    }

    fn insert(
        mut self,
        name: &'static str,
        kind: FieldKind,
        nullable: bool,
        variants: &'static [&'static str],
        accessor: Accessor<T>,
    ) -> Self {
        self.fields.insert(
            name.to_lowercase(),
            Field {
                name,
                kind,
                nullable,
                variants,
                accessor,
            },
        );
        self
    }

    /// Name of the described entity.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Resolve a field by name, ignoring case.
    pub fn resolve(&self, name: &str) -> Option<&Field<T>> {
        self.fields.get(&name.trim().to_lowercase())
    }

    /// All registered fields, sorted by name.
    pub fn fields(&self) -> Vec<&Field<T>> {
        let mut fields: Vec<_> = self.fields.values().collect();
        fields.sort_by_key(|f| f.name);
        fields
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("entity", &self.entity)
            .field("fields", &self.fields())
            .finish()
    }
}

/// A record type with a statically known schema.
pub trait Searchable: Sized + 'static {
    /// The schema describing this type's searchable fields.
    fn schema() -> &'static Schema<Self>;
}
