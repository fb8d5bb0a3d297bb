//! Deferred queries and the data source seam.
//!
//! A [`Query`] bundles a compiled filter and an optional ordering. Data
//! sources apply it however they like (in memory here; a store-backed source
//! would translate it) and answer `count` and `fetch` requests.

use std::fmt;

use async_trait::async_trait;
use docgate_core::error::AppError;
use docgate_core::result::AppResult;
use docgate_core::types::SortSpec;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::compiler::{Predicate, compile};
use crate::error::QueryError;
use crate::parser::parse;
use crate::schema::Schema;
use crate::sort::SortKey;

/// Filter and ordering to apply to a data source.
pub struct Query<T> {
    filter: Option<Predicate<T>>,
    order: Option<SortKey<T>>,
}

impl<T> Query<T> {
    /// A query that matches every record in source order.
    pub fn new() -> Self {
        Self {
            filter: None,
            order: None,
        }
    }

    /// Parse and compile `filter`, resolve `sort`, against `schema`.
    ///
    /// A blank or absent filter matches everything. An unknown sort field is
    /// ignored; an invalid filter is an error.
    pub fn build(schema: &Schema<T>, filter: Option<&str>, sort: &SortSpec) -> Result<Self, QueryError> {
        let criteria = filter.map(parse).unwrap_or_default();
        let predicate = if criteria.is_empty() {
            None
        } else {
            Some(compile(schema, &criteria)?)
        };

        Ok(Self {
            filter: predicate,
            order: SortKey::resolve(schema, sort),
        })
    }

    /// The compiled filter, if any.
    pub fn filter(&self) -> Option<&Predicate<T>> {
        self.filter.as_ref()
    }

    /// The resolved ordering, if any.
    pub fn order(&self) -> Option<&SortKey<T>> {
        self.order.as_ref()
    }

    /// Whether a record passes the filter.
    pub fn matches(&self, record: &T) -> bool {
        self.filter.as_ref().is_none_or(|p| p.matches(record))
    }

    /// Filter then stably sort records, keeping references into the input.
    pub fn evaluate<'a, I>(&self, records: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut selected: Vec<&T> = records.into_iter().filter(|r| self.matches(r)).collect();
        if let Some(order) = &self.order {
            order.apply(&mut selected);
        }
        selected
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            order: self.order.clone(),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filter", &self.filter)
            .field("order", &self.order)
            .finish()
    }
}

/// A contiguous slice of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Records to skip.
    pub skip: u64,
    /// Maximum records to return.
    pub take: u64,
}

impl Window {
    /// Create a window.
    pub fn new(skip: u64, take: u64) -> Self {
        Self { skip, take }
    }

    /// Restrict an iterator to this window.
    pub fn over<I: Iterator>(self, iter: I) -> std::iter::Take<std::iter::Skip<I>> {
        iter.skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.take).unwrap_or(usize::MAX))
    }
}

/// A source of records that can count and fetch by [`Query`].
#[async_trait]
pub trait DataSource<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Number of records matching the query's filter.
    async fn count(&self, query: &Query<T>, cancel: &CancellationToken) -> AppResult<u64>;

    /// Records matching the filter, in query order, limited to `window`.
    async fn fetch(
        &self,
        query: &Query<T>,
        window: Option<Window>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<T>>;
}

/// In-memory data source over a vector of records.
///
/// An optional visibility scope hides records from every read and update
/// while keeping them stored, e.g. soft-deleted rows.
pub struct MemorySource<T> {
    records: RwLock<Vec<T>>,
    visible: fn(&T) -> bool,
}

impl<T: fmt::Debug> fmt::Debug for MemorySource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySource")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

fn always_visible<T>(_: &T) -> bool {
    true
}

impl<T> Default for MemorySource<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            visible: always_visible,
        }
    }
}

impl<T> MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a source holding `records` in insertion order.
    pub fn new(records: Vec<T>) -> Self {
        Self::scoped(records, always_visible)
    }

    /// Create a source that only exposes records passing `visible`.
    pub fn scoped(records: Vec<T>, visible: fn(&T) -> bool) -> Self {
        Self {
            records: RwLock::new(records),
            visible,
        }
    }

    /// Append `record` unless a stored record, visible or not, satisfies
    /// `clashes`. Returns whether it was appended.
    pub async fn insert_unless(&self, clashes: impl Fn(&T) -> bool, record: T) -> bool {
        let mut records = self.records.write().await;
        if records.iter().any(clashes) {
            return false;
        }
        records.push(record);
        true
    }

    /// Replace the first visible record matching `pred`. Returns whether one
    /// was found.
    pub async fn update_first(&self, pred: impl Fn(&T) -> bool, record: T) -> bool {
        let visible = self.visible;
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| visible(r) && pred(r)) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Clone of the first visible record matching `pred`.
    pub async fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let visible = self.visible;
        self.records
            .read()
            .await
            .iter()
            .find(|r| visible(r) && pred(r))
            .cloned()
    }
}

fn ensure_active(cancel: &CancellationToken) -> AppResult<()> {
    if cancel.is_cancelled() {
        return Err(AppError::cancelled("Query cancelled"));
    }
    Ok(())
}

#[async_trait]
impl<T> DataSource<T> for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn count(&self, query: &Query<T>, cancel: &CancellationToken) -> AppResult<u64> {
        ensure_active(cancel)?;
        let visible = self.visible;
        let records = self.records.read().await;
        let total = records.iter().filter(|r| visible(r) && query.matches(r)).count();
        Ok(total as u64)
    }

    async fn fetch(
        &self,
        query: &Query<T>,
        window: Option<Window>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<T>> {
        ensure_active(cancel)?;
        let visible = self.visible;
        let records = self.records.read().await;
        let selected = query.evaluate(records.iter().filter(|r| visible(r)));

        let items = match window {
            Some(window) => window.over(selected.into_iter()).cloned().collect(),
            None => selected.into_iter().cloned().collect(),
        };
        Ok(items)
    }
}
