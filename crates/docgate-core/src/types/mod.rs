//! Core type definitions shared by every searchable entity.

pub mod filter;
pub mod pagination;
pub mod sorting;

pub use filter::{FilterCriterion, FilterOperator, FilterValue, LogicalOperator};
pub use pagination::{PageRequest, PageResult};
pub use sorting::{SortDirection, SortSpec};
