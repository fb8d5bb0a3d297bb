//! Search, sorting, and pagination configuration.

use serde::{Deserialize, Serialize};

use crate::types::sorting::SortDirection;

/// Defaults and limits applied to incoming search requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size used when a request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound applied to requested page sizes.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Sort field for structured searches that do not name one.
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,
    /// Sort direction for structured searches that do not name one.
    #[serde(default = "default_sort_direction")]
    pub default_sort_direction: SortDirection,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_sort_field: default_sort_field(),
            default_sort_direction: default_sort_direction(),
        }
    }
}

fn default_page_size() -> u64 {
    crate::types::pagination::DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u64 {
    crate::types::pagination::MAX_PAGE_SIZE
}

fn default_sort_field() -> String {
    "created".to_string()
}

fn default_sort_direction() -> SortDirection {
    SortDirection::Desc
}
