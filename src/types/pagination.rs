//! Pagination types for list operations.
//!
//! `ListParams` is the raw request as a caller sends it. It is normalised
//! against a [`PagePolicy`] into a [`PageQuery`] before it reaches the store,
//! so the listing engine only ever sees a page >= 1 and a bounded page size.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{
    Config, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_QUERY_OFFSET, SORT_ORDER_DESC,
};

/// List query parameters (DRY - reusable across all list operations)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    /// Field -> value filters; keys outside an entity's allow-list are ignored
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Apply page defaults and the page size cap.
    pub fn normalize(self, policy: &PagePolicy) -> PageQuery {
        let page = match self.page {
            Some(page) if page >= 1 => page as u64,
            _ => DEFAULT_PAGE_NUMBER,
        };
        let page_size = match self.page_size {
            Some(size) if size >= 1 => (size as u64).min(policy.max_page_size),
            _ => policy.default_page_size,
        };
        let sort = self
            .sort_by
            .filter(|field| !field.is_empty())
            .map(|field| SortSpec {
                field,
                order: SortOrder::from_param(self.sort_order.as_deref()),
            });

        PageQuery {
            page,
            page_size,
            sort,
            filters: self.filters,
        }
    }
}

/// Page size defaults and cap applied while normalising list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl PagePolicy {
    /// Build from config; the default page size never exceeds the cap.
    pub fn from_config(config: &Config) -> Self {
        let max_page_size = config.max_page_size.max(1);
        Self {
            default_page_size: config.default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Ascending unless the parameter is exactly `"desc"`.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(SORT_ORDER_DESC) => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Requested sort field and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Normalised list request handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u64,
    pub page_size: u64,
    pub sort: Option<SortSpec>,
    pub filters: BTreeMap<String, String>,
}

impl PageQuery {
    /// Calculate offset for database query.
    ///
    /// Capped at `MAX_QUERY_OFFSET`, the largest offset drivers accept as a
    /// signed 64-bit bind value. A capped offset is still past every row.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(MAX_QUERY_OFFSET)
    }

    /// Rows to fetch
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        ListParams::default().normalize(&PagePolicy::default())
    }
}

/// One page of results plus the pre-pagination match count
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> PaginatedResult<T> {
    /// Create a page, echoing the normalised page and page size
    pub fn new(data: Vec<T>, total_count: u64, query: &PageQuery) -> Self {
        Self {
            data,
            total_count,
            page: query.page,
            page_size: query.page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size > 0 {
            self.total_count.div_ceil(self.page_size)
        } else {
            0
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
