//! Shared types for DRY compliance.

mod pagination;

pub use pagination::{
    ListParams, PagePolicy, PageQuery, PaginatedResult, SortOrder, SortSpec,
};
