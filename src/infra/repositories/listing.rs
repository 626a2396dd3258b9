//! Generic filtered, sorted and paginated listing over SeaORM entities.
//!
//! Each listable entity declares which caller-facing keys it accepts for
//! filtering and sorting. Keys outside those allow-lists never reach SQL.

use std::collections::BTreeMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use crate::errors::AppResult;
use crate::types::{PageQuery, SortOrder, SortSpec};

/// How a filter value is matched against its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Column equals the value
    Exact,
    /// Column contains the value as a substring
    Contains,
}

/// Listing capabilities of an entity
pub trait Listable: EntityTrait {
    /// Column and match mode for a filter key, `None` when the key is not allowed
    fn filter_column(key: &str) -> Option<(Self::Column, FilterMode)>;

    /// Column for a sort key, `None` when the key is not allowed
    fn sort_column(key: &str) -> Option<Self::Column>;

    /// Ordering used when the caller gives no usable sort key
    fn default_order(select: Select<Self>) -> Select<Self>;

    /// Final ordering column making page boundaries deterministic
    fn tie_breaker() -> Self::Column;
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Run a listing: filters, total count, ordering, then the page window.
///
/// The count is taken after filtering and before offset/limit, so it is the
/// number of matches across all pages.
pub async fn paginate<E, C>(
    db: &C,
    select: Select<E>,
    query: &PageQuery,
) -> AppResult<(Vec<E::Model>, u64)>
where
    E: Listable,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let filtered = apply_filters(select, &query.filters);
    let total = filtered.clone().count(db).await?;

    let rows = apply_sort(filtered, query.sort.as_ref())
        .offset(query.offset())
        .limit(query.limit())
        .all(db)
        .await?;

    Ok((rows, total))
}

/// AND every allowed filter onto the query
pub fn apply_filters<E: Listable>(select: Select<E>, filters: &BTreeMap<String, String>) -> Select<E> {
    filters
        .iter()
        .fold(select, |select, (key, value)| match E::filter_column(key) {
            Some((column, FilterMode::Exact)) => select.filter(column.eq(value.as_str())),
            Some((column, FilterMode::Contains)) => select.filter(column.contains(value.as_str())),
            None => {
                tracing::debug!(filter = %key, "Ignoring filter key outside allow-list");
                select
            }
        })
}

/// Order by the requested column when allowed, else the entity default, then the tie-breaker
pub fn apply_sort<E: Listable>(select: Select<E>, sort: Option<&SortSpec>) -> Select<E> {
    let requested = sort.and_then(|spec| E::sort_column(&spec.field).map(|column| (column, spec.order)));

    let ordered = match requested {
        Some((column, order)) => select.order_by(column, order.into()),
        None => {
            if let Some(spec) = sort {
                tracing::debug!(sort_by = %spec.field, "Ignoring sort key outside allow-list");
            }
            E::default_order(select)
        }
    };

    ordered.order_by_asc(E::tie_breaker())
}
