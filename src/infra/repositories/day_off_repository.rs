//! Day-off record repository.
//!
//! Cancellation is a soft delete: cancelled rows keep their data but are
//! invisible to lookups, listings and the overlap check.
//!
//! Records are only ever inserted through `create_exclusive`, so no write
//! path skips the overlap check.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, Select, Set, Unchanged,
};

use super::entities::day_off_record::{self, ActiveModel, Entity as DayOffRecordEntity};
use super::listing::paginate;
use crate::config::{MAX_SERIALIZATION_RETRIES, SERIALIZATION_RETRY_BACKOFF_MS};
use crate::domain::{DayOffDraft, DayOffRecord, DayOffScope};
use crate::errors::{AppError, AppResult};
use crate::infra::db::{is_serialization_failure, with_transaction};
use crate::types::PageQuery;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Day-off repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DayOffRepository: Send + Sync {
    /// Insert the draft unless it overlaps an active record of the same employee.
    ///
    /// The check and the insert share one serializable transaction. A
    /// transaction aborted by a concurrent writer is retried, so the loser of
    /// a race sees the winner's row. Returns `None` when an overlapping
    /// record exists.
    async fn create_exclusive(&self, draft: &DayOffDraft) -> AppResult<Option<DayOffRecord>>;

    /// Find a record that has not been cancelled
    async fn find_active_by_id(&self, id: i32) -> AppResult<Option<DayOffRecord>>;

    /// Persist reason, interval and cancellation state of an existing record
    async fn update(&self, record: &DayOffRecord) -> AppResult<()>;

    /// Whether any active record of the employee intersects `[start, end]`.
    ///
    /// Intervals are closed, so touching endpoints count as overlap.
    async fn exists_overlapping(
        &self,
        employee_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// One page of active records within the scope plus the total match count
    async fn list(&self, scope: &DayOffScope, query: &PageQuery) -> AppResult<(Vec<DayOffRecord>, u64)>;
}

/// Concrete implementation of DayOffRepository
pub struct DayOffStore {
    db: DatabaseConnection,
}

impl DayOffStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Active records of `employee_id` whose interval intersects `[start, end]`
fn overlapping(employee_id: i32, start: DateTime<Utc>, end: DateTime<Utc>) -> Select<DayOffRecordEntity> {
    DayOffRecordEntity::find()
        .filter(day_off_record::Column::EmployeeId.eq(employee_id))
        .filter(day_off_record::Column::DeletedAt.is_null())
        .filter(day_off_record::Column::StartTime.lte(end))
        .filter(day_off_record::Column::EndTime.gte(start))
}

fn new_record(draft: &DayOffDraft) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        employee_id: Set(draft.employee_id),
        day_off_type: Set(draft.day_off_type.as_str().to_string()),
        reason: Set(draft.reason.clone()),
        start_time: Set(draft.start_time),
        end_time: Set(draft.end_time),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
}

async fn insert_unless_overlapping(
    txn: &DatabaseTransaction,
    draft: DayOffDraft,
) -> AppResult<Option<DayOffRecord>> {
    let conflicts = overlapping(draft.employee_id, draft.start_time, draft.end_time)
        .count(txn)
        .await?;
    if conflicts > 0 {
        return Ok(None);
    }

    let model = new_record(&draft).insert(txn).await?;
    DayOffRecord::try_from(model).map(Some)
}

#[async_trait]
impl DayOffRepository for DayOffStore {
    async fn create_exclusive(&self, draft: &DayOffDraft) -> AppResult<Option<DayOffRecord>> {
        let backend = self.db.get_database_backend();
        let mut retries = 0;

        loop {
            let attempt = draft.clone();
            let outcome = with_transaction(&self.db, IsolationLevel::Serializable, move |txn| {
                Box::pin(insert_unless_overlapping(txn, attempt))
            })
            .await;

            match outcome {
                Err(AppError::Database(ref e))
                    if retries < MAX_SERIALIZATION_RETRIES && is_serialization_failure(backend, e) =>
                {
                    retries += 1;
                    tracing::warn!(
                        employee_id = draft.employee_id,
                        retries,
                        "Day off insert aborted by a concurrent writer, retrying: {}",
                        e
                    );
                    tokio::time::sleep(Duration::from_millis(
                        SERIALIZATION_RETRY_BACKOFF_MS * u64::from(retries),
                    ))
                    .await;
                }
                other => return other,
            }
        }
    }

    async fn find_active_by_id(&self, id: i32) -> AppResult<Option<DayOffRecord>> {
        let result = DayOffRecordEntity::find_by_id(id)
            .filter(day_off_record::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(DayOffRecord::try_from).transpose()
    }

    async fn update(&self, record: &DayOffRecord) -> AppResult<()> {
        let active = ActiveModel {
            id: Unchanged(record.id),
            day_off_type: Set(record.day_off_type.as_str().to_string()),
            reason: Set(record.reason.clone()),
            start_time: Set(record.start_time),
            end_time: Set(record.end_time),
            updated_at: Set(record.updated_at),
            deleted_at: Set(record.cancelled_at),
            ..Default::default()
        };

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn exists_overlapping(
        &self,
        employee_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<bool> {
        let count = overlapping(employee_id, start, end)
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, scope: &DayOffScope, query: &PageQuery) -> AppResult<(Vec<DayOffRecord>, u64)> {
        let mut select = DayOffRecordEntity::find().filter(day_off_record::Column::DeletedAt.is_null());

        if let Some(employee_id) = scope.employee_id {
            select = select.filter(day_off_record::Column::EmployeeId.eq(employee_id));
        }
        if let Some(from) = scope.lower_bound() {
            select = select.filter(day_off_record::Column::StartTime.gte(from));
        }
        if let Some(until) = scope.upper_bound() {
            select = select.filter(day_off_record::Column::StartTime.lt(until));
        }

        let (models, total) = paginate(&self.db, select, query).await?;
        let records = models
            .into_iter()
            .map(DayOffRecord::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((records, total))
    }
}
