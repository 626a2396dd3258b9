//! Day-off service - Submission, listing and cancellation of leave.

use async_trait::async_trait;
use std::sync::Arc;

use super::EmployeeService;
use crate::domain::{DayOffRecord, DayOffRequest, DayOffScope};
use crate::errors::{AppError, AppResult};
use crate::infra::DayOffRepository;
use crate::types::{ListParams, PagePolicy, PaginatedResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Day-off service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DayOffService: Send + Sync {
    /// Validate and store a new record for an existing employee
    async fn submit_day_off(&self, request: DayOffRequest) -> AppResult<DayOffRecord>;

    /// List active records within the scope
    async fn list_day_offs(
        &self,
        scope: DayOffScope,
        params: ListParams,
    ) -> AppResult<PaginatedResult<DayOffRecord>>;

    /// Cancel an active record, returning it in its cancelled state
    async fn cancel_day_off(&self, id: i32, reason: String) -> AppResult<DayOffRecord>;
}

/// Concrete implementation of DayOffService.
pub struct DayOffManager {
    repo: Arc<dyn DayOffRepository>,
    employees: Arc<dyn EmployeeService>,
    page_policy: PagePolicy,
}

impl DayOffManager {
    /// Create new day-off service instance
    pub fn new(
        repo: Arc<dyn DayOffRepository>,
        employees: Arc<dyn EmployeeService>,
        page_policy: PagePolicy,
    ) -> Self {
        Self {
            repo,
            employees,
            page_policy,
        }
    }
}

#[async_trait]
impl DayOffService for DayOffManager {
    async fn submit_day_off(&self, request: DayOffRequest) -> AppResult<DayOffRecord> {
        let employee_id = request.employee_id;
        if !self.employees.employee_exists(employee_id).await? {
            return Err(AppError::EmployeeNotFound(employee_id));
        }

        let draft = request.validate()?;

        if self
            .repo
            .exists_overlapping(employee_id, draft.start_time, draft.end_time)
            .await?
        {
            return Err(AppError::OverlappingDayOff);
        }

        // A concurrent submission can still win between the check above and here
        let record = self
            .repo
            .create_exclusive(&draft)
            .await?
            .ok_or(AppError::OverlappingDayOff)?;

        tracing::info!(
            day_off_id = record.id,
            employee_id,
            day_off_type = %record.day_off_type,
            "Day off submitted"
        );
        Ok(record)
    }

    async fn list_day_offs(
        &self,
        scope: DayOffScope,
        params: ListParams,
    ) -> AppResult<PaginatedResult<DayOffRecord>> {
        let query = params.normalize(&self.page_policy);
        let (records, total) = self.repo.list(&scope, &query).await?;
        Ok(PaginatedResult::new(records, total, &query))
    }

    async fn cancel_day_off(&self, id: i32, reason: String) -> AppResult<DayOffRecord> {
        let mut record = self
            .repo
            .find_active_by_id(id)
            .await?
            .ok_or(AppError::DayOffNotFound(id))?;

        record.cancel(&reason);
        self.repo.update(&record).await?;

        tracing::info!(day_off_id = id, employee_id = record.employee_id, "Day off cancelled");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayOffStatus, DayOffType};
    use crate::errors::ErrorKind;
    use crate::infra::repositories::MockDayOffRepository;
    use crate::services::MockEmployeeService;
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::eq;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn request(day_off_type: &str, reason: &str) -> DayOffRequest {
        DayOffRequest {
            employee_id: 1,
            day_off_type: day_off_type.to_string(),
            reason: reason.to_string(),
            start_time: at(6, 9),
            end_time: at(7, 18),
        }
    }

    fn stored_record(id: i32) -> DayOffRecord {
        DayOffRecord {
            id,
            employee_id: 1,
            day_off_type: DayOffType::Pto,
            reason: "vacation".to_string(),
            start_time: at(6, 9),
            end_time: at(7, 18),
            created_at: at(1, 9),
            updated_at: at(1, 9),
            cancelled_at: None,
        }
    }

    fn existing_employee() -> MockEmployeeService {
        let mut employees = MockEmployeeService::new();
        employees.expect_employee_exists().returning(|_| Ok(true));
        employees
    }

    fn manager(repo: MockDayOffRepository, employees: MockEmployeeService) -> DayOffManager {
        DayOffManager::new(Arc::new(repo), Arc::new(employees), PagePolicy::default())
    }

    #[tokio::test]
    async fn test_submit_day_off_success() {
        let mut repo = MockDayOffRepository::new();
        repo.expect_exists_overlapping()
            .with(eq(1), eq(at(6, 9)), eq(at(7, 18)))
            .returning(|_, _, _| Ok(false));
        repo.expect_create_exclusive()
            .times(1)
            .returning(|draft| {
                let mut record = stored_record(10);
                record.reason = draft.reason.clone();
                Ok(Some(record))
            });

        let service = manager(repo, existing_employee());
        let record = service.submit_day_off(request("PTO", "family trip")).await.unwrap();

        assert_eq!(record.id, 10);
        assert_eq!(record.reason, "family trip");
        assert_eq!(record.status(), DayOffStatus::Active);
    }

    #[tokio::test]
    async fn test_submit_for_missing_employee_writes_nothing() {
        let mut employees = MockEmployeeService::new();
        employees
            .expect_employee_exists()
            .with(eq(1))
            .returning(|_| Ok(false));

        let mut repo = MockDayOffRepository::new();
        repo.expect_exists_overlapping().never();
        repo.expect_create_exclusive().never();

        let service = manager(repo, employees);
        let result = service.submit_day_off(request("PTO", "trip")).await;

        assert!(matches!(result, Err(AppError::EmployeeNotFound(1))));
    }

    #[tokio::test]
    async fn test_employee_checked_before_validation() {
        let mut employees = MockEmployeeService::new();
        employees.expect_employee_exists().returning(|_| Ok(false));

        let service = manager(MockDayOffRepository::new(), employees);
        let result = service.submit_day_off(request("vacation", "")).await;

        assert!(matches!(result, Err(AppError::EmployeeNotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_input() {
        let cases = [
            request("vacation", "beach"),
            request("PTO", "   "),
            DayOffRequest {
                start_time: at(8, 9),
                end_time: at(7, 9),
                ..request("PTO", "trip")
            },
        ];

        for case in cases {
            let mut repo = MockDayOffRepository::new();
            repo.expect_exists_overlapping().never();
            repo.expect_create_exclusive().never();

            let service = manager(repo, existing_employee());
            let err = service.submit_day_off(case).await.unwrap_err();

            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_overlap() {
        let mut repo = MockDayOffRepository::new();
        repo.expect_exists_overlapping().returning(|_, _, _| Ok(true));
        repo.expect_create_exclusive().never();

        let service = manager(repo, existing_employee());
        let err = service.submit_day_off(request("PTO", "trip")).await.unwrap_err();

        assert!(matches!(err, AppError::OverlappingDayOff));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_submit_loses_race_to_concurrent_insert() {
        let mut repo = MockDayOffRepository::new();
        repo.expect_exists_overlapping().returning(|_, _, _| Ok(false));
        repo.expect_create_exclusive().returning(|_| Ok(None));

        let service = manager(repo, existing_employee());
        let result = service.submit_day_off(request("sick leave", "flu")).await;

        assert!(matches!(result, Err(AppError::OverlappingDayOff)));
    }

    #[tokio::test]
    async fn test_cancel_day_off_appends_reason() {
        let mut repo = MockDayOffRepository::new();
        repo.expect_find_active_by_id()
            .with(eq(3))
            .returning(|id| Ok(Some(stored_record(id))));
        repo.expect_update()
            .withf(|record| record.cancelled_at.is_some())
            .times(1)
            .returning(|_| Ok(()));

        let service = manager(repo, MockEmployeeService::new());
        let record = service
            .cancel_day_off(3, "plans changed".to_string())
            .await
            .unwrap();

        assert_eq!(record.reason, "vacation (Cancelled: plans changed)");
        assert_eq!(record.status(), DayOffStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_missing_or_cancelled_record() {
        let mut repo = MockDayOffRepository::new();
        repo.expect_find_active_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = manager(repo, MockEmployeeService::new());
        let result = service.cancel_day_off(3, "again".to_string()).await;

        assert!(matches!(result, Err(AppError::DayOffNotFound(3))));
    }

    #[tokio::test]
    async fn test_list_day_offs_passes_scope_and_page() {
        let mut repo = MockDayOffRepository::new();
        repo.expect_list()
            .withf(|scope, query| scope.employee_id == Some(1) && query.page == 2 && query.page_size == 10)
            .returning(|_, _| Ok((vec![stored_record(11)], 11)));

        let service = manager(repo, MockEmployeeService::new());
        let page = service
            .list_day_offs(DayOffScope::employee(1), ListParams::default().page(2).page_size(10))
            .await
            .unwrap();

        assert_eq!(page.total_count, 11);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.data[0].id, 11);
    }
}
