//! Employee service - Handles employee records and the point-lookup cache.
//!
//! Reads go cache-first; writes go to the store and then drop the cached
//! entry. Cache failures never fail an operation, they are logged and the
//! store answer is used.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Employee, EmployeeUpdate, NewEmployee};
use crate::errors::{AppError, AppResult};
use crate::infra::cache::{employee_key, get_json, set_json};
use crate::infra::{Cache, EmployeeRepository};
use crate::types::{ListParams, PagePolicy, PaginatedResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee service trait for dependency injection.
///
/// Operations only see active (not soft-deleted) employees.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Create an employee; the email must not belong to another active employee
    async fn create_employee(&self, employee: NewEmployee) -> AppResult<Employee>;

    /// Get an employee, served from cache when present
    async fn get_employee(&self, id: i32) -> AppResult<Employee>;

    /// Change the mutable fields of an employee
    async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> AppResult<Employee>;

    /// Soft delete an employee
    async fn delete_employee(&self, id: i32) -> AppResult<()>;

    /// List employees, never cached
    async fn list_employees(&self, params: ListParams) -> AppResult<PaginatedResult<Employee>>;

    /// Whether an active employee exists, checked against the store
    async fn employee_exists(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of EmployeeService.
pub struct EmployeeManager {
    repo: Arc<dyn EmployeeRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
    page_policy: PagePolicy,
}

impl EmployeeManager {
    /// Create new employee service instance
    pub fn new(
        repo: Arc<dyn EmployeeRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
        page_policy: PagePolicy,
    ) -> Self {
        Self {
            repo,
            cache,
            cache_ttl,
            page_policy,
        }
    }

    async fn cached(&self, id: i32) -> Option<Employee> {
        let key = employee_key(id);
        match get_json::<Employee>(self.cache.as_ref(), &key).await {
            Ok(Some(employee)) => {
                tracing::debug!(employee_id = id, "Employee cache hit");
                Some(employee)
            }
            Ok(None) => {
                tracing::debug!(employee_id = id, "Employee cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(employee_id = id, error = %e, "Employee cache read failed");
                None
            }
        }
    }

    async fn populate(&self, employee: &Employee) {
        let key = employee_key(employee.id);
        if let Err(e) = set_json(self.cache.as_ref(), &key, employee, self.cache_ttl).await {
            tracing::warn!(employee_id = employee.id, error = %e, "Employee cache populate failed");
        }
    }

    async fn invalidate(&self, id: i32) {
        if let Err(e) = self.cache.delete(&employee_key(id)).await {
            tracing::warn!(employee_id = id, error = %e, "Employee cache invalidation failed");
        }
    }

    async fn ensure_email_available(&self, email: &str) -> AppResult<()> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists(email.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn create_employee(&self, employee: NewEmployee) -> AppResult<Employee> {
        self.ensure_email_available(&employee.email).await?;

        let id = self.repo.create(&employee).await?;
        tracing::info!(employee_id = id, "Employee created");

        // Re-read so generated columns come from the store
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound(id))
    }

    async fn get_employee(&self, id: i32) -> AppResult<Employee> {
        if let Some(employee) = self.cached(id).await {
            return Ok(employee);
        }

        let employee = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound(id))?;

        self.populate(&employee).await;
        Ok(employee)
    }

    async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> AppResult<Employee> {
        let mut employee = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound(id))?;

        if update.email != employee.email {
            self.ensure_email_available(&update.email).await?;
        }

        employee.apply(update);
        self.repo.update(&employee).await?;
        self.invalidate(id).await;
        tracing::info!(employee_id = id, "Employee updated");

        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound(id))
    }

    async fn delete_employee(&self, id: i32) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::EmployeeNotFound(id));
        }

        self.invalidate(id).await;
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    async fn list_employees(&self, params: ListParams) -> AppResult<PaginatedResult<Employee>> {
        let query = params.normalize(&self.page_policy);
        let (employees, total) = self.repo.list(&query).await?;
        Ok(PaginatedResult::new(employees, total, &query))
    }

    async fn employee_exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.repo.find_by_id(id).await?.is_some())
    }
}
