//! Employee repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, Unchanged,
};

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use super::listing::paginate;
use crate::domain::{Employee, NewEmployee};
use crate::errors::{AppError, AppResult};
use crate::types::PageQuery;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
///
/// All queries exclude soft-deleted employees.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee, returning the generated id
    async fn create(&self, employee: &NewEmployee) -> AppResult<i32>;

    /// Find active employee by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// Find active employee by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Persist every column of an existing employee except the creation time
    async fn update(&self, employee: &Employee) -> AppResult<()>;

    /// Soft delete; `false` when no active employee had this id
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// One page of active employees plus the total match count
    async fn list(&self, query: &PageQuery) -> AppResult<(Vec<Employee>, u64)>;
}

/// Concrete implementation of EmployeeRepository with soft delete
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn create(&self, employee: &NewEmployee) -> AppResult<i32> {
        let now = Utc::now();
        let active_model = ActiveModel {
            name: Set(employee.name.clone()),
            email: Set(employee.email.clone()),
            phone_number: Set(employee.phone_number.clone()),
            department: Set(employee.department.as_str().to_string()),
            address: Set(employee.address.clone()),
            salary: Set(i64::from(employee.salary)),
            onboard_date: Set(employee.onboard_date),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = EmployeeEntity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.last_insert_id)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id)
            .filter(employee::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Employee::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::Email.eq(email))
            .filter(employee::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Employee::try_from).transpose()
    }

    async fn update(&self, employee: &Employee) -> AppResult<()> {
        let active = ActiveModel {
            id: Unchanged(employee.id),
            name: Set(employee.name.clone()),
            email: Set(employee.email.clone()),
            phone_number: Set(employee.phone_number.clone()),
            department: Set(employee.department.as_str().to_string()),
            address: Set(employee.address.clone()),
            salary: Set(i64::from(employee.salary)),
            onboard_date: Set(employee.onboard_date),
            updated_at: Set(employee.updated_at),
            deleted_at: Set(employee.deleted_at),
            ..Default::default()
        };

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        // Soft delete: set deleted_at timestamp
        let now = Utc::now();
        let result = EmployeeEntity::update_many()
            .col_expr(employee::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(employee::Column::UpdatedAt, Expr::value(now))
            .filter(employee::Column::Id.eq(id))
            .filter(employee::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, query: &PageQuery) -> AppResult<(Vec<Employee>, u64)> {
        let select = EmployeeEntity::find().filter(employee::Column::DeletedAt.is_null());
        let (models, total) = paginate(&self.db, select, query).await?;

        let employees = models
            .into_iter()
            .map(Employee::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((employees, total))
    }
}
