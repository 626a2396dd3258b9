//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Select;

use super::super::listing::{FilterMode, Listable};
use crate::domain::{Department, Employee};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub address: String,
    pub salary: i64,
    pub onboard_date: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::day_off_record::Entity")]
    DayOffRecords,
}

impl Related<super::day_off_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayOffRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Filter and sort allow-lists for employee listings
impl Listable for Entity {
    fn filter_column(key: &str) -> Option<(Column, FilterMode)> {
        match key {
            "name" => Some((Column::Name, FilterMode::Contains)),
            "email" => Some((Column::Email, FilterMode::Contains)),
            "department" => Some((Column::Department, FilterMode::Exact)),
            _ => None,
        }
    }

    fn sort_column(key: &str) -> Option<Column> {
        match key {
            "name" => Some(Column::Name),
            "email" => Some(Column::Email),
            "department" => Some(Column::Department),
            "onboardDate" => Some(Column::OnboardDate),
            _ => None,
        }
    }

    // Natural store order; the id tie-breaker keeps it deterministic
    fn default_order(select: Select<Self>) -> Select<Self> {
        select
    }

    fn tie_breaker() -> Column {
        Column::Id
    }
}

/// Convert database model to domain entity
impl TryFrom<Model> for Employee {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let department = Department::parse(&model.department).ok_or_else(|| {
            AppError::internal(format!(
                "employee {} has unrecognized department {:?}",
                model.id, model.department
            ))
        })?;
        let salary = u32::try_from(model.salary).map_err(|_| {
            AppError::internal(format!(
                "employee {} has out-of-range salary {}",
                model.id, model.salary
            ))
        })?;

        Ok(Employee {
            id: model.id,
            name: model.name,
            email: model.email,
            phone_number: model.phone_number,
            department,
            address: model.address,
            salary,
            onboard_date: model.onboard_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        })
    }
}
