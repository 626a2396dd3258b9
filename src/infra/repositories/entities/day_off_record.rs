//! Day-off record database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Select};

use super::super::listing::{FilterMode, Listable};
use crate::domain::{DayOffRecord, DayOffType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "day_off_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub day_off_type: String,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Cancellation timestamp (NULL = active, set = cancelled)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Filter and sort allow-lists for day-off listings
impl Listable for Entity {
    fn filter_column(key: &str) -> Option<(Column, FilterMode)> {
        match key {
            "dayOffType" => Some((Column::DayOffType, FilterMode::Exact)),
            _ => None,
        }
    }

    fn sort_column(key: &str) -> Option<Column> {
        match key {
            "dayOffType" => Some(Column::DayOffType),
            "startTime" => Some(Column::StartTime),
            "endTime" => Some(Column::EndTime),
            _ => None,
        }
    }

    fn default_order(select: Select<Self>) -> Select<Self> {
        select.order_by_desc(Column::StartTime)
    }

    fn tie_breaker() -> Column {
        Column::Id
    }
}

/// Convert database model to domain entity
impl TryFrom<Model> for DayOffRecord {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let day_off_type = DayOffType::parse(&model.day_off_type).map_err(|_| {
            AppError::internal(format!(
                "day off record {} has unrecognized type {:?}",
                model.id, model.day_off_type
            ))
        })?;

        Ok(DayOffRecord {
            id: model.id,
            employee_id: model.employee_id,
            day_off_type,
            reason: model.reason,
            start_time: model.start_time,
            end_time: model.end_time,
            created_at: model.created_at,
            updated_at: model.updated_at,
            cancelled_at: model.deleted_at,
        })
    }
}
