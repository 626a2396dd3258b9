//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod day_off_record;
pub mod employee;

// Re-exports for public API convenience
pub use day_off_record::{Entity as DayOffRecordEntity, Model as DayOffRecordModel};
pub use employee::{Entity as EmployeeEntity, Model as EmployeeModel};
