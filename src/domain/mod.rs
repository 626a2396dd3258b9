//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO external dependencies (except error types).

pub mod day_off;
pub mod employee;

pub use day_off::{DayOffDraft, DayOffRecord, DayOffRequest, DayOffScope, DayOffStatus, DayOffType};
pub use employee::{Department, Employee, EmployeeUpdate, NewEmployee};
