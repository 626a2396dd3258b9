//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod day_off_repository;
mod employee_repository;
pub mod entities;
pub mod listing;

pub use day_off_repository::{DayOffRepository, DayOffStore};
pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use listing::{paginate, FilterMode, Listable};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use day_off_repository::MockDayOffRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
