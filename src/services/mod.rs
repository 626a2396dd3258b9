//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod container;
mod day_off_service;
mod employee_service;

// Service Container
pub use container::{Liveness, ServiceContainer, Services};

// Service traits and implementations
pub use day_off_service::{DayOffManager, DayOffService};
pub use employee_service::{EmployeeManager, EmployeeService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use day_off_service::MockDayOffService;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_service::MockEmployeeService;
