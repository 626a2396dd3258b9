//! Leave Scheduler - employee records and day-off scheduling.
//!
//! The crate is the service layer of an HR backend: employee CRUD with a
//! cache-aside point lookup, and day-off submission with overlap
//! protection. Transport, schema migrations and process setup belong to
//! the hosting application.
//!
//! # Architecture Layers
//!
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and validation
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache)
//! - **types**: Shared types (pagination)
//! - **errors**: Centralized error handling
//!
//! # Usage
//!
//! ```ignore
//! let config = Config::from_env();
//! let services = Services::connect(&config).await?;
//! let employee = services.employees().get_employee(1).await?;
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{DayOffRecord, DayOffRequest, DayOffScope, DayOffType, Department, Employee};
pub use errors::{AppError, AppResult, ErrorKind};
pub use infra::Cache;
pub use services::{DayOffService, EmployeeService, ServiceContainer, Services};
