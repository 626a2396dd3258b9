//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, transactions and repositories
//! - Caching systems (Redis or in-process)

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{Cache, MemoryCache, RedisCache};
pub use db::Database;
pub use repositories::{DayOffRepository, DayOffStore, EmployeeRepository, EmployeeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCache;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockDayOffRepository, MockEmployeeRepository};
