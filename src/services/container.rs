//! Service Container - Centralized service access.
//!
//! Wires the stores, the employee cache and both services from one
//! [`Config`]. The container is built once at process start and shared
//! behind `Arc`s afterwards.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

use super::{DayOffManager, DayOffService, EmployeeManager, EmployeeService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Cache, Database, DayOffStore, EmployeeStore, MemoryCache, RedisCache};
use crate::types::PagePolicy;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get employee service
    fn employees(&self) -> Arc<dyn EmployeeService>;

    /// Get day-off service
    fn day_offs(&self) -> Arc<dyn DayOffService>;

    /// Process liveness report
    fn liveness(&self) -> Liveness;
}

/// Liveness report: the instant the process loaded its configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Liveness {
    /// RFC 3339 timestamp
    pub start_time: String,
}

impl Liveness {
    pub fn since(started_at: DateTime<Utc>) -> Self {
        Self {
            start_time: started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    employee_service: Arc<dyn EmployeeService>,
    day_off_service: Arc<dyn DayOffService>,
    started_at: DateTime<Utc>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        employee_service: Arc<dyn EmployeeService>,
        day_off_service: Arc<dyn DayOffService>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_service,
            day_off_service,
            started_at,
        }
    }

    /// Create service container from a database, a cache and config
    pub fn from_parts(db: &Database, cache: Arc<dyn Cache>, config: &Config) -> Self {
        let page_policy = PagePolicy::from_config(config);

        let employee_service: Arc<dyn EmployeeService> = Arc::new(EmployeeManager::new(
            Arc::new(EmployeeStore::new(db.get_connection())),
            cache,
            config.employee_cache_ttl,
            page_policy,
        ));
        let day_off_service = Arc::new(DayOffManager::new(
            Arc::new(DayOffStore::new(db.get_connection())),
            employee_service.clone(),
            page_policy,
        ));

        Self::new(employee_service, day_off_service, config.started_at)
    }

    /// Connect to the database and the configured cache, then wire services.
    ///
    /// Redis is used when a URL is configured, otherwise a bounded
    /// in-process cache.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let cache: Arc<dyn Cache> = match &config.redis_url {
            Some(url) => Arc::new(RedisCache::connect(url).await?),
            None => {
                tracing::info!(
                    capacity = config.memory_cache_capacity,
                    "No Redis URL configured, using in-process cache"
                );
                Arc::new(MemoryCache::new(config.memory_cache_capacity))
            }
        };

        Ok(Self::from_parts(&db, cache, config))
    }
}

impl ServiceContainer for Services {
    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    fn day_offs(&self) -> Arc<dyn DayOffService> {
        self.day_off_service.clone()
    }

    fn liveness(&self) -> Liveness {
        Liveness::since(self.started_at)
    }
}
