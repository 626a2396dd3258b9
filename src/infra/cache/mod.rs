//! Cache layer for employee point lookups.
//!
//! The cache is a derived, invalidatable view: the record store stays the
//! single source of truth and list queries never touch the cache.

mod memory;
mod redis_cache;

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::CACHE_PREFIX_EMPLOYEE;
use crate::errors::AppResult;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Key/value store with expiry.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value; `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> AppResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Cache key for an employee point lookup.
pub fn employee_key(id: i32) -> String {
    format!("{}{}", CACHE_PREFIX_EMPLOYEE, id)
}

/// Get a JSON-encoded value from cache.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> AppResult<Option<T>> {
    match cache.get(key).await? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Set a JSON-encoded value in cache.
pub async fn set_json<T: Serialize + Sync>(
    cache: &dyn Cache,
    key: &str,
    value: &T,
    ttl: Duration,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    cache.set(key, json, ttl).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_employee_key() {
        assert_eq!(employee_key(42), "employee:42");
    }

    #[tokio::test]
    async fn test_json_helpers_round_trip() {
        let cache = MemoryCache::new(8);
        set_json(&cache, "k", &vec![1, 2, 3], Duration::from_secs(60))
            .await
            .unwrap();

        let value: Option<Vec<i32>> = get_json(&cache, "k").await.unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_get_json_reports_corrupt_entries() {
        let mut cache = MockCache::new();
        cache
            .expect_get()
            .returning(|_| Ok(Some("{not json".to_string())));

        let result: AppResult<Option<Vec<i32>>> = get_json(&cache, "k").await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
