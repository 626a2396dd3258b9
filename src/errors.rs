//! Centralized error handling.
//!
//! Provides a unified error type for the service layer. Every operation
//! returns exactly one outcome: a value or a single `AppError`. Mapping an
//! error onto a transport status is left to the caller, which can branch on
//! [`AppError::kind`] or [`AppError::code`].

use thiserror::Error;

/// Application error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("employee not found by id: {0}")]
    EmployeeNotFound(i32),

    #[error("day off record not found by id: {0}")]
    DayOffNotFound(i32),

    // Business rule conflicts
    #[error("employee email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("overlapping day off exists")]
    OverlappingDayOff,

    // Validation
    #[error("invalid day off type: {0}")]
    InvalidDayOffType(String),

    #[error("end time must not be before start time")]
    InvalidDateRange,

    #[error("reason is required")]
    ReasonRequired,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error taxonomy shared by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Employee or day-off record absent or already removed.
    NotFound,
    /// Duplicate email or overlapping interval.
    Conflict,
    /// Bad enum value, inverted date range, empty reason.
    InvalidInput,
    /// Store or cache failure unrelated to business rules.
    Upstream,
}

impl AppError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::EmployeeNotFound(_) | AppError::DayOffNotFound(_) => ErrorKind::NotFound,
            AppError::EmailAlreadyExists(_) | AppError::OverlappingDayOff => ErrorKind::Conflict,
            AppError::InvalidDayOffType(_) | AppError::InvalidDateRange | AppError::ReasonRequired => {
                ErrorKind::InvalidInput
            }
            AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => ErrorKind::Upstream,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            AppError::DayOffNotFound(_) => "DAY_OFF_NOT_FOUND",
            AppError::EmailAlreadyExists(_) => "EMAIL_ALREADY_EXISTS",
            AppError::OverlappingDayOff => "OVERLAPPING_DAY_OFF",
            AppError::InvalidDayOffType(_) => "INVALID_DAY_OFF_TYPE",
            AppError::InvalidDateRange => "INVALID_DATE_RANGE",
            AppError::ReasonRequired => "REASON_REQUIRED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures the caller caused or the business rules rejected.
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Upstream
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn cache(msg: impl Into<String>) -> Self {
        AppError::Cache(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
