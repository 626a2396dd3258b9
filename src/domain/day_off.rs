//! Day-off (leave) records.
//!
//! A record is either `Active` or `Cancelled`; cancellation is terminal and
//! releases the record's interval for future submissions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{
    DAY_OFF_TYPE_BEREAVEMENT, DAY_OFF_TYPE_PARENTAL_LEAVE, DAY_OFF_TYPE_PTO,
    DAY_OFF_TYPE_SICK_LEAVE,
};
use crate::errors::{AppError, AppResult};

/// Kinds of leave an employee may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOffType {
    #[serde(rename = "PTO")]
    Pto,
    #[serde(rename = "sick leave")]
    SickLeave,
    #[serde(rename = "parental leave")]
    ParentalLeave,
    #[serde(rename = "bereavement")]
    Bereavement,
}

impl DayOffType {
    pub const ALL: [DayOffType; 4] = [
        DayOffType::Pto,
        DayOffType::SickLeave,
        DayOffType::ParentalLeave,
        DayOffType::Bereavement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOffType::Pto => DAY_OFF_TYPE_PTO,
            DayOffType::SickLeave => DAY_OFF_TYPE_SICK_LEAVE,
            DayOffType::ParentalLeave => DAY_OFF_TYPE_PARENTAL_LEAVE,
            DayOffType::Bereavement => DAY_OFF_TYPE_BEREAVEMENT,
        }
    }

    /// Parse a day-off type, rejecting anything outside the enumerated set
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| AppError::InvalidDayOffType(value.to_string()))
    }
}

impl std::fmt::Display for DayOffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOffStatus {
    Active,
    Cancelled,
}

/// Unvalidated submission as received from the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOffRequest {
    #[serde(rename = "employeeID")]
    pub employee_id: i32,
    pub day_off_type: String,
    pub reason: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl DayOffRequest {
    /// Validate the request.
    ///
    /// Checks run in a fixed order: type, then date range, then reason.
    pub fn validate(self) -> AppResult<DayOffDraft> {
        let day_off_type = DayOffType::parse(&self.day_off_type)?;

        if self.start_time > self.end_time {
            return Err(AppError::InvalidDateRange);
        }

        if self.reason.trim().is_empty() {
            return Err(AppError::ReasonRequired);
        }

        Ok(DayOffDraft {
            employee_id: self.employee_id,
            day_off_type,
            reason: self.reason,
            start_time: self.start_time,
            end_time: self.end_time,
        })
    }
}

/// A validated submission, ready for the overlap check and insert
#[derive(Debug, Clone, PartialEq)]
pub struct DayOffDraft {
    pub employee_id: i32,
    pub day_off_type: DayOffType,
    pub reason: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Stored day-off record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOffRecord {
    pub id: i32,
    #[serde(rename = "employeeID")]
    pub employee_id: i32,
    pub day_off_type: DayOffType,
    pub reason: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl DayOffRecord {
    pub fn status(&self) -> DayOffStatus {
        if self.cancelled_at.is_some() {
            DayOffStatus::Cancelled
        } else {
            DayOffStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == DayOffStatus::Active
    }

    /// Cancel the record, appending the cancellation reason to the stored reason.
    ///
    /// The original reason text is not kept separately.
    pub fn cancel(&mut self, cancellation_reason: &str) {
        let now = Utc::now();
        self.reason = format!("{} (Cancelled: {})", self.reason, cancellation_reason);
        self.cancelled_at = Some(now);
        self.updated_at = now;
    }
}

/// Narrows a day-off listing.
///
/// `start_from` and `start_to` are inclusive calendar dates in UTC, applied
/// to the record's start time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOffScope {
    #[serde(default, rename = "employeeID")]
    pub employee_id: Option<i32>,
    #[serde(default, rename = "startTimeFrom")]
    pub start_from: Option<NaiveDate>,
    #[serde(default, rename = "startTimeTo")]
    pub start_to: Option<NaiveDate>,
}

impl DayOffScope {
    /// Records of a single employee
    pub fn employee(employee_id: i32) -> Self {
        Self {
            employee_id: Some(employee_id),
            ..Self::default()
        }
    }

    pub fn starting_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.start_from = from;
        self.start_to = to;
        self
    }

    /// Inclusive lower bound on start time
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.start_from.map(midnight)
    }

    /// Exclusive upper bound on start time: midnight after `start_to`
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.start_to.and_then(|to| to.succ_opt()).map(midnight)
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
