//! Employee domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{
    DEPARTMENT_DESIGN, DEPARTMENT_ENGINEERING, DEPARTMENT_FINANCIAL, DEPARTMENT_GENERAL_AFFAIRS,
    DEPARTMENT_SALES,
};

/// Departments an employee can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Design")]
    Design,
    #[serde(rename = "Engineering")]
    Engineering,
    #[serde(rename = "Financial")]
    Financial,
    #[serde(rename = "General affairs")]
    GeneralAffairs,
    #[serde(rename = "Sales")]
    Sales,
}

impl Department {
    /// All departments, in display order
    pub const ALL: [Department; 5] = [
        Department::Design,
        Department::Engineering,
        Department::Financial,
        Department::GeneralAffairs,
        Department::Sales,
    ];

    /// Stored and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Design => DEPARTMENT_DESIGN,
            Department::Engineering => DEPARTMENT_ENGINEERING,
            Department::Financial => DEPARTMENT_FINANCIAL,
            Department::GeneralAffairs => DEPARTMENT_GENERAL_AFFAIRS,
            Department::Sales => DEPARTMENT_SALES,
        }
    }

    /// Parse a stored department name (exact, case-sensitive match)
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub department: Department,
    pub address: String,
    pub salary: u32,
    pub onboard_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Check if employee is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Copy the mutable field set onto this record.
    ///
    /// Name and onboard date are not part of [`EmployeeUpdate`] and stay as stored.
    pub fn apply(&mut self, update: EmployeeUpdate) {
        self.email = update.email;
        self.phone_number = update.phone_number;
        self.address = update.address;
        self.department = update.department;
        self.salary = update.salary;
        self.updated_at = Utc::now();
    }
}

/// Employee creation data transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub department: Department,
    pub address: String,
    pub salary: u32,
    pub onboard_date: NaiveDate,
}

/// Fields an update may change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub department: Department,
    pub salary: u32,
}
