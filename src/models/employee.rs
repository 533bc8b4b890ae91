//! Employee model and directory request bodies.

use serde::{Deserialize, Serialize};

/// One row of the employee directory. Ids are externally assigned
/// (uppercase convention, e.g. "EMP001").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    /// Display name of the managing manager
    pub manager: String,
    pub base_salary: i64,
    pub join_date: String,
    pub status: String,
    pub leave_balance: i64,
    pub created_at: String,
}

/// Request body for adding an employee to the directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_department")]
    pub department: String,
    pub position: String,
    #[serde(default)]
    pub base_salary: i64,
    pub join_date: String,
}

fn default_department() -> String {
    "IT".to_string()
}

/// Request body for editing an employee.
///
/// The id is immutable and comes from the path; every mutable field is
/// overwritten unconditionally (last-write-wins, no version check).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_department")]
    pub department: String,
    pub position: String,
    #[serde(default)]
    pub base_salary: i64,
    pub join_date: String,
    #[serde(default = "default_leave_balance")]
    pub leave_balance: i64,
}

fn default_leave_balance() -> i64 {
    8
}
