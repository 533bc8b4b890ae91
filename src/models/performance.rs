//! Performance model. One row per employee by convention, created alongside
//! the employee with default values.

use serde::{Deserialize, Serialize};

/// Performance summary for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: i64,
    pub emp_id: String,
    /// Rating label, e.g. "3.5/5"
    pub rating: String,
    pub tasks_completed: i64,
    /// Integer percentage, 0-100
    pub attendance_percent: i64,
    pub last_review: String,
    pub created_at: String,
}
