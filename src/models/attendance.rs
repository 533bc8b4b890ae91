//! Attendance model. Rows are externally populated; the application only
//! reads them.

use serde::{Deserialize, Serialize};

/// One attendance record for one employee and day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub emp_id: String,
    pub date: String,
    /// "present" or any other marker; only "present" counts toward totals
    pub status: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub created_at: String,
}

/// Count of employees marked present on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentToday {
    pub date: String,
    pub present: i64,
}
