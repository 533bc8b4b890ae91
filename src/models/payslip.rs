//! Payslip model. Rows are batch-created by the payroll run and never
//! edited or deleted.

use serde::{Deserialize, Serialize};

/// One payslip. Satisfies `net_pay = salary + bonus - deductions` at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub id: i64,
    pub emp_id: String,
    /// Month label, e.g. "January 2025"
    pub month: String,
    pub salary: i64,
    pub bonus: i64,
    pub deductions: i64,
    pub net_pay: i64,
    pub status: String,
    pub created_at: String,
}

/// Outcome of one payroll run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub month: String,
    /// Number of payslips inserted
    pub processed: usize,
}

/// Acknowledgement for a payslip download request. No file is generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAck {
    pub payslip_id: i64,
    pub month: String,
    pub message: String,
}
