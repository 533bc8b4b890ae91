//! Employee-scoped endpoints: profile, tasks, attendance, payslips,
//! performance, task toggling, payslip download acknowledgement.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    Attendance, DownloadAck, Employee, Payslip, Performance, Task, ToggleTaskRequest,
};
use crate::AppState;

/// How many attendance rows the employee view loads.
const ATTENDANCE_WINDOW: i64 = 10;

/// GET /api/employees/:id - Load one employee's profile.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    match state.repo.get_employee(&id).await? {
        Some(emp) => success(emp),
        None => Err(AppError::NotFound(format!("Employee {} not found", id))),
    }
}

/// GET /api/employees/:id/tasks - Tasks assigned to this employee, due date ascending.
pub async fn list_employee_tasks(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Task>> {
    let tasks = state.repo.list_tasks_for(&id).await?;
    success(tasks)
}

/// GET /api/employees/:id/attendance - The most recent 10 attendance rows, newest first.
pub async fn list_employee_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Attendance>> {
    let records = state
        .repo
        .list_recent_attendance(&id, ATTENDANCE_WINDOW)
        .await?;
    success(records)
}

/// GET /api/employees/:id/payslips - This employee's payslips, newest first.
pub async fn list_employee_payslips(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Payslip>> {
    let payslips = state.repo.list_payslips_for(&id).await?;
    success(payslips)
}

/// GET /api/employees/:id/performance - This employee's performance row.
pub async fn get_employee_performance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Performance> {
    match state.repo.get_performance(&id).await? {
        Some(perf) => success(perf),
        None => Err(AppError::NotFound(format!(
            "No performance record for employee {}",
            id
        ))),
    }
}

/// POST /api/tasks/:id/toggle - Flip a task between pending and completed.
///
/// The body carries the status the caller currently knows; the opposite
/// value is written. Toggling twice restores the original status.
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ToggleTaskRequest>,
) -> ApiResult<Task> {
    let task = state.repo.toggle_task_status(id, request.status).await?;
    success(task)
}

/// POST /api/payslips/:id/download - Acknowledge a download request.
///
/// No file is generated; this is a side-effect-only acknowledgement.
pub async fn download_payslip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DownloadAck> {
    let payslip = state
        .repo
        .get_payslip(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payslip {} not found", id)))?;

    tracing::info!(payslip_id = id, emp_id = %payslip.emp_id, "Payslip download requested");

    success(DownloadAck {
        payslip_id: payslip.id,
        month: payslip.month.clone(),
        message: format!("Downloading payslip for {}", payslip.month),
    })
}
