//! Manager endpoints: directory CRUD, task assignment and deletion, payroll
//! batch generation, performance listing, present-today count.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    AssignTaskRequest, CreateEmployeeRequest, Employee, PayrollSummary, Payslip, Performance,
    PresentToday, Task, UpdateEmployeeRequest,
};
use crate::AppState;

/// GET /api/employees - The full directory, ordered by id ascending.
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let employees = state.repo.list_employees().await?;
    success(employees)
}

/// POST /api/employees - Add an employee (with its companion performance row).
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> ApiResult<Employee> {
    // Required fields; department and base salary have defaults
    if request.id.trim().is_empty()
        || request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.phone.trim().is_empty()
        || request.position.trim().is_empty()
        || request.join_date.trim().is_empty()
    {
        return Err(AppError::Validation("Please fill all fields".to_string()));
    }

    let employee = state.repo.create_employee(&request).await?;
    success(employee)
}

/// PUT /api/employees/:id - Overwrite an employee's mutable fields.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> ApiResult<Employee> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.phone.trim().is_empty()
        || request.position.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Please fill all required fields".to_string(),
        ));
    }

    let employee = state.repo.update_employee(&id, &request).await?;
    success(employee)
}

/// DELETE /api/employees/:id - Remove an employee from the directory.
///
/// Dependent rows are not cascaded; they remain orphaned.
pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_employee(&id).await?;
    success(())
}

/// GET /api/tasks - All tasks, due date ascending.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Vec<Task>> {
    let tasks = state.repo.list_tasks().await?;
    success(tasks)
}

/// POST /api/tasks - Assign a new pending task.
pub async fn assign_task(
    State(state): State<AppState>,
    Json(request): Json<AssignTaskRequest>,
) -> ApiResult<Task> {
    if request.assigned_to.trim().is_empty()
        || request.title.trim().is_empty()
        || request.due_date.trim().is_empty()
    {
        return Err(AppError::Validation("Please fill all fields".to_string()));
    }

    let task = state.repo.create_task(&request).await?;
    success(task)
}

/// DELETE /api/tasks/:id - Remove a task.
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_task(id).await?;
    success(())
}

/// GET /api/payslips - All payslips, newest first.
pub async fn list_payslips(State(state): State<AppState>) -> ApiResult<Vec<Payslip>> {
    let payslips = state.repo.list_payslips().await?;
    success(payslips)
}

/// POST /api/payroll - Generate one payslip per employee for the current month.
///
/// Inserts run one at a time in directory order; a mid-batch store failure
/// aborts with the store's error, leaving the earlier payslips in place.
pub async fn process_payroll(State(state): State<AppState>) -> ApiResult<PayrollSummary> {
    let month = Utc::now().format("%B %Y").to_string();
    let summary = state.repo.process_payroll(&month).await?;

    tracing::info!(month = %summary.month, processed = summary.processed, "Payroll processed");
    success(summary)
}

/// GET /api/performance - All performance rows.
pub async fn list_performance(State(state): State<AppState>) -> ApiResult<Vec<Performance>> {
    let rows = state.repo.list_performance().await?;
    success(rows)
}

/// GET /api/attendance/today - Count of employees marked present today.
pub async fn present_today(State(state): State<AppState>) -> ApiResult<PresentToday> {
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let present = state.repo.count_present_on(&date).await?;
    success(PresentToday { date, present })
}
