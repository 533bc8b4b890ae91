//! Database repository for all record-store operations.
//!
//! Every successful mutation publishes one event to the change feed after
//! the store acknowledges the write.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::changes::{ChangeFeed, ChangeOp, Table};
use crate::errors::AppError;
use crate::models::{
    AssignTaskRequest, Attendance, CreateEmployeeRequest, Employee, PayrollSummary, Payslip,
    Performance, Task, TaskStatus, UpdateEmployeeRequest,
};

/// Display name stamped on manager-created rows.
pub const MANAGER_NAME: &str = "John Doe";

/// Defaults applied when an employee is created.
pub const DEFAULT_EMPLOYEE_STATUS: &str = "active";
pub const DEFAULT_LEAVE_BALANCE: i64 = 8;

/// Defaults for the companion performance row.
pub const DEFAULT_RATING: &str = "3.5/5";
pub const DEFAULT_ATTENDANCE_PERCENT: i64 = 100;

/// Payroll constants: flat bonus, 10% deduction (floored).
pub const PAYROLL_BONUS: i64 = 5000;
pub const PAYSLIP_STATUS_PROCESSED: &str = "processed";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: ChangeFeed::new(),
        }
    }

    /// The change-notification feed fed by this repository's mutations.
    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }

    // ==================== EMPLOYEE OPERATIONS ====================

    /// List the full directory, ordered by id ascending.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, department, position, manager, base_salary, join_date, status, leave_balance, created_at FROM employees ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(employee_from_row).collect())
    }

    /// Get an employee by id (exact match).
    pub async fn get_employee(&self, id: &str) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, department, position, manager, base_salary, join_date, status, leave_balance, created_at FROM employees WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(employee_from_row))
    }

    /// Look up an employee for login. Case normalization to uppercase happens
    /// here and nowhere else.
    pub async fn find_employee_for_login(
        &self,
        username: &str,
    ) -> Result<Option<Employee>, AppError> {
        self.get_employee(&username.to_uppercase()).await
    }

    /// Create an employee together with its companion performance row.
    ///
    /// The two inserts run in one transaction, so a rejected insert (e.g. a
    /// duplicate id) leaves no partial state.
    pub async fn create_employee(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<Employee, AppError> {
        let now = Utc::now().to_rfc3339();
        let today = Utc::now().format("%Y-%m-%d").to_string();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO employees (id, name, email, phone, department, position, manager, base_salary, join_date, status, leave_balance, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&request.id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.department)
        .bind(&request.position)
        .bind(MANAGER_NAME)
        .bind(request.base_salary)
        .bind(&request.join_date)
        .bind(DEFAULT_EMPLOYEE_STATUS)
        .bind(DEFAULT_LEAVE_BALANCE)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO performance (emp_id, rating, tasks_completed, attendance_percent, last_review, created_at) VALUES (?, ?, 0, ?, ?, ?)"
        )
        .bind(&request.id)
        .bind(DEFAULT_RATING)
        .bind(DEFAULT_ATTENDANCE_PERCENT)
        .bind(&today)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.changes
            .publish(Table::Employees, ChangeOp::Insert, Some(request.id.clone()));
        self.changes
            .publish(Table::Performance, ChangeOp::Insert, Some(request.id.clone()));

        Ok(Employee {
            id: request.id.clone(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            department: request.department.clone(),
            position: request.position.clone(),
            manager: MANAGER_NAME.to_string(),
            base_salary: request.base_salary,
            join_date: request.join_date.clone(),
            status: DEFAULT_EMPLOYEE_STATUS.to_string(),
            leave_balance: DEFAULT_LEAVE_BALANCE,
            created_at: now,
        })
    }

    /// Overwrite every mutable field of an employee. Last write wins; there
    /// is no version check.
    pub async fn update_employee(
        &self,
        id: &str,
        request: &UpdateEmployeeRequest,
    ) -> Result<Employee, AppError> {
        let result = sqlx::query(
            "UPDATE employees SET name = ?, email = ?, phone = ?, department = ?, position = ?, base_salary = ?, join_date = ?, leave_balance = ? WHERE id = ?"
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.department)
        .bind(&request.position)
        .bind(request.base_salary)
        .bind(&request.join_date)
        .bind(request.leave_balance)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        self.changes
            .publish(Table::Employees, ChangeOp::Update, Some(id.to_string()));

        let updated = self
            .get_employee(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;
        Ok(updated)
    }

    /// Delete an employee. Dependent task/payslip/performance/attendance rows
    /// are left in place (orphaned).
    pub async fn delete_employee(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        self.changes
            .publish(Table::Employees, ChangeOp::Delete, Some(id.to_string()));
        Ok(())
    }

    // ==================== TASK OPERATIONS ====================

    /// List all tasks, ordered by due date ascending.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let rows = sqlx::query(
            "SELECT id, assigned_to, assigned_by, title, due_date, status, created_at FROM tasks ORDER BY due_date"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(task_from_row).collect())
    }

    /// List one employee's tasks, ordered by due date ascending.
    pub async fn list_tasks_for(&self, emp_id: &str) -> Result<Vec<Task>, AppError> {
        let rows = sqlx::query(
            "SELECT id, assigned_to, assigned_by, title, due_date, status, created_at FROM tasks WHERE assigned_to = ? ORDER BY due_date"
        )
        .bind(emp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(task_from_row).collect())
    }

    /// Get a task by id.
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, AppError> {
        let row = sqlx::query(
            "SELECT id, assigned_to, assigned_by, title, due_date, status, created_at FROM tasks WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(task_from_row))
    }

    /// Create a pending task assigned by the fixed manager name.
    pub async fn create_task(&self, request: &AssignTaskRequest) -> Result<Task, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO tasks (assigned_to, assigned_by, title, due_date, status, created_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&request.assigned_to)
        .bind(MANAGER_NAME)
        .bind(&request.title)
        .bind(&request.due_date)
        .bind(TaskStatus::Pending.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.changes.publish(
            Table::Tasks,
            ChangeOp::Insert,
            Some(request.assigned_to.clone()),
        );

        Ok(Task {
            id: result.last_insert_rowid(),
            assigned_to: request.assigned_to.clone(),
            assigned_by: MANAGER_NAME.to_string(),
            title: request.title.clone(),
            due_date: request.due_date.clone(),
            status: TaskStatus::Pending,
            created_at: now,
        })
    }

    /// Write the opposite of the caller's currently-known status. The status
    /// is binary, so applying this twice restores the original value.
    pub async fn toggle_task_status(
        &self,
        id: i64,
        current: TaskStatus,
    ) -> Result<Task, AppError> {
        let next = current.toggled();

        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(next.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {} not found", id)));
        }

        let task = self
            .get_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

        self.changes.publish(
            Table::Tasks,
            ChangeOp::Update,
            Some(task.assigned_to.clone()),
        );

        Ok(task)
    }

    /// Delete a task.
    pub async fn delete_task(&self, id: i64) -> Result<(), AppError> {
        // Fetch first so the change event can carry the employee scope
        let task = self
            .get_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // The row can disappear between the fetch and the delete
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {} not found", id)));
        }

        self.changes
            .publish(Table::Tasks, ChangeOp::Delete, Some(task.assigned_to));
        Ok(())
    }

    // ==================== ATTENDANCE OPERATIONS ====================

    /// The most recent attendance rows for one employee, newest first.
    pub async fn list_recent_attendance(
        &self,
        emp_id: &str,
        limit: i64,
    ) -> Result<Vec<Attendance>, AppError> {
        let rows = sqlx::query(
            "SELECT id, emp_id, date, status, check_in, check_out, created_at FROM attendance WHERE emp_id = ? ORDER BY date DESC LIMIT ?"
        )
        .bind(emp_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(attendance_from_row).collect())
    }

    /// Count of employees marked present on the given date.
    pub async fn count_present_on(&self, date: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS present FROM attendance WHERE date = ? AND status = 'present'",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("present"))
    }

    // ==================== PAYSLIP OPERATIONS ====================

    /// List all payslips, newest first.
    pub async fn list_payslips(&self) -> Result<Vec<Payslip>, AppError> {
        let rows = sqlx::query(
            "SELECT id, emp_id, month, salary, bonus, deductions, net_pay, status, created_at FROM payslips ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(payslip_from_row).collect())
    }

    /// List one employee's payslips, newest first.
    pub async fn list_payslips_for(&self, emp_id: &str) -> Result<Vec<Payslip>, AppError> {
        let rows = sqlx::query(
            "SELECT id, emp_id, month, salary, bonus, deductions, net_pay, status, created_at FROM payslips WHERE emp_id = ? ORDER BY created_at DESC, id DESC"
        )
        .bind(emp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(payslip_from_row).collect())
    }

    /// Get a payslip by id.
    pub async fn get_payslip(&self, id: i64) -> Result<Option<Payslip>, AppError> {
        let row = sqlx::query(
            "SELECT id, emp_id, month, salary, bonus, deductions, net_pay, status, created_at FROM payslips WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(payslip_from_row))
    }

    /// Generate one payslip per employee for the given month label.
    ///
    /// Inserts run sequentially in directory order with no atomicity across
    /// the batch: a mid-batch failure aborts with the store's error and
    /// leaves the earlier payslips in place.
    pub async fn process_payroll(&self, month: &str) -> Result<PayrollSummary, AppError> {
        let employees = self.list_employees().await?;
        let mut processed = 0usize;

        for emp in &employees {
            let bonus = PAYROLL_BONUS;
            // 10% of base salary, floored
            let deductions = emp.base_salary / 10;
            let net_pay = emp.base_salary + bonus - deductions;
            let now = Utc::now().to_rfc3339();

            sqlx::query(
                "INSERT INTO payslips (emp_id, month, salary, bonus, deductions, net_pay, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
            )
            .bind(&emp.id)
            .bind(month)
            .bind(emp.base_salary)
            .bind(bonus)
            .bind(deductions)
            .bind(net_pay)
            .bind(PAYSLIP_STATUS_PROCESSED)
            .bind(&now)
            .execute(&self.pool)
            .await?;

            self.changes
                .publish(Table::Payslips, ChangeOp::Insert, Some(emp.id.clone()));
            processed += 1;
        }

        Ok(PayrollSummary {
            month: month.to_string(),
            processed,
        })
    }

    // ==================== PERFORMANCE OPERATIONS ====================

    /// List all performance rows (unordered).
    pub async fn list_performance(&self) -> Result<Vec<Performance>, AppError> {
        let rows = sqlx::query(
            "SELECT id, emp_id, rating, tasks_completed, attendance_percent, last_review, created_at FROM performance"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(performance_from_row).collect())
    }

    /// Get the performance row for one employee.
    pub async fn get_performance(&self, emp_id: &str) -> Result<Option<Performance>, AppError> {
        let row = sqlx::query(
            "SELECT id, emp_id, rating, tasks_completed, attendance_percent, last_review, created_at FROM performance WHERE emp_id = ?"
        )
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(performance_from_row))
    }
}

// Helper functions for row conversion

fn employee_from_row(row: &sqlx::sqlite::SqliteRow) -> Employee {
    Employee {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        department: row.get("department"),
        position: row.get("position"),
        manager: row.get("manager"),
        base_salary: row.get("base_salary"),
        join_date: row.get("join_date"),
        status: row.get("status"),
        leave_balance: row.get("leave_balance"),
        created_at: row.get("created_at"),
    }
}

fn task_from_row(row: &sqlx::sqlite::SqliteRow) -> Task {
    let status: String = row.get("status");
    Task {
        id: row.get("id"),
        assigned_to: row.get("assigned_to"),
        assigned_by: row.get("assigned_by"),
        title: row.get("title"),
        due_date: row.get("due_date"),
        status: TaskStatus::from_str(&status).unwrap_or(TaskStatus::Pending),
        created_at: row.get("created_at"),
    }
}

fn attendance_from_row(row: &sqlx::sqlite::SqliteRow) -> Attendance {
    Attendance {
        id: row.get("id"),
        emp_id: row.get("emp_id"),
        date: row.get("date"),
        status: row.get("status"),
        check_in: row.get("check_in"),
        check_out: row.get("check_out"),
        created_at: row.get("created_at"),
    }
}

fn payslip_from_row(row: &sqlx::sqlite::SqliteRow) -> Payslip {
    Payslip {
        id: row.get("id"),
        emp_id: row.get("emp_id"),
        month: row.get("month"),
        salary: row.get("salary"),
        bonus: row.get("bonus"),
        deductions: row.get("deductions"),
        net_pay: row.get("net_pay"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

fn performance_from_row(row: &sqlx::sqlite::SqliteRow) -> Performance {
    Performance {
        id: row.get("id"),
        emp_id: row.get("emp_id"),
        rating: row.get("rating"),
        tasks_completed: row.get("tasks_completed"),
        attendance_percent: row.get("attendance_percent"),
        last_review: row.get("last_review"),
        created_at: row.get("created_at"),
    }
}
