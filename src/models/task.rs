//! Task model. Status is binary; employees flip it, managers create and
//! delete rows.

use serde::{Deserialize, Serialize};

/// Task status. The employee toggles between the two values and cannot set
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// The opposite status. Applying twice returns the original value.
    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// A task assigned by a manager to one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    /// Employee id the task is assigned to
    pub assigned_to: String,
    /// Display name of the assigning manager
    pub assigned_by: String,
    pub title: String,
    pub due_date: String,
    pub status: TaskStatus,
    pub created_at: String,
}

/// Request body for assigning a new task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskRequest {
    pub assigned_to: String,
    pub title: String,
    pub due_date: String,
}

/// Request body for toggling a task's status.
///
/// Carries the status the caller currently knows; the store writes the
/// opposite value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTaskRequest {
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_involution() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Pending.toggled().toggled(), TaskStatus::Pending);
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(TaskStatus::from_str("pending"), Some(TaskStatus::Pending));
        assert_eq!(
            TaskStatus::from_str("completed"),
            Some(TaskStatus::Completed)
        );
        assert_eq!(TaskStatus::from_str("done"), None);
    }
}
