//! Change-notification feed.
//!
//! Every successful insert/update/delete against the record store publishes
//! one `ChangeEvent` to an in-process broadcast hub. Subscribers filter by
//! table and, optionally, by the employee-scope column value of the affected
//! row (`assigned_to` for tasks, `emp_id` elsewhere, `id` for employees).
//! Events carry no row payload; consumers treat them as reload hints only.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Broadcast channel capacity, enough to buffer a burst of mutations
const BROADCAST_CAPACITY: usize = 256;

/// Tables covered by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Employees,
    Tasks,
    Attendance,
    Payslips,
    Performance,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Employees => "employees",
            Table::Tasks => "tasks",
            Table::Attendance => "attendance",
            Table::Payslips => "payslips",
            Table::Performance => "performance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "employees" => Some(Table::Employees),
            "tasks" => Some(Table::Tasks),
            "attendance" => Some(Table::Attendance),
            "payslips" => Some(Table::Payslips),
            "performance" => Some(Table::Performance),
            _ => None,
        }
    }
}

/// Mutation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// One event per row mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub table: Table,
    pub op: ChangeOp,
    /// Employee-scope value of the affected row, when the table has one
    pub scope: Option<String>,
}

impl ChangeEvent {
    /// Whether this event matches a subscription on `table` with an optional
    /// equality predicate on the scope column.
    pub fn matches(&self, table: Table, scope: Option<&str>) -> bool {
        if self.table != table {
            return false;
        }
        match scope {
            None => true,
            Some(wanted) => self.scope.as_deref() == Some(wanted),
        }
    }
}

/// In-process broadcast hub for change events.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Publish one event. A send with no subscribers returns Err; safe to ignore.
    pub fn publish(&self, table: Table, op: ChangeOp, scope: Option<String>) {
        let _ = self.tx.send(ChangeEvent { table, op, scope });
    }

    /// Subscribe to the raw feed. Filtering happens at the consumer.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(Table::Tasks, ChangeOp::Insert, Some("EMP001".to_string()));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.table, Table::Tasks);
        assert_eq!(event.op, ChangeOp::Insert);
        assert_eq!(event.scope.as_deref(), Some("EMP001"));
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let feed = ChangeFeed::new();
        feed.publish(Table::Payslips, ChangeOp::Insert, None);
    }

    #[test]
    fn test_event_matching() {
        let event = ChangeEvent {
            table: Table::Tasks,
            op: ChangeOp::Update,
            scope: Some("EMP001".to_string()),
        };

        assert!(event.matches(Table::Tasks, None));
        assert!(event.matches(Table::Tasks, Some("EMP001")));
        assert!(!event.matches(Table::Tasks, Some("EMP002")));
        assert!(!event.matches(Table::Payslips, None));

        let unscoped = ChangeEvent {
            table: Table::Employees,
            op: ChangeOp::Delete,
            scope: None,
        };
        assert!(unscoped.matches(Table::Employees, None));
        assert!(!unscoped.matches(Table::Employees, Some("EMP001")));
    }

    #[test]
    fn test_table_round_trip() {
        for table in [
            Table::Employees,
            Table::Tasks,
            Table::Attendance,
            Table::Payslips,
            Table::Performance,
        ] {
            assert_eq!(Table::from_str(table.as_str()), Some(table));
        }
        assert_eq!(Table::from_str("salaries"), None);
    }
}
