//! Change-feed WebSocket endpoint.
//!
//! GET /api/events/ws?token=<PSK>&table=<table>[&scope=<emp_id>]
//! Auth: the PSK travels as a query parameter (browser WebSocket clients
//! cannot set custom headers on the handshake).
//!
//! One JSON text frame per matching change event. Events are reload hints
//! only; a lagged subscriber just keeps reading, since its policy is to
//! reload the affected collection on any event.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::auth;
use crate::changes::Table;
use crate::errors::AppError;
use crate::AppState;

#[derive(Deserialize)]
pub struct EventsQuery {
    token: String,
    table: String,
    scope: Option<String>,
}

/// GET /api/events/ws - Subscribe to change notifications for one table,
/// optionally narrowed to one employee's rows.
pub async fn subscribe_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    if !auth::constant_time_compare(&query.token, &state.config.api_psk) {
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    let table = Table::from_str(&query.table)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown table: {}", query.table)))?;
    let scope = query.scope;

    Ok(ws.on_upgrade(move |socket| event_session(socket, state, table, scope)))
}

async fn event_session(socket: WebSocket, state: AppState, table: Table, scope: Option<String>) {
    let (mut sink, mut stream) = socket.split();

    let mut rx = state.repo.changes().subscribe();
    tracing::info!(table = table.as_str(), scope = ?scope, "Change-feed subscriber connected");

    let mut ping_interval = tokio::time::interval(Duration::from_secs(30));
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        if !event.matches(table, scope.as_deref()) {
                            continue;
                        }
                        let Ok(json) = serde_json::to_string(&event) else {
                            break;
                        };
                        if sink.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // A gap costs the consumer at most one redundant reload
                        tracing::warn!(lagged = n, "Change-feed subscriber lagged; events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!(table = table.as_str(), "Change-feed subscriber disconnected");
}
