//! HRMS Portal Backend
//!
//! A REST backend for a role-gated HR portal: an identity gate, employee
//! self-service reads plus task toggling, manager directory/task/payroll
//! operations, and a WebSocket change-notification feed over SQLite
//! persistence.

mod api;
mod auth;
mod changes;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration; missing store parameters abort startup
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HRMS Portal Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Identity gate
        .route("/login", post(api::login))
        // Manager: directory
        .route("/employees", get(api::list_employees))
        .route("/employees", post(api::create_employee))
        .route("/employees/{id}", put(api::update_employee))
        .route("/employees/{id}", delete(api::delete_employee))
        // Employee: scoped reads
        .route("/employees/{id}", get(api::get_employee))
        .route("/employees/{id}/tasks", get(api::list_employee_tasks))
        .route(
            "/employees/{id}/attendance",
            get(api::list_employee_attendance),
        )
        .route("/employees/{id}/payslips", get(api::list_employee_payslips))
        .route(
            "/employees/{id}/performance",
            get(api::get_employee_performance),
        )
        // Tasks
        .route("/tasks", get(api::list_tasks))
        .route("/tasks", post(api::assign_task))
        .route("/tasks/{id}", delete(api::delete_task))
        .route("/tasks/{id}/toggle", post(api::toggle_task))
        // Payroll
        .route("/payslips", get(api::list_payslips))
        .route("/payslips/{id}/download", post(api::download_payslip))
        .route("/payroll", post(api::process_payroll))
        // Performance
        .route("/performance", get(api::list_performance))
        // Attendance
        .route("/attendance/today", get(api::present_today))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // The WebSocket feed authenticates via query token instead of headers
    let event_routes = Router::new().route("/api/events/ws", get(api::subscribe_events));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(event_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
