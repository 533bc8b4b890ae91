//! Identity gate endpoint.
//!
//! Resolves a submitted username/role pair into an identity value. This is
//! identity selection, not authentication: the password is checked for
//! presence only, and the manager role succeeds unconditionally.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Identity, LoginRequest, Role};
use crate::AppState;

/// POST /api/login - Resolve an identity.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Identity> {
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    match request.role {
        Role::Manager => success(Identity::Manager {
            username: request.username,
        }),
        Role::Employee => {
            // The only place employee ids are case-normalized
            match state.repo.find_employee_for_login(&request.username).await? {
                Some(emp) => success(Identity::Employee {
                    id: emp.id,
                    name: emp.name,
                }),
                None => Err(AppError::NotFound(format!(
                    "No employee found for id {}",
                    request.username.to_uppercase()
                ))),
            }
        }
    }
}
