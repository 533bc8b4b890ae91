//! Identity types for the login gate.
//!
//! An identity is an explicit value resolved at login and handed to the
//! client; there is no session token, expiry, or server-side session state.

use serde::{Deserialize, Serialize};

/// Requested role at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
}

/// Request body for the login gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    /// Never inspected beyond presence
    pub password: String,
    pub role: Role,
}

/// The resolved actor driving which view and data scope is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    /// Employee identity carrying the directory id and display name
    #[serde(rename_all = "camelCase")]
    Employee { id: String, name: String },
    /// Manager identity carrying only the submitted username
    #[serde(rename_all = "camelCase")]
    Manager { username: String },
}
