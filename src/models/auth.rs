//! Authentication-related models

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub number: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub number: String,
}

/// Result of a successful signup
#[derive(Debug)]
pub struct CreatedAccount {
    pub id: String,
    pub token: String,
}
