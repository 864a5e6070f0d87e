//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Body written for every rejected guarded request.
pub const ACCESS_DENIED: &str = "Access Denied";

/// Message shared by both login failure paths.
pub const LOGIN_FAILED: &str = "invalid account number or password";

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Access denied")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Malformed(_)
            | AppError::NotFound(_)
            | AppError::InvalidCredentials
            | AppError::Conflict(_)
            | AppError::StoreUnavailable(_)
            | AppError::Database(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized => ACCESS_DENIED.to_string(),
            // 不区分账户不存在与密码错误
            AppError::InvalidCredentials => LOGIN_FAILED.to_string(),
            AppError::Malformed(msg) => msg.clone(),
            AppError::NotFound(msg) => format!("not found: {}", msg),
            AppError::Conflict(msg) => format!("conflict: {}", msg),
            AppError::StoreUnavailable(_) => "account store unavailable".to_string(),
            AppError::Database(_) => "database error occurred".to_string(),
            AppError::Config(_) => "configuration error".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }
}

/// 错误响应 DTO
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 记录错误日志
        if status.is_server_error() {
            tracing::error!(code = self.code(), message = %self, "Application error");
        } else {
            tracing::warn!(code = self.code(), message = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 请求体解码失败统一为 400
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Malformed(rejection.body_text())
    }
}
