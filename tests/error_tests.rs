//! 错误处理测试
//! 验证错误响应的状态码与 {"error": ...} 响应体

use axum::{http::StatusCode, response::IntoResponse};
use gobank::error::AppError;
use http_body_util::BodyExt;
use serde_json::{json, Value};

async fn render(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================
// 状态码映射
// ============================================

#[tokio::test]
async fn test_unauthorized_is_access_denied() {
    let (status, body) = render(AppError::Unauthorized).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Access Denied"}));
}

#[tokio::test]
async fn test_login_failures_share_one_body() {
    let (status, body) = render(AppError::InvalidCredentials).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid account number or password"}));
}

#[tokio::test]
async fn test_client_errors_are_bad_request() {
    for error in [
        AppError::Malformed("bad body".to_string()),
        AppError::NotFound("account x".to_string()),
        AppError::Conflict("number taken".to_string()),
        AppError::StoreUnavailable("find_by_id timed out".to_string()),
    ] {
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 1);
    }
}

// ============================================
// 内部错误不泄露细节
// ============================================

#[tokio::test]
async fn test_internal_errors_hide_detail() {
    let (status, body) = render(AppError::Internal("argon2 params rejected".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "internal server error"}));

    let (status, body) = render(AppError::Database(sqlx::Error::PoolTimedOut)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "database error occurred"}));

    let (_, body) = render(AppError::StoreUnavailable("delete timed out".to_string())).await;
    assert_eq!(body, json!({"error": "account store unavailable"}));
}
