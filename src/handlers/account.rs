//! 账户管理的 HTTP 处理器

use crate::{
    auth::middleware::{VerifiedIdentity, SESSION_COOKIE},
    error::AppError,
    middleware::AppState,
    models::account::*,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tower_cookies::{
    cookie::{time::Duration, Cookie, SameSite},
    Cookies,
};

/// 列出账户
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = state.account_service.list_accounts().await?;
    Ok(Json(accounts))
}

/// 创建账户，并以会话 cookie 自动登录
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;

    let created = state.account_service.create_account(req).await?;
    let max_age = Duration::seconds(state.token_service.ttl_secs() as i64);

    cookies.add(
        Cookie::build((SESSION_COOKIE, created.token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .max_age(max_age)
            .build(),
    );

    Ok(Json(json!({ "created": created.id })))
}

/// 获取账户详情（已通过会话守卫）
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    identity: VerifiedIdentity,
) -> Result<impl IntoResponse, AppError> {
    let account = state
        .account_service
        .get_account(&identity.account_id)
        .await?;

    Ok(Json(account))
}

/// 删除账户（已通过会话守卫）
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    identity: VerifiedIdentity,
) -> Result<impl IntoResponse, AppError> {
    state
        .account_service
        .delete_account(&identity.account_id)
        .await?;

    Ok(Json(json!({ "deleted": identity.account_id })))
}
