//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, middleware::AppState};

/// 请求体大小上限
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/login", post(handlers::auth::login))
        .route(
            "/account",
            get(handlers::account::list_accounts).post(handlers::account::create_account),
        );

    // 会话守卫：令牌主体必须与路径 id 一致
    let guarded_routes = Router::new()
        .route(
            "/account/{id}",
            get(handlers::account::get_account).delete(handlers::account::delete_account),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.token_service.clone(),
            crate::auth::middleware::session_guard_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(guarded_routes)
        .layer(CookieManagerLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
