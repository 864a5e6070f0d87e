//! 测试公共模块
//! 提供测试辅助函数和测试工具

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use gobank::{
    auth::jwt::TokenService,
    config::{
        AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig, StoreBackend,
        StoreConfig,
    },
    middleware::AppState,
    repository::MemoryAccountStore,
    routes,
    services::AccountService,
};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置（内存存储，无需数据库）
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(), // 使用随机端口
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: Secret::new(String::new()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            timeout_secs: 5,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new(TEST_SECRET.to_string()),
            token_ttl_secs: 120,
            password_min_length: 6,
        },
    }
}

/// 创建测试应用状态
pub fn create_test_app_state() -> Arc<AppState> {
    let config = Arc::new(create_test_config());
    let token_service =
        Arc::new(TokenService::from_config(&config).expect("Failed to create token service"));
    let account_service = Arc::new(AccountService::new(
        Arc::new(MemoryAccountStore::new()),
        token_service.clone(),
        config,
    ));

    Arc::new(AppState {
        token_service,
        account_service,
    })
}

/// 创建测试路由
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = create_test_app_state();
    (routes::create_router(state.clone()), state)
}

/// 测试响应
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl TestResponse {
    /// 从 Set-Cookie 中取出会话令牌
    pub fn session_token(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| v.split(';').next()?.strip_prefix("gb_session="))
            .map(|s| s.to_string())
    }
}

/// 发送请求并解析 JSON 响应
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        json,
    }
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_session(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("gb_session={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// 通过 API 创建账户，返回 (id, 会话令牌)
pub async fn create_account_via_api(app: &Router, first_name: &str, password: &str) -> (String, String) {
    let response = send(
        app,
        post_json(
            "/account",
            &serde_json::json!({
                "firstName": first_name,
                "lastName": "B",
                "password": password,
            }),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let id = response.json["created"]
        .as_str()
        .expect("created id")
        .to_string();
    let token = response.session_token().expect("session cookie");
    (id, token)
}
