//! 银行账户服务库
//! 会话令牌签发与校验、路由级身份绑定、账户管理

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;
