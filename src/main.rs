//! 银行账户服务主入口

use gobank::{
    auth::jwt::TokenService, config::AppConfig, db, handlers::health, middleware::AppState,
    routes, server, services::AccountService, telemetry,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("gobank {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    if let Ok(env) = std::env::var("GOBANK_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gobank starting...");

    // 3. 账户存储
    let store = db::create_account_store(&config).await?;

    tracing::info!(backend = ?config.store.backend, "Account store initialized");

    // 4. 构建应用状态（签名密钥在此一次性加载）
    let config = Arc::new(config);
    let token_service = Arc::new(TokenService::from_config(&config)?);
    let account_service = Arc::new(AccountService::new(
        store,
        token_service.clone(),
        config.clone(),
    ));

    let app_state = Arc::new(AppState {
        token_service,
        account_service,
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭，超时后放弃仍未完成的请求
    server::serve_with_drain(
        listener,
        app,
        shutdown_signal(),
        Duration::from_secs(config.server.graceful_shutdown_timeout_secs),
    )
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// 打印帮助信息
fn print_help() {
    println!("gobank {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: gobank [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 GOBANK_ 前缀的环境变量完成");
    println!("  GOBANK_SECURITY__JWT_SECRET 必须设置（至少 32 字符）");
    println!("  例如 GOBANK_SECURITY__JWT_SECRET, GOBANK_DATABASE__URL, GOBANK_STORE__BACKEND");
}
