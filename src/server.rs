//! 服务器生命周期
//! 优雅关闭：收到信号后停止接收新连接，在限定时间内等待在途请求完成

use axum::Router;
use std::{future::Future, future::IntoFuture, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Notify};

/// 运行服务器直到 `shutdown` 完成，然后最多等待 `drain_timeout` 让在途请求结束
///
/// 超时后直接返回，仍未结束的连接随运行时一起丢弃
pub async fn serve_with_drain<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let notify = draining.clone();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            notify.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => result,
        _ = async {
            draining.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            tracing::warn!(
                timeout_ms = drain_timeout.as_millis() as u64,
                "Graceful shutdown timed out, dropping open connections"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tokio::{io::AsyncWriteExt, net::TcpStream};

    #[tokio::test]
    async fn test_returns_once_shutdown_fires_with_no_requests() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let app = Router::new().route("/", get(|| async { "ok" }));

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            serve_with_drain(listener, app, async {}, Duration::from_secs(30)),
        )
        .await;

        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_stuck_request_is_abandoned_after_drain_timeout() {
        let entered = Arc::new(Notify::new());

        let handler_entered = entered.clone();
        let app = Router::new().route(
            "/stuck",
            get(move || {
                let entered = handler_entered.clone();
                async move {
                    entered.notify_one();
                    std::future::pending::<()>().await
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 请求进入处理器后再触发关闭
        let shutdown = {
            let entered = entered.clone();
            async move { entered.notified().await }
        };
        let server = tokio::spawn(serve_with_drain(
            listener,
            app,
            shutdown,
            Duration::from_millis(200),
        ));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /stuck HTTP/1.1\r\nhost: localhost\r\n\r\n")
            .await
            .unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), server).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
        drop(stream);
    }
}
