//! Process lifecycle: connect, migrate, serve, and shut down gracefully.

use crate::config::AppConfig;
use crate::error::{ServerError, StoreError};
use crate::migration::{apply_migrations, ensure_database_exists};
use crate::routes::app_router;
use crate::state::{AppState, RequestPolicy};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runs the API until a termination signal arrives.
pub async fn serve(config: AppConfig) -> Result<(), ServerError> {
    ensure_database_exists(&config.db).await?;
    let pool = PgPoolOptions::new()
        .max_connections(config.db.max_connections)
        .connect_with(config.db.connect_options())
        .await
        .map_err(StoreError::from)?;
    apply_migrations(&pool).await?;
    info!(database = %config.db.name, "database ready");

    let policy = RequestPolicy {
        abort: CancellationToken::new(),
        statement_timeout: config.db.statement_timeout,
        request_timeout: Some(config.http_timeout),
    };
    let abort = policy.abort.clone();
    let app = app_router(AppState { pool: pool.clone() }, policy);

    let listener = TcpListener::bind(config.server_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    run_until(listener, app, wait_for_shutdown(), config.shutdown_timeout, abort).await?;
    pool.close().await;
    info!("server stopped");
    Ok(())
}

/// Serves `app` until `signal` resolves, then stops accepting connections and
/// waits up to `grace` for in-flight requests. If they are still running after
/// that, `abort` is cancelled and the server task is dropped.
pub async fn run_until<S>(
    listener: TcpListener,
    app: Router,
    signal: S,
    grace: Duration,
    abort: CancellationToken,
) -> Result<(), ServerError>
where
    S: Future<Output = ()>,
{
    let stop = CancellationToken::new();
    let stop_rx = stop.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { stop_rx.cancelled().await })
            .await
    });

    tokio::select! {
        res = &mut server => return Ok(res??),
        _ = signal => {}
    }

    info!(?grace, "shutdown requested; draining connections");
    stop.cancel();
    match tokio::time::timeout(grace, &mut server).await {
        Ok(res) => Ok(res??),
        Err(_) => {
            warn!(?grace, "graceful shutdown timed out; cancelling in-flight work");
            abort.cancel();
            server.abort();
            Ok(())
        }
    }
}

/// Resolves on SIGTERM, SIGINT, SIGQUIT or Ctrl+C.
pub async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (mut term, mut int, mut quit) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::quit()),
        ) {
            (Ok(t), Ok(i), Ok(q)) => (t, i, q),
            _ => {
                warn!("could not install signal handlers; falling back to ctrl_c");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = term.recv() => info!("received SIGTERM"),
            _ = int.recv() => info!("received SIGINT"),
            _ = quit.recv() => info!("received SIGQUIT"),
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn bound() -> (TcpListener, std::net::SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    async fn raw_get(addr: std::net::SocketAddr, path: &str) -> TcpStream {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();
        stream
    }

    #[tokio::test]
    async fn stops_cleanly_when_idle() {
        let (listener, addr) = bound().await;
        let app = Router::new().route("/ping", get(|| async { "pong" }));
        let (tx, rx) = oneshot::channel::<()>();
        let abort = CancellationToken::new();
        let handle = tokio::spawn(run_until(
            listener,
            app,
            async move {
                let _ = rx.await;
            },
            Duration::from_secs(2),
            abort.clone(),
        ));

        let mut stream = raw_get(addr, "/ping").await;
        let mut buf = String::new();
        stream.read_to_string(&mut buf).await.unwrap();
        assert!(buf.starts_with("HTTP/1.1 200"));
        assert!(buf.ends_with("pong"));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
        assert!(!abort.is_cancelled());
    }

    #[tokio::test]
    async fn cancels_stuck_requests_after_grace() {
        let (listener, addr) = bound().await;
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late"
            }),
        );
        let (tx, rx) = oneshot::channel::<()>();
        let abort = CancellationToken::new();
        let handle = tokio::spawn(run_until(
            listener,
            app,
            async move {
                let _ = rx.await;
            },
            Duration::from_millis(100),
            abort.clone(),
        ));

        let _stream = raw_get(addr, "/slow").await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        let finished = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(finished.is_ok(), "run_until should give up after the grace period");
        assert!(abort.is_cancelled());
    }
}
