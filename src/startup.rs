//! Composition root and process lifecycle.
//!
//! [`Application::build`] connects to Postgres and wires
//! repository → service → router. [`Application::run_until`] serves until the
//! given shutdown future resolves, then closes the pool and drains the HTTP
//! server within [`SHUTDOWN_DEADLINE`].

use anyhow::Context;
use axum::Router;
use sqlx::PgPool;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::adapters::PostgresTransactionRepository;
use crate::config::Config;
use crate::db::{self, ConnectRetry};
use crate::services::DefaultTransactionService;
use crate::{create_app, AppState};

pub const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(5);

pub struct Application {
    listener: TcpListener,
    router: Router,
    pool: PgPool,
    shutdown_deadline: Duration,
}

impl Application {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        tracing::info!(
            "Initializing postgres database: {}",
            config.database.redacted_connection_string()
        );
        let options = config.database.connect_options()?;
        let pool = db::create_pool(options, ConnectRetry::default())
            .await
            .context("Unable to initialize database")?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
        let listener = bind_or_close(addr, &pool).await?;

        Ok(Self::new(listener, wire(pool.clone()), pool))
    }

    pub fn new(listener: TcpListener, router: Router, pool: PgPool) -> Self {
        Self {
            listener,
            router,
            pool,
            shutdown_deadline: SHUTDOWN_DEADLINE,
        }
    }

    #[cfg(test)]
    fn with_shutdown_deadline(mut self, deadline: Duration) -> Self {
        self.shutdown_deadline = deadline;
        self
    }

    #[cfg(test)]
    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until `shutdown` resolves or the server fails.
    /// The pool is closed on every path out of this function.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Self {
            listener,
            router,
            pool,
            shutdown_deadline,
        } = self;

        if let Ok(addr) = listener.local_addr() {
            tracing::info!("listening on {}", addr);
        }

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
        });

        tokio::select! {
            _ = shutdown => {}
            result = &mut server => {
                pool.close().await;
                return match result {
                    Ok(Ok(())) => Err(anyhow::anyhow!("server stopped unexpectedly")),
                    Ok(Err(e)) => Err(e).context("Listen"),
                    Err(e) => Err(e).context("server task failed"),
                };
            }
        }

        tracing::info!("Shutdown server...");
        pool.close().await;
        tracing::info!("Database pool closed");

        let _ = stop_tx.send(());
        match tokio::time::timeout(shutdown_deadline, &mut server).await {
            Ok(Ok(Ok(()))) => {
                tracing::info!("Server exiting");
                Ok(())
            }
            Ok(Ok(Err(e))) => Err(e).context("Server shutdown"),
            Ok(Err(e)) => Err(e).context("server task failed during shutdown"),
            Err(_) => {
                server.abort();
                Err(anyhow::anyhow!(
                    "Server shutdown did not complete within {:?}",
                    shutdown_deadline
                ))
            }
        }
    }
}

/// Binds the listener, closing `pool` if the address is unavailable.
async fn bind_or_close(addr: SocketAddr, pool: &PgPool) -> anyhow::Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            pool.close().await;
            Err(e).with_context(|| format!("failed to bind {addr}"))
        }
    }
}

/// Builds the router over a Postgres-backed service.
pub fn wire(pool: PgPool) -> Router {
    let repository = Arc::new(PostgresTransactionRepository::new(pool));
    let service = Arc::new(DefaultTransactionService::new(repository));
    create_app(AppState::new(service))
}
