use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Connection;
use std::time::Duration;
use tokio::time::sleep;

/// How often the startup ping is attempted before giving up.
#[derive(Debug, Clone, Copy)]
pub struct ConnectRetry {
    pub max_attempts: u32,
    pub delay: Duration,
    /// Upper bound for obtaining a connection on a single attempt.
    pub acquire_timeout: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(3),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Opens the pool and pings it until it answers or `retry` is exhausted.
/// On failure the pool is closed before the last error is returned.
pub async fn create_pool(
    options: PgConnectOptions,
    retry: ConnectRetry,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(retry.acquire_timeout)
        .connect_lazy_with(options);

    let mut attempt = 1;
    loop {
        match ping(&pool).await {
            Ok(()) => {
                tracing::info!(attempt, "Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt >= retry.max_attempts => {
                tracing::error!(attempt, error = %e, "Giving up connecting to database");
                pool.close().await;
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    "Connection attempt {} failed: {}. Retrying in {:?}",
                    attempt,
                    e,
                    retry.delay
                );
                sleep(retry.delay).await;
                attempt += 1;
            }
        }
    }
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}
