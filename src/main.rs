use portfolio_txn::{config::Config, shutdown::shutdown_signal, startup::Application};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting server...");
    let config = Config::from_env()?;

    let app = Application::build(&config).await.map_err(|e| {
        tracing::error!("Unable to start: {e:#}");
        e
    })?;

    app.run_until(shutdown_signal()).await.map_err(|e| {
        tracing::error!("Server exited with error: {e:#}");
        e
    })
}
