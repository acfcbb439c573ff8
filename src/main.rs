// src/main.rs

use quizdom::config::Config;
use quizdom::db;
use quizdom::routes;
use quizdom::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment (.env is read if present)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let pool = db::connect(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to open database {}: {:?}", config.database_url, e);
        e
    })?;
    tracing::info!("Database connected...");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let state = AppState { pool, config };
    let app = routes::create_router(state);

    axum::serve(listener, app).await?;
    Ok(())
}
