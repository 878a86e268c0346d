//! Server binary: perfect-play tic-tac-toe over HTTP.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use oxo_server::{AppState, Cli, GameRepository, PlayerService, create_app};

/// Resolves the database path: flag beats `DATABASE_URL`, beats
/// `oxo.db`.
fn database_path(cli: &Cli) -> String {
    cli.database_path
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "oxo.db".to_string())
}

/// Completes when ctrl-c arrives so the server can drain and stop.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping server"),
        Err(e) => {
            // Without a signal handler the server just runs until
            // killed.
            warn!(error = %e, "Failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = database_path(&cli);
    info!(path = %db_path, "Opening database");

    let repository = GameRepository::new(db_path)?;
    repository.run_migrations()?;

    let state = AppState::new(PlayerService::new(repository));
    let app = create_app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}
