//! Gate admin server: connects to MySQL, then serves the admin pages.

use gate_admin::{app, AppState, MySqlStore, Settings};
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gate_admin=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let store = MySqlStore::connect(&settings.database_url, settings.max_connections).await?;
    let app = app(AppState::new(store), settings.home);

    let listener = TcpListener::bind(settings.listen_addr()).await?;
    tracing::info!(home = ?settings.home, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
