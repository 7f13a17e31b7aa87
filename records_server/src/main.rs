//! Academic records API server.
//!
//! Run from repo root: `cargo run -p records-server`
//! Settings come from the environment (or a `.env` file): DATABASE_URL, PORT, CORS_ORIGINS, ...

use academic_records::{app, connect, AppState, Argon2Guard, Catalog, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("academic_records=info,records_server=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    let catalog = Catalog::academic()?;
    let store = connect(&settings.database).await?;
    let state = AppState {
        store: Arc::new(store.clone()),
        guard: Arc::new(Argon2Guard::new(settings.credential_cost)?),
        catalog: Arc::new(catalog),
    };

    let router = app(state, &settings.http);
    let listener = TcpListener::bind((settings.http.host.as_str(), settings.http.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
