use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn, Level};

use fee_tracker_backend::backend::{create_router, initialize_backend, AppState};

const PORT_ENV: &str = "FEE_TRACKER_PORT";
const RECONCILE_INTERVAL_ENV: &str = "FEE_TRACKER_RECONCILE_INTERVAL_SECS";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 86_400;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up backend");
    let app_state = initialize_backend().await?;

    // Catch up on any billing periods that rolled over while the server
    // was down. A failure here is logged but does not stop the server;
    // the recurring sweep retries.
    match app_state.fee_service.reconcile().await {
        Ok(reset_count) => info!("Startup reconciliation reset {} student(s)", reset_count),
        Err(e) => error!("Startup reconciliation failed: {}", e),
    }

    spawn_reconcile_task(app_state.clone());

    let app = create_router(app_state);

    // Start the server
    let port = env_or(PORT_ENV, DEFAULT_PORT);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a reconciliation sweep on a fixed interval for as long as the
/// server lives. Sweep scheduling stays out of the domain layer so tests
/// and admin tooling can drive reconciliation themselves.
fn spawn_reconcile_task(app_state: AppState) {
    // Zero would panic inside tokio's interval
    let interval_secs = env_or(RECONCILE_INTERVAL_ENV, DEFAULT_RECONCILE_INTERVAL_SECS).max(1);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; startup already reconciled
        interval.tick().await;

        loop {
            interval.tick().await;
            match app_state.fee_service.reconcile().await {
                Ok(reset_count) => {
                    if reset_count > 0 {
                        info!("Scheduled reconciliation reset {} student(s)", reset_count);
                    }
                }
                Err(e) => error!("Scheduled reconciliation failed: {}", e),
            }
        }
    });
}

/// Read a value from the environment, falling back to a default when the
/// variable is unset or unparseable.
fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Ignoring invalid {}: {}", name, value);
                default
            }
        },
        Err(_) => default,
    }
}
