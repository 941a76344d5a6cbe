use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, RESOURCES};
use std::io::Result;

// Recorded requests are logged at debug under this crate's target.
const DEFAULT_FILTER: &str = "info,mock_backend=debug";

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serve with the default seeded state.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let admin_email = config::admin_email();
    let state = AppState::seeded(&admin_email, &config::admin_password());
    tracing::info!(%admin_email, tables = state.tables.len(), "seeded mock backend");
    serve(listener, state).await
}

// Serve a caller-provided state; tests keep a clone to inspect recorded requests.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    tracing::info!(%address, resources = ?RESOURCES, "mock backend listening");

    axum::serve(listener, app(state)).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}
