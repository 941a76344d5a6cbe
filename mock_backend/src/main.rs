use mock_backend::frameworks::{config, server};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    server::init_tracing();

    let addr = SocketAddr::from(([127, 0, 0, 1], config::http_port()));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return;
        }
    };

    if let Err(e) = server::run(listener).await {
        tracing::error!(error = %e, "mock backend stopped");
    }
}
