// Shared helpers for spinning up the mock backend and wiring clients to it.
#![allow(dead_code)]

use api_client::{ClientConfig, InMemorySessionStore, Session, UnauthorizedHandler};
use mock_backend::AppState;
use std::sync::{Arc, Mutex};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret";

pub struct TestBackend {
    pub base_url: String,
    // Clone of the served state; lets tests seed tokens and read recorded requests.
    pub state: AppState,
}

// Start a backend on an ephemeral port for one test.
pub async fn spawn_backend() -> TestBackend {
    spawn_backend_with(AppState::seeded(ADMIN_EMAIL, ADMIN_PASSWORD)).await
}

pub async fn spawn_backend_with(state: AppState) -> TestBackend {
    api_client::frameworks::telemetry::init_tracing();
    // Bind before spawning so connections queue until the server accepts them.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(mock_backend::serve(listener, state.clone()));

    TestBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

pub fn config(backend: &TestBackend) -> ClientConfig {
    ClientConfig {
        api_base_url: backend.base_url.clone(),
        asset_base_url: format!("{}/storage", backend.base_url),
        request_timeout_ms: 5_000,
        ..ClientConfig::default()
    }
}

pub fn session() -> (Session, InMemorySessionStore) {
    let store = InMemorySessionStore::new();
    (Session::new(Arc::new(store.clone())), store)
}

// Records every route the clients redirect to.
#[derive(Default)]
pub struct RecordingRedirect {
    routes: Mutex<Vec<String>>,
}

impl RecordingRedirect {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().expect("routes mutex poisoned").clone()
    }
}

impl UnauthorizedHandler for RecordingRedirect {
    fn on_unauthorized(&self, sign_in_route: &str) {
        self.routes
            .lock()
            .expect("routes mutex poisoned")
            .push(sign_in_route.to_string());
    }
}
