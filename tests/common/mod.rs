//! Helpers shared by the integration tests

#![allow(dead_code)]

use photogram::api::{serve, AppState, SharedState};
use photogram::config::Config;
use photogram::store::Stores;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Config with a signing secret and the cheapest bcrypt cost
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.bcrypt_cost = 4;
    config
}

/// App state over a fresh in-memory store, plus a handle on the stores
pub fn test_state() -> (SharedState, Stores) {
    let stores = Stores::in_memory();
    let state = AppState::new(test_config(), stores.clone()).expect("Failed to build state");
    (Arc::new(state), stores)
}

pub struct TestServer {
    pub base_url: String,
    pub state: SharedState,
    pub stores: Stores,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Start the API on an ephemeral port. The listener is bound before this
/// returns, so requests can be sent right away.
pub async fn start_test_server() -> TestServer {
    let (state, stores) = test_state();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    let server_state = state.clone();
    let handle = tokio::spawn(async move {
        let _ = serve(listener, server_state).await;
    });

    TestServer {
        base_url: format!("http://{}/api", addr),
        state,
        stores,
        handle,
    }
}
