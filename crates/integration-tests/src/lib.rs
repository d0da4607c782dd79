//! Integration test harness for the Lex registry.
//!
//! Each [`TestServer`] serves the real router over TCP on an ephemeral port,
//! backed by its own in-memory store, so tests are isolated and need no
//! external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lex-integration-tests
//! ```

use std::net::SocketAddr;

use reqwest::Client;
use tokio::task::JoinHandle;

use lex_registry::config::RegistryConfig;
use lex_registry::db;
use lex_registry::routes;
use lex_registry::state::AppState;

/// A registry server running in the background of a test.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with a fresh, migrated in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the store or listener cannot be created.
    #[allow(clippy::expect_used)]
    pub async fn spawn() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create in-memory store");
        let config =
            RegistryConfig::from_lookup(|_| None).expect("Default configuration is valid");
        let app = routes::app(AppState::new(config, pool));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Listener has an address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                panic!("test server failed: {e}");
            }
        });

        Self {
            addr,
            client: Client::new(),
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Shared HTTP client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
