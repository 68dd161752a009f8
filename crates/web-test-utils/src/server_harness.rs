//! Test server harness for E2E testing
//!
//! Provides `TestServer` for spawning real service instances in tests.
//!
//! The harness runs the production router with no database or cache
//! configured by default; unconfigured-dependency behavior (empty health
//! report, 503 diagnostics) is part of the service contract and fully
//! testable without external services.

use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock};
use tokio::task::JoinHandle;
use web_service::config::Config;
use web_service::observability;
use web_service::routes::{self, AppState};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static METRICS_INIT: Mutex<()> = Mutex::new(());

/// Process-wide Prometheus handle for test servers.
///
/// The recorder can only be installed once per process; every spawned test
/// server shares it. Counter values therefore accumulate across tests in
/// the same binary - assert on deltas, not absolute values.
pub fn metrics_handle() -> Result<PrometheusHandle, anyhow::Error> {
    let _guard = METRICS_INIT
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics init lock poisoned"))?;

    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = observability::metrics::install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    Ok(METRICS_HANDLE.get_or_init(|| handle).clone())
}

/// Test harness for spawning the web service in E2E tests.
pub struct TestServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a test server with no dependencies configured.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(HashMap::from([(
            "NODE_ENV".to_string(),
            "test".to_string(),
        )]))
        .await
    }

    /// Spawn a test server with explicit environment variables.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    ///
    /// Note: `DATABASE_URL`/`REDIS_URL` in `vars` only mark the capability
    /// as configured for config purposes; the harness never opens real
    /// connections. Tests needing live dependencies construct their own
    /// `AppState`.
    pub async fn spawn_with_vars(vars: HashMap<String, String>) -> Result<Self, anyhow::Error> {
        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let state = Arc::new(AppState::new(config.clone(), None, None));

        // Build routes using the service's real route builder
        let app = routes::build_routes(state, metrics_handle()?);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Explicitly abort the HTTP server task to ensure immediate cleanup
        // when the test completes.
        self._handle.abort();
    }
}
