//! Runtime metrics sampler background task.
//!
//! Periodically refreshes the process-level gauges that have no natural
//! per-request recording point: uptime and connection counts.
//!
//! # Graceful Shutdown
//!
//! The task supports graceful shutdown via a cancellation token. When the
//! token is cancelled, the task completes its current iteration and exits
//! cleanly.

use crate::routes::AppState;
use metrics::gauge;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Sampling interval in seconds.
pub const SAMPLE_INTERVAL_SECONDS: u64 = 5;

/// Run the runtime metrics sampler loop.
///
/// Refreshes `process_uptime_seconds`, `database_connections_active`
/// (current pool size) and `redis_connections_active` every tick. Exits when
/// the cancellation token is triggered.
pub async fn run_runtime_metrics_sampler(state: Arc<AppState>, cancel_token: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(SAMPLE_INTERVAL_SECONDS));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                sample(&state);
            }
            _ = cancel_token.cancelled() => {
                info!("Runtime metrics sampler received shutdown signal, exiting");
                break;
            }
        }
    }
}

fn sample(state: &AppState) {
    gauge!("process_uptime_seconds").set(state.uptime_seconds());

    if let Some(pool) = &state.pool {
        gauge!("database_connections_active").set(f64::from(pool.size()));
    }

    let redis_connections = if state.cache.is_some() { 1.0 } else { 0.0 };
    gauge!("redis_connections_active").set(redis_connections);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashMap;

    #[test]
    fn test_sample_interval() {
        assert_eq!(SAMPLE_INTERVAL_SECONDS, 5);
    }

    #[test]
    fn test_sample_without_dependencies_does_not_panic() {
        let config = Config::from_vars(&HashMap::new()).expect("empty vars produce a config");
        let state = Arc::new(AppState::new(config, None, None));

        sample(&state);
    }

    #[tokio::test]
    async fn test_sampler_exits_on_cancellation() {
        let config = Config::from_vars(&HashMap::new()).expect("empty vars produce a config");
        let state = Arc::new(AppState::new(config, None, None));

        let cancel_token = CancellationToken::new();
        let task = tokio::spawn(run_runtime_metrics_sampler(state, cancel_token.clone()));

        cancel_token.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("sampler should exit promptly")
            .expect("sampler task should not panic");
    }
}
