//! Tracing and telemetry bootstrap.
//!
//! Installs the `tracing` subscriber (env-filter + fmt) and, when a trace
//! endpoint is configured, an OpenTelemetry OTLP export layer so request
//! spans reach the collector (Jaeger ingests OTLP natively).

use crate::config::Config;
use crate::SERVICE_NAME;
use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Without a configured trace endpoint only the fmt layer is installed;
/// with one, spans are additionally exported over OTLP/gRPC. The filter
/// defaults to `web_service=debug,tower_http=debug` and is overridable via
/// `RUST_LOG`.
pub fn init(config: &Config) -> Result<(), TraceError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "web_service=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    match config.trace_endpoint.as_deref() {
        Some(endpoint) => {
            let provider = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(endpoint),
                )
                .with_trace_config(sdktrace::Config::default().with_resource(Resource::new(
                    vec![
                        KeyValue::new("service.name", SERVICE_NAME),
                        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                    ],
                )))
                .install_batch(runtime::Tokio)?;

            global::set_tracer_provider(provider.clone());
            let tracer = provider.tracer(SERVICE_NAME);

            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init();
        }
        None => registry.init(),
    }

    Ok(())
}

/// Flush pending spans and shut down the tracer provider.
///
/// Called during graceful shutdown, after the listener has stopped.
pub fn shutdown() {
    global::shutdown_tracer_provider();
}
