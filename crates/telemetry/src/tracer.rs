//! OpenTelemetry tracer initialization
//!
//! Sets up an OTLP span exporter compatible with any OTLP/HTTP backend and
//! bridges `tracing` spans into it.

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    propagation::TraceContextPropagator,
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use thiserror::Error;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::connection_string::ConnectionString;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid connection string: {0}")]
    ConnectionString(String),

    #[error("Failed to create span exporter: {0}")]
    Exporter(String),

    #[error("Failed to initialize subscriber: {0}")]
    Subscriber(String),
}

/// Telemetry configuration, overridable from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// OTLP traces endpoint (e.g. "http://localhost:4318/v1/traces")
    pub otlp_endpoint: Option<String>,
    /// Service name reported on every span
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Deployment environment (production, staging, development)
    pub environment: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: std::env::var("AGENT_TRACE_OTLP_ENDPOINT").ok(),
            service_name: std::env::var("AGENT_TRACE_SERVICE_NAME")
                .unwrap_or_else(|_| "agent-trace".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: std::env::var("AGENT_TRACE_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}

impl TelemetryConfig {
    /// Point the exporter at the backend described by a monitoring
    /// connection string.
    pub fn with_connection_string(mut self, raw: &str) -> Result<Self, TelemetryError> {
        let connection_string = ConnectionString::parse(raw)?;
        self.otlp_endpoint = Some(connection_string.traces_endpoint());
        Ok(self)
    }
}

/// Initialize the OpenTelemetry tracer and tracing subscriber.
///
/// Must be called once at startup, before any spans are created. Sets up:
/// - OTLP exporter for distributed traces (if an endpoint is configured)
/// - W3C TraceContext propagation
/// - tracing-subscriber with fmt and OpenTelemetry layers
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", config.service_version.clone()),
        KeyValue::new("deployment.environment", config.environment.clone()),
    ]);

    let tracer_provider = if let Some(endpoint) = &config.otlp_endpoint {
        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

        TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_sampler(Sampler::AlwaysOn)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource)
            .build()
    } else {
        // No exporter endpoint, spans still feed local logging
        TracerProvider::builder()
            .with_sampler(Sampler::AlwaysOn)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource)
            .build()
    };

    let tracer = tracer_provider.tracer("at-telemetry");
    global::set_tracer_provider(tracer_provider);

    let otel_layer = OpenTelemetryLayer::new(tracer);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agent_trace=debug,at_core=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.to_string()))?;

    tracing::info!(
        service_name = config.service_name,
        environment = config.environment,
        otlp_endpoint = ?config.otlp_endpoint,
        "Telemetry initialized"
    );

    Ok(())
}

/// Flush pending spans and shut the tracer provider down.
///
/// Should be called before process exit.
pub fn shutdown() {
    global::shutdown_tracer_provider();
}
