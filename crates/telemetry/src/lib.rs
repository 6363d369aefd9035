//! Telemetry setup for agent-trace
//!
//! Parses monitoring backend connection strings and wires the tracing
//! subscriber to an OTLP span exporter.

mod connection_string;
mod tracer;

pub use connection_string::ConnectionString;
pub use tracer::{init, shutdown, TelemetryConfig, TelemetryError};
