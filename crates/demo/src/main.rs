//! Traced agent workflow demo binary
//!
//! Entry point: loads configuration, resolves credentials, wires telemetry to
//! the project's monitoring backend, then runs the fixed workflow once.

use at_core::agent::AgentsClient;
use at_core::config::AppConfig;
use at_core::credential::Credential;
use at_core::project::ProjectClient;
use at_demo::workflow::{print_transcript, resolve_asset_path, run_workflow};
use at_telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env()?;
    config.asset_path = resolve_asset_path(&config.asset_path);
    let credential = Credential::resolve()?;

    println!("Using endpoint: {}", config.project_endpoint);
    println!("Using model: {}", config.model_deployment);

    // Ask the project for its monitoring backend before any spans exist
    let project_client = ProjectClient::new(&config.project_endpoint, credential.clone());
    let telemetry_config = match project_client.connection_string().await? {
        Some(connection_string) => {
            TelemetryConfig::default().with_connection_string(&connection_string)?
        }
        None => {
            eprintln!(
                "Warning: project has no monitoring backend configured. \
                 Set AGENT_TRACE_OTLP_ENDPOINT to export spans."
            );
            TelemetryConfig::default()
        }
    };
    at_telemetry::init(&telemetry_config)?;

    let client = AgentsClient::new(&config.project_endpoint, credential);
    let report = run_workflow(&client, &config).await?;

    print_transcript(&report.messages);
    println!("\nTracing complete. View traces in the monitoring backend.");

    at_telemetry::shutdown();
    Ok(())
}
