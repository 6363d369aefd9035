//! Environment-based application configuration

use std::path::PathBuf;

use crate::error::Error;
use crate::Result;

/// Default image shipped with the demo
const DEFAULT_ASSET_PATH: &str = "assets/soi.jpg";

/// Configuration loaded from environment variables.
///
/// `PROJECT_ENDPOINT` and `MODEL_DEPLOYMENT` are required; `ASSET_FILE_PATH`
/// falls back to the bundled demo image.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the hosted agent project
    pub project_endpoint: String,
    /// Model deployment name used when creating agents
    pub model_deployment: String,
    /// Path of the image file uploaded by the demo
    pub asset_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let project_endpoint = require_var("PROJECT_ENDPOINT")?;
        let model_deployment = require_var("MODEL_DEPLOYMENT")?;
        let asset_path = std::env::var("ASSET_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ASSET_PATH));

        Ok(Self {
            // Trailing slashes break joined request paths
            project_endpoint: project_endpoint.trim_end_matches('/').to_string(),
            model_deployment,
            asset_path,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "required environment variable {} is not set",
            name
        ))),
    }
}
