//! Project-level client for telemetry discovery
//!
//! The hosted project owns the connection string of its monitoring backend;
//! this client only fetches it so the demo can configure its span exporter.

use serde::Deserialize;
use tracing::info;

use crate::credential::Credential;
use crate::error::Error;
use crate::Result;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionStringResponse {
    connection_string: Option<String>,
}

/// Client for project-scoped endpoints.
pub struct ProjectClient {
    client: reqwest::Client,
    endpoint: String,
    credential: Credential,
}

impl ProjectClient {
    pub fn new(endpoint: impl Into<String>, credential: Credential) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            credential,
        }
    }

    /// Fetch the monitoring backend connection string configured for this
    /// project. Returns `None` when the project has no monitoring resource
    /// attached.
    pub async fn connection_string(&self) -> Result<Option<String>> {
        let mut headers = reqwest::header::HeaderMap::new();
        self.credential.apply(&mut headers)?;

        let resp = self
            .client
            .get(format!("{}/telemetry/connection-string", self.endpoint))
            .headers(headers)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), message));
        }

        let body: ConnectionStringResponse = resp.json().await?;
        let connection_string = body.connection_string.filter(|s| !s.trim().is_empty());
        if connection_string.is_some() {
            info!("Monitoring backend configured for tracing");
        }
        Ok(connection_string)
    }
}
