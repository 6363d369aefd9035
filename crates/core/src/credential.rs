//! Credential resolution for the hosted agent service
//!
//! The authentication protocol itself belongs to the remote service; this
//! module only resolves a credential from the local environment and knows how
//! to attach it to outgoing requests.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::Error;
use crate::Result;

/// A resolved credential for the hosted agent service.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Static API key, sent as the `api-key` header
    ApiKey(String),
    /// Pre-issued access token, sent as `Authorization: Bearer`
    BearerToken(String),
}

impl Credential {
    /// Resolve a credential from the environment.
    ///
    /// Checked in order: `AGENT_API_KEY`, then `AGENT_ACCESS_TOKEN`.
    pub fn resolve() -> Result<Self> {
        if let Some(key) = non_empty_var("AGENT_API_KEY") {
            return Ok(Self::ApiKey(key));
        }
        if let Some(token) = non_empty_var("AGENT_ACCESS_TOKEN") {
            return Ok(Self::BearerToken(token));
        }
        Err(Error::Credential(
            "no credential found; set AGENT_API_KEY or AGENT_ACCESS_TOKEN".into(),
        ))
    }

    /// Attach this credential to a header map.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        match self {
            Self::ApiKey(key) => {
                let value = HeaderValue::from_str(key)
                    .map_err(|_| Error::Credential("API key contains invalid characters".into()))?;
                headers.insert("api-key", value);
            }
            Self::BearerToken(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| Error::Credential("token contains invalid characters".into()))?;
                headers.insert(AUTHORIZATION, value);
            }
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
