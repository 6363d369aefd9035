//! Monitoring backend connection string parsing
//!
//! Connection strings are semicolon-separated `key=value` pairs, e.g.
//! `InstrumentationKey=0000;IngestionEndpoint=https://ingest.example.com/`.
//! Keys are case-insensitive and later duplicates win.

use std::collections::HashMap;

use crate::tracer::TelemetryError;

/// A parsed monitoring backend connection string.
#[derive(Debug, Clone)]
pub struct ConnectionString {
    instrumentation_key: Option<String>,
    ingestion_endpoint: String,
}

impl ConnectionString {
    /// Parse a connection string.
    ///
    /// The ingestion endpoint is required; everything else is optional.
    pub fn parse(raw: &str) -> Result<Self, TelemetryError> {
        if raw.trim().is_empty() {
            return Err(TelemetryError::ConnectionString(
                "connection string is empty".into(),
            ));
        }

        let mut fields: HashMap<String, String> = HashMap::new();
        for pair in raw.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                TelemetryError::ConnectionString(format!("malformed segment: {:?}", pair))
            })?;
            fields.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        let ingestion_endpoint = fields.remove("ingestionendpoint").ok_or_else(|| {
            TelemetryError::ConnectionString("IngestionEndpoint is required".into())
        })?;
        if ingestion_endpoint.is_empty() {
            return Err(TelemetryError::ConnectionString(
                "IngestionEndpoint is empty".into(),
            ));
        }

        Ok(Self {
            instrumentation_key: fields.remove("instrumentationkey"),
            ingestion_endpoint: ingestion_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn instrumentation_key(&self) -> Option<&str> {
        self.instrumentation_key.as_deref()
    }

    pub fn ingestion_endpoint(&self) -> &str {
        &self.ingestion_endpoint
    }

    /// OTLP traces endpoint derived from the ingestion endpoint.
    pub fn traces_endpoint(&self) -> String {
        format!("{}/v1/traces", self.ingestion_endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_connection_string() {
        let cs = ConnectionString::parse(
            "InstrumentationKey=abc-123;IngestionEndpoint=https://ingest.example.com/",
        )
        .unwrap();
        assert_eq!(cs.instrumentation_key(), Some("abc-123"));
        assert_eq!(cs.ingestion_endpoint(), "https://ingest.example.com");
        assert_eq!(cs.traces_endpoint(), "https://ingest.example.com/v1/traces");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let cs = ConnectionString::parse(
            " ingestionendpoint = https://a.test ; INSTRUMENTATIONKEY = k ",
        )
        .unwrap();
        assert_eq!(cs.instrumentation_key(), Some("k"));
        assert_eq!(cs.ingestion_endpoint(), "https://a.test");
    }

    #[test]
    fn test_later_duplicate_wins() {
        let cs = ConnectionString::parse(
            "IngestionEndpoint=https://old.test;IngestionEndpoint=https://new.test",
        )
        .unwrap();
        assert_eq!(cs.ingestion_endpoint(), "https://new.test");
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        assert!(ConnectionString::parse("InstrumentationKey=abc").is_err());
        assert!(ConnectionString::parse("").is_err());
        assert!(ConnectionString::parse("not-a-pair").is_err());
    }
}
