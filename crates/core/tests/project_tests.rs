//! Integration tests for project telemetry discovery

use at_core::credential::Credential;
use at_core::project::ProjectClient;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_connection_string_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/telemetry/connection-string"))
        .and(header("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connectionString": "InstrumentationKey=abc;IngestionEndpoint=https://ingest.test/"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProjectClient::new(server.uri(), Credential::ApiKey("test-key".into()));
    let cs = client.connection_string().await.unwrap();
    assert_eq!(
        cs.as_deref(),
        Some("InstrumentationKey=abc;IngestionEndpoint=https://ingest.test/")
    );
}

#[tokio::test]
async fn test_missing_monitoring_resource_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/telemetry/connection-string"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ProjectClient::new(server.uri(), Credential::ApiKey("test-key".into()));
    assert!(client.connection_string().await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_connection_string_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/telemetry/connection-string"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connectionString": ""
        })))
        .mount(&server)
        .await;

    let client = ProjectClient::new(server.uri(), Credential::ApiKey("test-key".into()));
    assert!(client.connection_string().await.unwrap().is_none());
}
