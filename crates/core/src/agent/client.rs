//! HTTP client for the hosted agent service
//!
//! Thin call-through to the remote REST surface; all entity lifecycles are
//! owned by the service and the client only carries identifiers forward.

use std::path::Path;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::credential::Credential;
use crate::error::Error;
use crate::Result;

use super::models::{
    Agent, AgentThread, FileInfo, FilePurpose, ListMessagesResponse, ListSortOrder,
    MessageContentBlock, MessageRole, ThreadMessage, ThreadRun,
};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct CreateAgentRequest<'a> {
    model: &'a str,
    name: &'a str,
    instructions: &'a str,
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    role: MessageRole,
    content: &'a [MessageContentBlock],
}

#[derive(Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

/// Client for the hosted agent service.
pub struct AgentsClient {
    client: Client,
    endpoint: String,
    credential: Credential,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl AgentsClient {
    /// Create a new client against the given project endpoint.
    pub fn new(endpoint: impl Into<String>, credential: Credential) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            credential,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Override the run polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the run polling timeout
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Base endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create an agent backed by the given model deployment.
    pub async fn create_agent(&self, model: &str, name: &str, instructions: &str) -> Result<Agent> {
        let req = CreateAgentRequest {
            model,
            name,
            instructions,
        };
        let resp = self
            .client
            .post(format!("{}/assistants", self.endpoint))
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await?;
        let agent: Agent = parse_response(resp).await?;
        info!("Created agent {}", agent.id);
        Ok(agent)
    }

    /// Delete an agent.
    pub async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(format!("{}/assistants/{}", self.endpoint, agent_id))
            .headers(self.headers()?)
            .send()
            .await?;
        check_status(resp).await?;
        info!("Deleted agent {}", agent_id);
        Ok(())
    }

    /// Create an empty conversation thread.
    pub async fn create_thread(&self) -> Result<AgentThread> {
        let resp = self
            .client
            .post(format!("{}/threads", self.endpoint))
            .headers(self.headers()?)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let thread: AgentThread = parse_response(resp).await?;
        info!("Created thread {}", thread.id);
        Ok(thread)
    }

    /// Upload a local file to the service.
    pub async fn upload_file(&self, path: &Path, purpose: FilePurpose) -> Result<FileInfo> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.bin".to_string());

        let form = Form::new()
            .text("purpose", purpose.as_str())
            .part("file", Part::bytes(bytes).file_name(filename));

        let resp = self
            .client
            .post(format!("{}/files", self.endpoint))
            .headers(self.headers()?)
            .multipart(form)
            .send()
            .await?;
        let file: FileInfo = parse_response(resp).await?;
        info!("Uploaded file {} ({} bytes)", file.id, file.bytes);
        Ok(file)
    }

    /// Post a message composed of content blocks to a thread.
    pub async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &[MessageContentBlock],
    ) -> Result<ThreadMessage> {
        let req = CreateMessageRequest { role, content };
        let resp = self
            .client
            .post(format!("{}/threads/{}/messages", self.endpoint, thread_id))
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await?;
        let message: ThreadMessage = parse_response(resp).await?;
        info!("Created message {}", message.id);
        Ok(message)
    }

    /// Start a run of an agent over a thread.
    pub async fn create_run(&self, thread_id: &str, agent_id: &str) -> Result<ThreadRun> {
        let req = CreateRunRequest {
            assistant_id: agent_id,
        };
        let resp = self
            .client
            .post(format!("{}/threads/{}/runs", self.endpoint, thread_id))
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Fetch the current state of a run.
    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun> {
        let resp = self
            .client
            .get(format!(
                "{}/threads/{}/runs/{}",
                self.endpoint, thread_id, run_id
            ))
            .headers(self.headers()?)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// Start a run and poll it until the service reports a terminal status.
    pub async fn create_and_poll_run(&self, thread_id: &str, agent_id: &str) -> Result<ThreadRun> {
        let mut run = self.create_run(thread_id, agent_id).await?;
        info!("Created run {}, polling for completion", run.id);

        let deadline = tokio::time::Instant::now() + self.poll_timeout;
        while !run.status.is_terminal() {
            if tokio::time::Instant::now() >= deadline {
                warn!("Run {} still {:?} at poll timeout", run.id, run.status);
                return Err(Error::RunTimeout {
                    run_id: run.id,
                    seconds: self.poll_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
            run = self.get_run(thread_id, &run.id).await?;
            debug!("Run {} status: {:?}", run.id, run.status);
        }

        Ok(run)
    }

    /// List the messages of a thread.
    pub async fn list_messages(
        &self,
        thread_id: &str,
        order: ListSortOrder,
    ) -> Result<Vec<ThreadMessage>> {
        let resp = self
            .client
            .get(format!("{}/threads/{}/messages", self.endpoint, thread_id))
            .query(&[("order", order.as_str())])
            .headers(self.headers()?)
            .send()
            .await?;
        let listing: ListMessagesResponse = parse_response(resp).await?;
        Ok(listing.data)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.credential.apply(&mut headers)?;
        Ok(headers)
    }
}

/// Turn a non-2xx response into an Api error carrying the body text.
async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(Error::api(status.as_u16(), message))
}

async fn parse_response<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let resp = check_status(resp).await?;
    let body = resp.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| Error::InvalidResponse(format!("{} in body: {}", e, truncate(&body, 256))))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
