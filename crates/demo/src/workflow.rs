//! The traced agent workflow
//!
//! A fixed, linear sequence of service calls, each wrapped in a named span
//! with a small set of attributes. The only branch is the run status check,
//! which is recorded on the span but never aborts the workflow.

use std::path::Path;

use tracing::{field, info_span, warn, Instrument};

use at_core::agent::{
    AgentsClient, FilePurpose, ImageDetail, ListSortOrder, MessageContentBlock, MessageRole,
    RunStatus, ThreadMessage,
};
use at_core::config::AppConfig;
use at_core::Result;

const AGENT_NAME: &str = "my-agent";
const AGENT_INSTRUCTIONS: &str = "You are helpful agent";
const INPUT_MESSAGE: &str = "Hello, what is in the image?";

/// Outcome of one workflow execution.
///
/// All identifiers are handles owned by the remote service; they are reported
/// for display and assertions only.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub agent_id: String,
    pub thread_id: String,
    pub file_id: String,
    pub message_id: String,
    pub run_id: String,
    pub run_status: RunStatus,
    pub run_succeeded: bool,
    pub messages: Vec<ThreadMessage>,
}

impl WorkflowReport {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Execute the full traced workflow.
pub async fn run_workflow(client: &AgentsClient, config: &AppConfig) -> Result<WorkflowReport> {
    let agent = {
        let span = info_span!(
            "create_agent",
            agent.id = field::Empty,
            agent.model = field::Empty,
        );
        let agent = client
            .create_agent(&config.model_deployment, AGENT_NAME, AGENT_INSTRUCTIONS)
            .instrument(span.clone())
            .await?;
        span.record("agent.id", agent.id.as_str());
        span.record("agent.model", config.model_deployment.as_str());
        agent
    };
    println!("Created agent, agent ID: {}", agent.id);

    let thread = {
        let span = info_span!("create_thread", thread.id = field::Empty);
        let thread = client.create_thread().instrument(span.clone()).await?;
        span.record("thread.id", thread.id.as_str());
        thread
    };
    println!("Created thread, thread ID: {}", thread.id);

    let image_file = {
        let span = info_span!("upload_file", file.id = field::Empty, file.path = field::Empty);
        let file = client
            .upload_file(&config.asset_path, FilePurpose::Agents)
            .instrument(span.clone())
            .await?;
        span.record("file.id", file.id.as_str());
        span.record("file.path", config.asset_path.display().to_string().as_str());
        file
    };
    println!("Uploaded file, file ID: {}", image_file.id);

    let message = {
        let span = info_span!(
            "create_message",
            message.id = field::Empty,
            message.content = field::Empty,
        );
        let blocks = vec![
            MessageContentBlock::text(INPUT_MESSAGE),
            MessageContentBlock::image_file(&image_file.id, ImageDetail::High),
        ];
        let message = client
            .create_message(&thread.id, MessageRole::User, &blocks)
            .instrument(span.clone())
            .await?;
        span.record("message.id", message.id.as_str());
        span.record("message.content", INPUT_MESSAGE);
        message
    };
    println!("Created message, message ID: {}", message.id);

    let run = {
        let span = info_span!(
            "run_agent",
            run.id = field::Empty,
            run.status = field::Empty,
            run.success = field::Empty,
        );
        let run = client
            .create_and_poll_run(&thread.id, &agent.id)
            .instrument(span.clone())
            .await?;
        span.record("run.id", run.id.as_str());
        span.record("run.status", run.status.as_str());

        // A failed run is reported, not fatal
        if run.status != RunStatus::Completed {
            println!("The run did not succeed: {}.", run.status.as_str());
            warn!("Run {} finished with status {}", run.id, run.status.as_str());
            span.record("run.success", false);
        } else {
            span.record("run.success", true);
        }
        run
    };

    client.delete_agent(&agent.id).await?;
    println!("Deleted agent");

    let messages = {
        let span = info_span!("retrieve_messages", messages.count = field::Empty);
        let messages = client
            .list_messages(&thread.id, ListSortOrder::Ascending)
            .instrument(span.clone())
            .await?;
        span.record("messages.count", messages.len() as u64);
        messages
    };

    let run_succeeded = run.status == RunStatus::Completed;
    Ok(WorkflowReport {
        agent_id: agent.id,
        thread_id: thread.id,
        file_id: image_file.id,
        message_id: message.id,
        run_id: run.id,
        run_status: run.status,
        run_succeeded,
        messages,
    })
}

/// Print the conversation transcript the way the demo shows it.
pub fn print_transcript(messages: &[ThreadMessage]) {
    for message in messages {
        if let Some(text) = message.last_text() {
            let role = match message.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            println!("{}: {}", role, text);
        }
    }
}

/// Absolute path of a demo asset, resolved against the crate during
/// development and the working directory otherwise.
pub fn resolve_asset_path(path: &Path) -> std::path::PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
