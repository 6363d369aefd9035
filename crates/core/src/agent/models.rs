//! Wire models for the hosted agent service
//!
//! Every entity here is owned by the remote service; the identifiers are
//! opaque handles held only for the duration of one workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remote conversational agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: Option<String>,
    pub model: String,
    pub instructions: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// A remote conversation container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentThread {
    pub id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

/// Purpose of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    Agents,
    AssistantsOutput,
    Vision,
}

impl FilePurpose {
    /// Wire value sent in the multipart upload form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::AssistantsOutput => "assistants_output",
            Self::Vision => "vision",
        }
    }
}

/// Processing state of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Uploaded,
    Processed,
    Error,
}

/// Metadata for a file held by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    pub filename: String,
    pub bytes: u64,
    pub purpose: FilePurpose,
    #[serde(default)]
    pub status: Option<FileState>,
}

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Sort order for message listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSortOrder {
    Ascending,
    Descending,
}

impl ListSortOrder {
    /// Wire value used as the `order` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Image fidelity requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Auto,
    Low,
    High,
}

/// Reference to an uploaded image file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFileParam {
    pub file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

/// Reference to an externally hosted image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlParam {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

/// One block of user-supplied message content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContentBlock {
    Text { text: String },
    ImageFile { image_file: ImageFileParam },
    ImageUrl { image_url: ImageUrlParam },
}

impl MessageContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_file(file_id: impl Into<String>, detail: ImageDetail) -> Self {
        Self::ImageFile {
            image_file: ImageFileParam {
                file_id: file_id.into(),
                detail: Some(detail),
            },
        }
    }

    pub fn image_url(url: impl Into<String>, detail: ImageDetail) -> Self {
        Self::ImageUrl {
            image_url: ImageUrlParam {
                url: url.into(),
                detail: Some(detail),
            },
        }
    }
}

/// Text content returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
}

/// One block of message content returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextValue },
    ImageFile { image_file: ImageFileParam },
}

/// A message stored in a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl ThreadMessage {
    /// The text of the last content block, if it is textual.
    pub fn last_text(&self) -> Option<&str> {
        match self.content.last()? {
            MessageContent::Text { text } => Some(&text.value),
            _ => None,
        }
    }
}

/// Envelope returned by the message listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListMessagesResponse {
    pub data: Vec<ThreadMessage>,
}

/// Status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
}

impl RunStatus {
    /// Whether the remote service will make no further progress on the run.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Queued | Self::InProgress | Self::RequiresAction | Self::Cancelling
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }
}

/// Error detail attached to a failed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// An execution of an agent over a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRun {
    pub id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_terminality() {
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::InProgress.is_terminal());
        assert!(!RunStatus::RequiresAction.is_terminal());
        assert!(!RunStatus::Cancelling.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(RunStatus::Expired.is_terminal());
    }

    #[test]
    fn test_content_block_serialization() {
        let block = MessageContentBlock::image_file("file-123", ImageDetail::High);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "image_file");
        assert_eq!(json["image_file"]["file_id"], "file-123");
        assert_eq!(json["image_file"]["detail"], "high");

        let block = MessageContentBlock::text("hello");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn test_thread_message_last_text() {
        let message: ThreadMessage = serde_json::from_value(serde_json::json!({
            "id": "msg-1",
            "thread_id": "thread-1",
            "role": "assistant",
            "created_at": 1700000000,
            "content": [
                {"type": "image_file", "image_file": {"file_id": "file-1"}},
                {"type": "text", "text": {"value": "It is a picture of a nebula."}}
            ]
        }))
        .unwrap();

        assert_eq!(message.last_text(), Some("It is a picture of a nebula."));
    }

    #[test]
    fn test_run_status_deserialization() {
        let run: ThreadRun = serde_json::from_value(serde_json::json!({
            "id": "run-1",
            "thread_id": "thread-1",
            "assistant_id": "asst-1",
            "status": "in_progress"
        }))
        .unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(run.last_error.is_none());
    }
}
