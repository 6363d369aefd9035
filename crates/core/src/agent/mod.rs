//! Agent service client and wire models

mod client;
mod models;

pub use client::AgentsClient;
pub use models::{
    Agent, AgentThread, FileInfo, FilePurpose, FileState, ImageDetail, ImageFileParam,
    ImageUrlParam, ListMessagesResponse, ListSortOrder, MessageContent, MessageContentBlock,
    MessageRole, RunError, RunStatus, TextValue, ThreadMessage, ThreadRun,
};
