//! Traced agent workflow demo
//!
//! Drives the fixed create-agent/run/retrieve workflow against the hosted
//! service, wrapping each step in a named tracing span.

pub mod workflow;

pub use workflow::{run_workflow, WorkflowReport};
