//! Core library for agent-trace
//!
//! This crate contains the client surface for the hosted agent service:
//! - Typed models for agents, threads, files, messages, and runs
//! - The agents HTTP client
//! - Project-level telemetry discovery
//! - Environment configuration and credential resolution

pub mod agent;
pub mod config;
pub mod credential;
pub mod error;
pub mod project;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
