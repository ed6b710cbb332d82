//! AWS-oriented adapters and workflow handlers for the lambda task runner.
//!
//! This crate owns runtime integration details (function metadata lookup,
//! artifact download, subprocess invocation, ECS task submission) behind
//! narrow seams, and exposes the artifact-invoke and task-start workflows as
//! handler functions over those seams.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod workspace;
