//! Provider-independent task runner contracts.
//!
//! This crate owns input validation, handler identifiers, and the task-run
//! request shape shared by the artifact-invoke and task-start workflows. It
//! intentionally excludes AWS SDK and runtime concerns.

pub mod contract;
pub mod handler_id;
pub mod run_request;
