//! Task start workflow: validate the event, capture the function's declared
//! environment, build the task-run request, and submit it.

use runner_core::contract::{env_pairs, TaskStartRequest, ValidationError};
use runner_core::run_request::build_task_run_request;
use serde_json::Value;

use crate::adapters::function_store::FunctionStore;
use crate::adapters::task_runner::TaskRunner;

/// Environment variable the current region is read from at build time; its
/// value ends up in the launched container's invoke command.
pub const REGION_ENV_VAR: &str = "AWS_REGION";

/// Terminal failure of the task start workflow.
#[derive(Debug)]
pub enum TaskStartError {
    /// The event failed input validation; no provider call was made.
    Invalid(ValidationError),
    /// A provider call failed after validation passed.
    Provider(String),
}

impl std::fmt::Display for TaskStartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(error) => write!(f, "{}: {}", error.code(), error.message()),
            Self::Provider(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for TaskStartError {}

/// Starts one containerized task for the referenced function.
///
/// The launched container re-invokes the function with the validated input
/// and the environment variables the function declares, so the task behaves
/// like the function would, minus the platform's execution limits.
pub fn handle_task_start(
    event: &Value,
    functions: &dyn FunctionStore,
    tasks: &dyn TaskRunner,
) -> Result<Value, TaskStartError> {
    let request = TaskStartRequest::from_event(event).map_err(TaskStartError::Invalid)?;

    let variables = functions
        .environment(&request.arn)
        .map_err(TaskStartError::Provider)?;
    let region = std::env::var(REGION_ENV_VAR).unwrap_or_default();

    let run_request = build_task_run_request(&request, env_pairs(&variables), &region);
    tasks.run_task(&run_request).map_err(TaskStartError::Provider)
}
