//! Artifact invoke workflow: locate the function, download and extract its
//! packaged artifact, and invoke the entry point with the supplied event.

use std::fs;
use std::path::Path;

use chrono::Utc;
use runner_core::contract::ValidationError;
use runner_core::handler_id::HandlerId;
use serde_json::{json, Value};

use crate::adapters::artifact::ArtifactFetcher;
use crate::adapters::function_store::FunctionStore;
use crate::adapters::invoker::{HandlerInvoker, InvokeFailure};

/// Staging file name for the downloaded artifact inside the workspace.
pub const ARTIFACT_FILE_NAME: &str = "lambda.zip";

/// Terminal failure of the artifact invoke workflow.
#[derive(Debug)]
pub enum InvokeError {
    /// Metadata lookup or artifact transfer failed.
    Download(String),
    /// The function's handler identifier could not be parsed.
    BadHandler(ValidationError),
    /// The downloaded archive could not be unpacked.
    Extract(String),
    /// The handler itself failed or never completed.
    Invocation(InvokeFailure),
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Download(message) | Self::Extract(message) => f.write_str(message),
            Self::BadHandler(error) => write!(f, "{error}"),
            Self::Invocation(failure) => write!(f, "{failure}"),
        }
    }
}

impl std::error::Error for InvokeError {}

/// Fetches the function's metadata and streams its artifact to `dest`.
///
/// Environment variables declared in the function configuration are applied
/// to the current process environment, so the invoked handler observes the
/// same variables it would see when deployed. This mutation is process-wide.
pub fn download(
    arn: &str,
    dest: &Path,
    functions: &dyn FunctionStore,
    artifacts: &dyn ArtifactFetcher,
) -> Result<HandlerId, InvokeError> {
    let record = functions.describe(arn).map_err(InvokeError::Download)?;
    let handler = record.handler_id().map_err(InvokeError::BadHandler)?;

    for (name, value) in &record.environment {
        std::env::set_var(name, value);
    }

    log_invoke_info(
        "artifact_download_started",
        json!({ "arn": arn, "location": record.code_location }),
    );
    artifacts
        .fetch(&record.code_location, dest)
        .map_err(|error| {
            log_invoke_error("artifact_download_failed", json!({ "message": error }));
            InvokeError::Download(error)
        })?;
    log_invoke_info(
        "artifact_download_finished",
        json!({ "arn": arn, "dest": dest.display().to_string() }),
    );

    Ok(handler)
}

/// Extracts the downloaded zip artifact into `dir`.
///
/// A failure mid-extraction leaves the directory in a partial state; the
/// caller discards the whole workspace on any failure.
pub fn extract(archive_path: &Path, dir: &Path) -> Result<(), InvokeError> {
    let file = fs::File::open(archive_path)
        .map_err(|error| InvokeError::Extract(format!("failed to open artifact archive: {error}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|error| InvokeError::Extract(format!("artifact archive is malformed: {error}")))?;
    archive
        .extract(dir)
        .map_err(|error| InvokeError::Extract(format!("failed to extract artifact archive: {error}")))
}

/// Downloads the function's artifact into `dir`, extracts it, and invokes
/// the entry point with `event`. The caller owns `dir` and removes it.
pub fn invoke(
    event: &Value,
    arn: &str,
    dir: &Path,
    functions: &dyn FunctionStore,
    artifacts: &dyn ArtifactFetcher,
    invoker: &dyn HandlerInvoker,
) -> Result<Value, InvokeError> {
    let archive_path = dir.join(ARTIFACT_FILE_NAME);
    let handler = download(arn, &archive_path, functions, artifacts)?;
    extract(&archive_path, dir)?;

    log_invoke_info(
        "handler_invocation_started",
        json!({ "arn": arn, "handler": handler.to_string() }),
    );
    let result = invoker.invoke(dir, &handler, event).map_err(|failure| {
        log_invoke_error(
            "handler_invocation_failed",
            json!({ "arn": arn, "message": failure.to_string() }),
        );
        InvokeError::Invocation(failure)
    })?;
    log_invoke_info(
        "handler_invocation_finished",
        json!({ "arn": arn, "handler": handler.to_string() }),
    );

    Ok(result)
}

fn log_invoke_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "invoke_workflow",
            "event": event,
            "timestamp": Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_invoke_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "invoke_workflow",
            "level": "error",
            "event": event,
            "timestamp": Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
