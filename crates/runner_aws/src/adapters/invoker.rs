use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use runner_core::handler_id::HandlerId;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

/// Invokes an extracted handler entry point with an event payload.
pub trait HandlerInvoker {
    fn invoke(&self, dir: &Path, handler: &HandlerId, event: &Value)
        -> Result<Value, InvokeFailure>;
}

/// Terminal failure of a handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeFailure {
    /// The handler signalled completion with a non-null error value.
    Handler(Value),
    /// The invocation machinery failed before a completion signal arrived.
    Runtime(String),
    /// The handler did not complete within the allowed duration.
    Timeout(Duration),
}

impl std::fmt::Display for InvokeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handler(Value::String(message)) => f.write_str(message),
            Self::Handler(value) => write!(f, "{value}"),
            Self::Runtime(message) => f.write_str(message),
            Self::Timeout(allowed) => {
                write!(f, "handler did not complete within {}s", allowed.as_secs())
            }
        }
    }
}

impl std::error::Error for InvokeFailure {}

/// Completion signal a handler process writes to stdout: at most one of
/// `error` and `result`, mirroring the two-argument callback convention the
/// packaged artifacts were built against.
#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    #[serde(default)]
    error: Value,
    #[serde(default)]
    result: Value,
}

/// Runs handler modules as subprocesses.
///
/// The module segment of the handler id names an executable inside the
/// extraction directory and the export segment is passed as its only
/// argument. The event is written to stdin as JSON; the process answers with
/// one completion envelope on stdout. Handler stderr passes through to the
/// caller's stderr.
#[derive(Debug, Clone, Copy)]
pub struct ProcessInvoker {
    timeout: Duration,
}

impl ProcessInvoker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl HandlerInvoker for ProcessInvoker {
    fn invoke(
        &self,
        dir: &Path,
        handler: &HandlerId,
        event: &Value,
    ) -> Result<Value, InvokeFailure> {
        let program = dir.join(&handler.module);
        if !program.exists() {
            return Err(InvokeFailure::Runtime(format!(
                "handler module '{}' not found in the extracted artifact",
                handler.module
            )));
        }

        let payload = serde_json::to_vec(event)
            .map_err(|error| InvokeFailure::Runtime(format!("failed to encode event: {error}")))?;
        let allowed = self.timeout;
        let export = handler.export.clone();
        let workdir = dir.to_path_buf();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let mut child = tokio::process::Command::new(&program)
                    .arg(&export)
                    .current_dir(&workdir)
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::inherit())
                    .kill_on_drop(true)
                    .spawn()
                    .map_err(|error| {
                        InvokeFailure::Runtime(format!("failed to spawn handler process: {error}"))
                    })?;

                if let Some(mut stdin) = child.stdin.take() {
                    // A handler that never reads its event may close stdin
                    // early; its exit status and envelope carry the outcome.
                    let _ = stdin.write_all(&payload).await;
                }

                match tokio::time::timeout(allowed, child.wait_with_output()).await {
                    Ok(result) => result.map_err(|error| {
                        InvokeFailure::Runtime(format!("failed to collect handler output: {error}"))
                    }),
                    Err(_) => Err(InvokeFailure::Timeout(allowed)),
                }
            })
        })?;

        if !output.status.success() {
            return Err(InvokeFailure::Runtime(format!(
                "handler process exited with {}",
                output.status
            )));
        }

        let envelope: CompletionEnvelope =
            serde_json::from_slice(&output.stdout).map_err(|error| {
                InvokeFailure::Runtime(format!(
                    "handler produced a malformed completion envelope: {error}"
                ))
            })?;

        if !envelope.error.is_null() {
            return Err(InvokeFailure::Handler(envelope.error));
        }
        Ok(envelope.result)
    }
}
