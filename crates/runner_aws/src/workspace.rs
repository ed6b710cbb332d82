//! Disposable scratch directories for staging downloaded artifacts.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Directory under the OS temp dir that all workspaces are created in.
pub const WORKSPACE_BASE: &str = "lambda-task-runner";

// In-process tiebreaker for workspaces created within one clock tick.
static WORKSPACE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Creates a uniquely named scratch directory under the fixed base path,
/// creating the base itself when absent.
///
/// The caller owns the directory and removes it when done; nothing here
/// cleans up automatically.
pub fn create_workspace() -> Result<PathBuf, String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|error| format!("failed to read clock for workspace name: {error}"))?
        .as_nanos();

    let seq = WORKSPACE_SEQ.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir()
        .join(WORKSPACE_BASE)
        .join(format!("workspace-{}-{timestamp}-{seq}", std::process::id()));
    fs::create_dir_all(&dir)
        .map_err(|error| format!("failed to create workspace '{}': {error}", dir.display()))?;
    Ok(dir)
}
