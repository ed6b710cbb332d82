//! Explicit AWS SDK configuration for provider clients.
//!
//! Region and credentials resolve into a config value handed to each client
//! constructor; nothing here mutates process-global state, so callers with
//! different regions or profiles can coexist in one process.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Region used when the caller does not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Resolves SDK configuration for the given region and credentials profile.
pub async fn load_sdk_config(region: Option<String>, profile: Option<String>) -> SdkConfig {
    let region = Region::new(region.unwrap_or_else(|| DEFAULT_REGION.to_string()));
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
    if let Some(profile) = profile {
        loader = loader.profile_name(&profile);
    }
    loader.load().await
}
