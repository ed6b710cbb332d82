use std::fs;
use std::path::Path;

/// Streams a packaged artifact from its provider-hosted location to disk.
pub trait ArtifactFetcher {
    fn fetch(&self, location: &str, dest: &Path) -> Result<(), String>;
}

/// Downloads artifacts over HTTPS with a blocking client.
///
/// Downloads carry no deadline: the presigned artifact URL can point at a
/// bundle of any size, so the transfer runs until the stream ends or fails.
/// The client lives entirely inside the blocking section so it can be used
/// from async callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpArtifactFetcher;

impl ArtifactFetcher for HttpArtifactFetcher {
    fn fetch(&self, location: &str, dest: &Path) -> Result<(), String> {
        let location = location.to_string();
        let dest = dest.to_path_buf();

        tokio::task::block_in_place(move || {
            let client = reqwest::blocking::Client::builder()
                .timeout(None)
                .build()
                .map_err(|error| format!("failed to build artifact http client: {error}"))?;

            let mut response = client
                .get(&location)
                .send()
                .map_err(|error| format!("failed to request artifact: {error}"))?
                .error_for_status()
                .map_err(|error| format!("artifact request was rejected: {error}"))?;

            let mut file = fs::File::create(&dest)
                .map_err(|error| format!("failed to create artifact file: {error}"))?;
            response
                .copy_to(&mut file)
                .map_err(|error| format!("failed to stream artifact to disk: {error}"))?;
            Ok(())
        })
    }
}
