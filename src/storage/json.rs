use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::crawler::models::ScrapeOutput;
use crate::storage::OutputSink;

/// Writes the whole run as one JSON array. Non-ASCII text is kept literal.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OutputSink for JsonFileSink {
    async fn write(&self, output: &ScrapeOutput) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec(output)?;

        fs::write(&self.path, &bytes)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        info!(path = %self.path.display(), agencies = output.len(), "Output written");
        Ok(())
    }
}
