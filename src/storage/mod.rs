use async_trait::async_trait;

use crate::crawler::models::ScrapeOutput;

pub mod json;

/// Destination of a finished run.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn write(&self, output: &ScrapeOutput) -> anyhow::Result<()>;
}
