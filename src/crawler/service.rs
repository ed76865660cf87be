use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::info;

use crate::crawler::{self, endpoints::SiteEndpoints, fetcher::Fetcher, models::ScrapeOutput};

pub struct ScrapingService<F> {
    fetcher: F,
    endpoints: SiteEndpoints,
}

impl<F: Fetcher> ScrapingService<F> {
    pub fn new(fetcher: F, endpoints: SiteEndpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Collects every agency of directory pages `1..=pages`, one request at
    /// a time. The first failure aborts the whole run.
    pub async fn run(&self, pages: u32) -> anyhow::Result<ScrapeOutput> {
        let started = Instant::now();
        let mut output = ScrapeOutput::new();

        for page in 1..=pages {
            let agencies = crawler::crawl_directory_page(&self.fetcher, &self.endpoints, page)
                .await
                .with_context(|| format!("directory page {page}"))?;

            info!(page, count = agencies.len(), "Found agencies");

            for stub in &agencies {
                let result = crawler::aggregate_agency(&self.fetcher, &self.endpoints, stub)
                    .await
                    .with_context(|| format!("agency {} on page {page}", stub.id))?;
                output.push(result);
            }
        }

        info!(
            agencies = output.len(),
            elapsed = %format_elapsed(started.elapsed()),
            "DONE: all pages processed"
        );
        Ok(output)
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}
