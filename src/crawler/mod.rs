use anyhow::Context;
use scraper::Html;
use tracing::{debug, info};

use crate::crawler::endpoints::SiteEndpoints;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::models::{AgencyResult, AgencyStub, DirectoryPage};

pub mod endpoints;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod service;
pub mod tor;

/// Agencies listed on one directory page, in page order.
pub async fn crawl_directory_page(
    fetcher: &dyn Fetcher,
    endpoints: &SiteEndpoints,
    page: u32,
) -> anyhow::Result<Vec<AgencyStub>> {
    let url = endpoints.directory_page(page);
    debug!(page, "Fetching directory page");

    let res = fetcher.fetch(&url).await?;
    let directory: DirectoryPage = res.json()?;

    Ok(directory.agencies.data)
}

/// Staff and listings of one agency merged with its directory metadata.
pub async fn aggregate_agency(
    fetcher: &dyn Fetcher,
    endpoints: &SiteEndpoints,
    stub: &AgencyStub,
) -> anyhow::Result<AgencyResult> {
    info!(
        agency = stub.name.as_deref().unwrap_or("<unnamed>"),
        id = %stub.id,
        "Collecting agency"
    );

    let profile = fetcher
        .fetch(&stub.profile_url)
        .await
        .context("failed to fetch agency profile")?;
    // Html is !Send, keep it out of scope before the next await
    let agents = parser::extract_agents(&Html::parse_document(&profile.text()));

    let listings_res = fetcher
        .fetch(&endpoints.agency_listings(&stub.id))
        .await
        .context("failed to fetch agency listings")?;
    let listings = parser::extract_listings(&listings_res.body)
        .with_context(|| format!("bad listings payload from {}", listings_res.url))?;

    debug!(
        agents = agents.len(),
        listings = listings.len(),
        "Agency collected"
    );

    Ok(AgencyResult::new(stub, agents, listings))
}
