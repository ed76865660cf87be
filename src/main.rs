use agency_scraper::config::Config;
use agency_scraper::crawler::endpoints::SiteEndpoints;
use agency_scraper::crawler::fetcher::{self, AnonymizedFetcher};
use agency_scraper::crawler::service::ScrapingService;
use agency_scraper::crawler::tor::TorController;
use agency_scraper::storage::{json::JsonFileSink, OutputSink};
use agency_scraper::telemetry;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of directory pages to scrape (ten agencies per page)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    telemetry::init_telemetry();

    let cfg = Config::from_env()?;
    info!(pages = cli.pages, base_url = %cfg.base_url, "Starting scrape");

    let client = fetcher::build_client(cfg.tor_proxy_url.as_deref(), cfg.request_timeout)?;
    let tor = TorController::new(cfg.tor_control_addr.clone(), cfg.tor_control_password.clone());
    let fetcher = AnonymizedFetcher::new(client, tor, cfg.ip_echo_url.clone());

    let service = ScrapingService::new(
        fetcher,
        SiteEndpoints::new(&cfg.base_url, cfg.listings_page_limit),
    );
    let output = service.run(cli.pages).await?;

    JsonFileSink::new(&cfg.output_path).write(&output).await?;

    Ok(())
}
