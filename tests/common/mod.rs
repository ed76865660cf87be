#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use agency_scraper::crawler::endpoints::SiteEndpoints;
use agency_scraper::crawler::fetcher::{build_client, AnonymizedFetcher, FetchError, IdentityRotator};
use agency_scraper::crawler::service::ScrapingService;
use async_trait::async_trait;
use serde_json::{json, Value};

#[derive(Default)]
pub struct CountingRotator {
    rotations: AtomicUsize,
}

impl CountingRotator {
    pub fn count(&self) -> usize {
        self.rotations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityRotator for CountingRotator {
    async fn rotate(&self) -> Result<(), FetchError> {
        self.rotations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub type TestService = ScrapingService<AnonymizedFetcher<CountingRotator>>;

pub fn service(base_url: &str) -> TestService {
    let fetcher = AnonymizedFetcher::new(
        build_client(None, None).unwrap(),
        CountingRotator::default(),
        None,
    );
    ScrapingService::new(fetcher, SiteEndpoints::new(base_url, 100_000))
}

pub fn agency_stub(base_url: &str, id: u64, name: &str) -> Value {
    json!({
        "real_estate_agency_id": id,
        "real_estate_agency_reference": format!("REF{id}"),
        "real_estate_agency_url": format!("agence-{id}"),
        "url": format!("{base_url}/agence/{id}"),
        "real_estate_agency_name": name,
        "real_estate_agency_address": "3 place Bellecour",
        "real_estate_agency_zip_code": "69002",
        "real_estate_agency_city": "Lyon",
        "real_estate_agency_contact_name": "Moreau",
        "real_estate_agency_contact_firstname": "Zoé",
        "real_estate_agency_email": format!("agence{id}@example.test"),
        "real_estate_agency_phone": "0472000000"
    })
}

pub fn directory(stubs: Vec<Value>) -> Value {
    json!({ "agencies": { "data": stubs } })
}

/// Two staff blocks: a complete one and one with only a name line.
pub fn profile_html() -> &'static str {
    r#"<!doctype html>
<html><body>
  <section class="team">
    <div class="title">
      Julien Girard
      Responsable d'agence
    </div>
    <div class="title">
      Inès Petit</div>
  </section>
  <app-obfuscate-email email="julien.girard@example.test"></app-obfuscate-email>
  <div slot="content">0611223344</div>
</body></html>"#
}

pub fn listings(count: usize) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "title": format!("Appartement {i} pièces"),
                "name": format!("Lot {i}"),
                "price": 150_000 + i * 1_000,
                "thumbnails": [
                    format!("https://cdn.example.test/ads/{i}/a_800.jpg"),
                    format!("https://cdn.example.test/ads/{i}/b_800.jpg"),
                ]
            })
        })
        .collect();
    Value::Array(items)
}
