use crate::crawler::models::Scalar;

/// URL templates of the brokerage site.
#[derive(Debug, Clone)]
pub struct SiteEndpoints {
    base_url: String,
    listings_page_limit: u32,
}

impl SiteEndpoints {
    pub fn new(base_url: &str, listings_page_limit: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            listings_page_limit,
        }
    }

    /// Agency directory page, 1-based, with no location filter.
    pub fn directory_page(&self, page: u32) -> String {
        format!("{}/agencies/search?page={}&location=", self.base_url, page)
    }

    /// All listings of one agency in a single oversized page.
    pub fn agency_listings(&self, agency_id: &Scalar) -> String {
        format!(
            "{}/search/all?target=all&agency_id={}&sort=&markers=true&limit={}&page=0",
            self.base_url, agency_id, self.listings_page_limit
        )
    }
}
