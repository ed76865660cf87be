use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::warn;

use serde_json::Value;

use crate::crawler::models::{AgentRecord, ListingRecord};

/// Size/format token the site appends to every thumbnail URL.
pub const PICTURE_SUFFIX_LEN: usize = 8;

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.title").unwrap());
static EMAIL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("app-obfuscate-email").unwrap());
static SLOT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[slot="content"]"#).unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*$").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("malformed listings payload: {0}")]
pub struct ParseError(#[from] serde_json::Error);

#[derive(Deserialize)]
struct RawListing {
    title: Value,
    name: Value,
    price: Value,
    thumbnails: Vec<String>,
}

/// Staff of an agency profile page.
///
/// Emails and phones live in separate nodes with no link back to their
/// block, so the i-th node is paired with the i-th block. Nodes beyond the
/// number of blocks are ignored.
///
/// A phone slot counts only when its raw text is a non-empty run of digits;
/// blank or whitespace-padded slots are skipped and take no position.
pub fn extract_agents(document: &Html) -> Vec<AgentRecord> {
    let mut agents: Vec<AgentRecord> = document
        .select(&TITLE_SEL)
        .map(|block| {
            // line 0 is the whitespace before the first child
            let text = element_text(block);
            let mut lines = text.split('\n').skip(1).map(clean_field);
            AgentRecord {
                name: lines.next().flatten(),
                job: lines.next().flatten(),
                ..Default::default()
            }
        })
        .collect();

    for (agent, node) in agents.iter_mut().zip(document.select(&EMAIL_SEL)) {
        agent.email = node.value().attr("email").map(str::to_string);
    }

    let phone_slots = document
        .select(&SLOT_SEL)
        .map(element_text)
        .filter(|text| !text.is_empty() && PHONE_RE.is_match(text));

    for (agent, phone) in agents.iter_mut().zip(phone_slots) {
        agent.phone = Some(phone);
    }

    agents
}

/// Listings returned by the per-agency search API, in payload order.
pub fn extract_listings(body: &[u8]) -> Result<Vec<ListingRecord>, ParseError> {
    let raw: Vec<RawListing> = serde_json::from_slice(body)?;

    Ok(raw
        .into_iter()
        .map(|l| ListingRecord {
            title: l.title,
            name: l.name,
            price: l.price,
            picture_urls: l.thumbnails.iter().map(|u| trim_picture_url(u)).collect(),
        })
        .collect())
}

/// Drops the trailing size token from a thumbnail URL.
///
/// URLs too short to carry the token are returned unchanged.
pub fn trim_picture_url(url: &str) -> String {
    match url.char_indices().rev().nth(PICTURE_SUFFIX_LEN - 1) {
        Some((cut, _)) if cut > 0 => url[..cut].to_string(),
        _ => {
            warn!(url, "Picture URL shorter than size token, kept as is");
            url.to_string()
        }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn clean_field(line: &str) -> Option<String> {
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_string())
}
