use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_BASE_URL: &str = "https://www.stephaneplazaimmobilier.com";
const DEFAULT_TOR_PROXY: &str = "socks5h://127.0.0.1:9050";
const DEFAULT_TOR_CONTROL: &str = "127.0.0.1:9051";
const DEFAULT_IP_ECHO: &str = "http://ipecho.net/plain";
const DEFAULT_OUTPUT: &str = "scraping_output.json";
const DEFAULT_LISTINGS_LIMIT: u32 = 100_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// `None` sends requests directly instead of through Tor.
    pub tor_proxy_url: Option<String>,
    pub tor_control_addr: String,
    pub tor_control_password: Option<String>,
    pub ip_echo_url: Option<String>,
    pub listings_page_limit: u32,
    pub output_path: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: var_or("SITE_BASE_URL", DEFAULT_BASE_URL),
            tor_proxy_url: non_empty(var_or("TOR_PROXY_URL", DEFAULT_TOR_PROXY)),
            tor_control_addr: var_or("TOR_CONTROL_ADDR", DEFAULT_TOR_CONTROL),
            tor_control_password: env::var("TOR_CONTROL_PASSWORD").ok(),
            ip_echo_url: non_empty(var_or("IP_ECHO_URL", DEFAULT_IP_ECHO)),
            listings_page_limit: match env::var("LISTINGS_PAGE_LIMIT") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("LISTINGS_PAGE_LIMIT is not a number: {v:?}"))?,
                Err(_) => DEFAULT_LISTINGS_LIMIT,
            },
            output_path: var_or("OUTPUT_PATH", DEFAULT_OUTPUT),
            request_timeout: match env::var("REQUEST_TIMEOUT_SECS") {
                Ok(v) => Some(Duration::from_secs(v.parse().with_context(|| {
                    format!("REQUEST_TIMEOUT_SECS is not a number: {v:?}")
                })?)),
                Err(_) => None,
            },
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}
