use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Proxy};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("tor control connection failed: {0}")]
    Control(#[from] std::io::Error),
    #[error("tor control rejected `{command}`: {reply}")]
    ControlRejected { command: String, reply: String },
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|source| FetchError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// Switches the network identity used for the next request.
#[async_trait]
pub trait IdentityRotator: Send + Sync {
    async fn rotate(&self) -> Result<(), FetchError>;
}

pub fn build_client(proxy_url: Option<&str>, timeout: Option<Duration>) -> Result<Client, FetchError> {
    // no idle connections: a pooled stream would keep the previous circuit
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(0);

    if let Some(proxy_url) = proxy_url {
        builder = builder.proxy(Proxy::all(proxy_url)?);
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// HTTP fetcher whose identity is rotated after every request.
pub struct AnonymizedFetcher<R> {
    client: Client,
    rotator: R,
    ip_echo_url: Option<String>,
}

impl<R: IdentityRotator> AnonymizedFetcher<R> {
    pub fn new(client: Client, rotator: R, ip_echo_url: Option<String>) -> Self {
        Self {
            client,
            rotator,
            ip_echo_url,
        }
    }

    pub fn rotator(&self) -> &R {
        &self.rotator
    }

    /// Runs `call` on the current identity, then rotates it whatever the
    /// outcome. A failed rotation overrides the call's result.
    pub async fn with_identity<T, F, Fut>(&self, call: F) -> Result<T, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let outcome = call().await;

        if let Err(err) = self.rotator.rotate().await {
            if let Err(call_err) = &outcome {
                warn!(error = %call_err, "Request failed before identity rotation");
            }
            return Err(err);
        }

        outcome
    }

    async fn egress_ip(&self) -> Option<String> {
        let echo_url = self.ip_echo_url.as_deref()?;
        let lookup = async { self.client.get(echo_url).send().await?.text().await };

        match lookup.await {
            Ok(ip) => Some(ip.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "Egress IP lookup failed");
                None
            }
        }
    }
}

#[async_trait]
impl<R: IdentityRotator> Fetcher for AnonymizedFetcher<R> {
    async fn fetch(&self, url: &str) -> Result<RawResponse, FetchError> {
        self.with_identity(|| async move {
            let egress_ip = self.egress_ip().await;
            info!(
                url,
                egress_ip = egress_ip.as_deref().unwrap_or("unknown"),
                "Fetching"
            );

            let res = self.client.get(url).send().await?;
            let status = res.status().as_u16();
            debug!(url, status, "Response received");

            Ok::<_, FetchError>(RawResponse {
                url: url.to_string(),
                status,
                body: res.bytes().await?,
            })
        })
        .await
    }
}
