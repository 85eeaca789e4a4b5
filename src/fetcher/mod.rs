pub mod http_fetcher;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{FeedbellError, Result};

/// Overall deadline for a single HTTP request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("feedbell/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by fetching and notification.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(FeedbellError::Client)
}

#[async_trait]
pub trait Fetcher {
    /// Retrieve the raw feed document at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
