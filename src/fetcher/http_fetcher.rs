use async_trait::async_trait;
use reqwest::Client;

use crate::app::{FeedbellError, Result};
use crate::fetcher::{http_client, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FeedbellError::Fetch)?;

        tracing::debug!("response status code: {}", response.status());
        response.error_for_status_ref().map_err(FeedbellError::Fetch)?;

        let body = response.bytes().await.map_err(FeedbellError::Fetch)?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::USER_AGENT;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_and_identifies_itself() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<rss></rss>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .fetch(&format!("{}/feed.xml", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(body, b"<rss></rss>");
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_fetch_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(&mock_server.uri()).await;

        assert!(matches!(result, Err(FeedbellError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_fetch_error() {
        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/feed.xml").await;

        assert!(matches!(result, Err(FeedbellError::Fetch(_))));
    }
}
