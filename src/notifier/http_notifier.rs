use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

use crate::app::{FeedbellError, Result};
use crate::domain::NormalizedItem;
use crate::fetcher::http_client;
use crate::notifier::Notifier;

/// Posts `"<title>\n\n<link>"` as plain text, the message format accepted
/// by ntfy-style push endpoints.
pub struct HttpNotifier {
    client: Client,
}

impl HttpNotifier {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, endpoint: &str, item: &NormalizedItem) -> Result<()> {
        let message = item.notification_body();

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(message)
            .send()
            .await
            .map_err(FeedbellError::Notify)?;

        if response.status() != StatusCode::OK {
            return Err(FeedbellError::NotifyStatus(response.status()));
        }

        Ok(())
    }
}
