use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_client;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::notifier::http_notifier::HttpNotifier;
use crate::notifier::Notifier;
use crate::poller::{PollCoordinator, DEFAULT_WORKERS};
use crate::watermark::ItemOrder;

pub struct AppContext {
    pub coordinator: PollCoordinator,
}

impl AppContext {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_WORKERS, ItemOrder::default())
    }

    /// Build the HTTP stack from a loaded configuration. `workers` takes
    /// precedence over the value in the file when given.
    pub fn from_config(config: &Config, workers: Option<usize>) -> Result<Self> {
        Self::with_options(workers.unwrap_or(config.workers), config.item_order())
    }

    pub fn with_options(workers: usize, order: ItemOrder) -> Result<Self> {
        // One connection pool for both feed fetches and notifications.
        let client = http_client()?;
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_client(client.clone()));
        let notifier: Arc<dyn Notifier + Send + Sync> =
            Arc::new(HttpNotifier::with_client(client));

        Ok(Self::with_components(fetcher, notifier, workers, order))
    }

    pub fn with_components(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        workers: usize,
        order: ItemOrder,
    ) -> Self {
        Self {
            coordinator: PollCoordinator::with_options(fetcher, notifier, workers, order),
        }
    }
}
