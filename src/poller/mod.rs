//! One polling tick over every configured feed.
//!
//! Each feed gets its own unit of work (fetch, normalize, select new items,
//! notify) and all units run concurrently. Every unit borrows its
//! [`FeedDescriptor`] mutably, so a watermark is only ever touched by the
//! unit that owns it. The tick ends once every unit has finished.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::app::Result;
use crate::domain::FeedDescriptor;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::notifier::Notifier;
use crate::watermark::{select_new, ItemOrder};

pub const DEFAULT_WORKERS: usize = 10;

/// Counters for a feed that was processed to the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Entries with a usable date.
    pub items: usize,
    /// Entries dropped because their date did not parse.
    pub skipped_items: usize,
    /// Entries newer than the watermark.
    pub new_items: usize,
    pub notified: usize,
    pub failed_notifications: usize,
}

#[derive(Debug)]
pub struct FeedOutcome {
    pub url: String,
    pub result: Result<FeedStats>,
}

#[derive(Debug)]
pub struct TickReport {
    /// One outcome per feed, in the order the feeds were given.
    pub outcomes: Vec<FeedOutcome>,
    pub elapsed: Duration,
}

impl TickReport {
    pub fn new_items(&self) -> usize {
        self.successes().map(|s| s.new_items).sum()
    }

    pub fn notified(&self) -> usize {
        self.successes().map(|s| s.notified).sum()
    }

    pub fn failed_notifications(&self) -> usize {
        self.successes().map(|s| s.failed_notifications).sum()
    }

    /// Feeds abandoned for this tick.
    pub fn failed_feeds(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    fn successes(&self) -> impl Iterator<Item = &FeedStats> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }
}

pub struct PollCoordinator {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    normalizer: Normalizer,
    semaphore: Semaphore,
    order: ItemOrder,
}

impl PollCoordinator {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self::with_options(fetcher, notifier, DEFAULT_WORKERS, ItemOrder::default())
    }

    /// `workers` caps how many feeds are in flight at once within a tick.
    pub fn with_options(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        workers: usize,
        order: ItemOrder,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            normalizer: Normalizer::new(),
            semaphore: Semaphore::new(workers.max(1)),
            order,
        }
    }

    /// Run one tick over `feeds`, advancing each feed's watermark in place.
    ///
    /// Never fails: every error is logged and recorded in the feed's
    /// outcome, and only that feed is skipped.
    pub async fn run_tick(&self, feeds: &mut [FeedDescriptor]) -> TickReport {
        let start = Instant::now();

        let units = feeds.iter_mut().map(|feed| {
            let span = tracing::info_span!("feed", url = %feed.url);
            self.run_unit(feed).instrument(span)
        });
        let outcomes = join_all(units).await;

        TickReport {
            outcomes,
            elapsed: start.elapsed(),
        }
    }

    async fn run_unit(&self, feed: &mut FeedDescriptor) -> FeedOutcome {
        // The semaphore is never closed, so acquiring only waits for a slot.
        let _permit = self.semaphore.acquire().await.ok();

        let result = self.process_feed(feed).await;
        if let Err(e) = &result {
            tracing::error!("skipping feed this tick: {}", e);
        }

        FeedOutcome {
            url: feed.url.clone(),
            result,
        }
    }

    async fn process_feed(&self, feed: &mut FeedDescriptor) -> Result<FeedStats> {
        tracing::info!("checking feed");

        let body = self.fetcher.fetch(&feed.url).await?;
        let normalized = self.normalizer.normalize(&body)?;

        let mut stats = FeedStats {
            items: normalized.items.len(),
            skipped_items: normalized.skipped,
            ..FeedStats::default()
        };

        let fresh = select_new(feed, normalized.items, self.order);
        stats.new_items = fresh.len();

        for item in &fresh {
            match self.notifier.notify(&feed.notify_endpoint, item).await {
                Ok(()) => {
                    stats.notified += 1;
                    tracing::info!("notification sent:\n\n{}", item.notification_body());
                }
                Err(e) => {
                    stats.failed_notifications += 1;
                    tracing::error!(link = %item.link, "failed to send notification: {}", e);
                }
            }
        }

        Ok(stats)
    }
}
