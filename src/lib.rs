//! # Feedbell
//!
//! Watches RSS/Atom feeds and pushes a plain-text notification for every
//! item published since the last check.
//!
//! ## Architecture
//!
//! Every tick runs one independent pipeline per feed, all concurrently:
//!
//! ```text
//! Fetcher → Normalizer → Watermark → Notifier
//! ```
//!
//! - [`fetcher`]: HTTP GET with a fixed timeout and User-Agent
//! - [`normalizer`]: RSS/Atom structural parsing and tolerant date parsing
//! - [`watermark`]: per-feed "newer than last notified" filtering
//! - [`notifier`]: plain-text HTTP POST to an ntfy-style endpoint
//! - [`poller`]: the per-tick fan-out and join
//!
//! ## Quick Start
//!
//! ```bash
//! # ~/.config/feedbell/feeds.toml lists feeds and their endpoints
//! feedbell --interval 10m
//!
//! # Single check, JSON logs
//! feedbell --once --log-format json
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the shared HTTP client,
/// fetcher and notifier into a [`PollCoordinator`](poller::PollCoordinator).
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// TOML feed list loading and validation.
pub mod config;

/// The sleep-and-repeat loop around the coordinator, with graceful shutdown.
pub mod daemon;

/// Core domain models.
///
/// - [`FeedDescriptor`](domain::FeedDescriptor): a feed, its endpoint and watermark
/// - [`NormalizedItem`](domain::NormalizedItem): title, link and publish time
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing and normalization.
///
/// Matches a document against RSS 2.0 and then Atom, and maps its entries
/// to [`NormalizedItem`](domain::NormalizedItem)s.
pub mod normalizer;

/// Notification delivery.
///
/// - [`Notifier`](notifier::Notifier): Async trait for delivery
/// - [`HttpNotifier`](notifier::http_notifier::HttpNotifier): reqwest-based implementation
pub mod notifier;

/// One polling tick over all feeds, bounded by a semaphore.
pub mod poller;

/// New-item selection against a feed's watermark.
pub mod watermark;
