//! The outer polling loop.
//!
//! Runs a tick over every feed, sleeps for the configured interval, and
//! repeats. A tick is never interrupted; shutdown requests are honoured
//! between ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::app::AppContext;
use crate::domain::FeedDescriptor;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Pause between the end of one tick and the start of the next
    pub interval: Duration,
    /// Stop after the first tick
    pub run_once: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600), // 10 minutes
            run_once: false,
        }
    }
}

impl DaemonConfig {
    /// Parse interval string like "30s", "10m", "6h", "1d"
    pub fn parse_interval(s: &str) -> Result<Duration, String> {
        let s = s.trim().to_lowercase();

        let scaled = |n: u64, unit: u64| {
            n.checked_mul(unit)
                .ok_or_else(|| "Interval too large".to_string())
        };

        let parsed = if let Some(hours) = s.strip_suffix('h') {
            hours
                .parse::<u64>()
                .map_err(|_| format!("Invalid hours: {}", hours))
                .and_then(|h| scaled(h, 3600))
        } else if let Some(minutes) = s.strip_suffix('m') {
            minutes
                .parse::<u64>()
                .map_err(|_| format!("Invalid minutes: {}", minutes))
                .and_then(|m| scaled(m, 60))
        } else if let Some(days) = s.strip_suffix('d') {
            days.parse::<u64>()
                .map_err(|_| format!("Invalid days: {}", days))
                .and_then(|d| scaled(d, 86400))
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map_err(|_| format!("Invalid seconds: {}", secs))
        } else {
            // Try parsing as raw seconds
            s.parse::<u64>()
                .map_err(|_| format!("Invalid interval: {}. Use format like '30s', '10m', '1h'", s))
        };

        let secs = parsed?;

        if secs == 0 {
            return Err("Interval must be greater than zero".to_string());
        }

        Ok(Duration::from_secs(secs))
    }

    /// Format interval for display
    pub fn format_interval(interval: Duration) -> String {
        let secs = interval.as_secs();
        if secs >= 86400 && secs.is_multiple_of(86400) {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs.is_multiple_of(3600) {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs.is_multiple_of(60) {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

/// Daemon runner
pub struct Daemon {
    ctx: Arc<AppContext>,
    config: DaemonConfig,
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl Daemon {
    pub fn new(ctx: Arc<AppContext>, config: DaemonConfig) -> Self {
        Self {
            ctx,
            config,
            running: Arc::new(AtomicBool::new(true)),
            wake: Arc::new(Notify::new()),
        }
    }

    /// Poll `feeds` until stopped (or once, with `run_once`).
    pub async fn run(&self, feeds: &mut [FeedDescriptor]) {
        if !self.config.run_once {
            self.listen_for_shutdown();
        }

        tracing::info!(
            "feedbell started ({} feeds, interval {})",
            feeds.len(),
            DaemonConfig::format_interval(self.config.interval)
        );

        loop {
            self.run_tick(feeds).await;

            if self.config.run_once || !self.running.load(Ordering::SeqCst) {
                break;
            }

            tracing::info!(
                "sleeping for {}",
                DaemonConfig::format_interval(self.config.interval)
            );
            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {},
                _ = self.wake.notified() => {},
            }

            if !self.running.load(Ordering::SeqCst) {
                break;
            }
        }

        tracing::info!("shutting down");
    }

    /// Run a single tick and log its summary
    async fn run_tick(&self, feeds: &mut [FeedDescriptor]) {
        let report = self.ctx.coordinator.run_tick(feeds).await;

        tracing::info!(
            new_items = report.new_items(),
            notified = report.notified(),
            failed_notifications = report.failed_notifications(),
            failed_feeds = report.failed_feeds(),
            "check complete ({:.1}s)",
            report.elapsed.as_secs_f64()
        );
    }

    /// Stop the loop at the next sleep; an in-flight tick still completes
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.wake.notify_one();
    }

    fn listen_for_shutdown(&self) {
        let running = self.running.clone();
        let wake = self.wake.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                tracing::error!("failed to listen for shutdown signals: {}", e);
                return;
            }
            tracing::info!("shutdown requested, finishing current check");
            running.store(false, Ordering::SeqCst);
            wake.notify_one();
        });
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {},
        _ = sigint.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
