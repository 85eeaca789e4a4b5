use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::daemon::DaemonConfig;

#[derive(Parser, Debug)]
#[command(name = "feedbell")]
#[command(about = "Push a notification for every new RSS/Atom item", long_about = None)]
pub struct Cli {
    /// Path to the feed list (default: ~/.config/feedbell/feeds.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Check interval (e.g., "30s", "20m", "2h", "1d")
    #[arg(short, long, default_value = "10m", value_parser = DaemonConfig::parse_interval)]
    pub interval: Duration,

    /// Number of feeds checked in parallel (overrides the config file)
    #[arg(short, long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Check every feed once and exit
    #[arg(long)]
    pub once: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

fn parse_workers(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("workers must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid worker count: {}", s)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["feedbell"]).unwrap();
        assert_eq!(cli.interval, Duration::from_secs(600));
        assert_eq!(cli.config, None);
        assert_eq!(cli.workers, None);
        assert!(!cli.once);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "feedbell",
            "--config",
            "/tmp/feeds.toml",
            "--interval",
            "30s",
            "--workers",
            "3",
            "--once",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/feeds.toml")));
        assert_eq!(cli.interval, Duration::from_secs(30));
        assert_eq!(cli.workers, Some(3));
        assert!(cli.once);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_bad_interval() {
        assert!(Cli::try_parse_from(["feedbell", "--interval", "soon"]).is_err());
        assert!(Cli::try_parse_from(["feedbell", "--interval", "0m"]).is_err());
    }

    #[test]
    fn test_rejects_zero_workers() {
        assert!(Cli::try_parse_from(["feedbell", "--workers", "0"]).is_err());
        assert!(Cli::try_parse_from(["feedbell", "--workers", "many"]).is_err());
        let cli = Cli::try_parse_from(["feedbell", "-w", "1"]).unwrap();
        assert_eq!(cli.workers, Some(1));
    }
}
