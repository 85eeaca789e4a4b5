use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbellError {
    #[error("Fetch error: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("Unrecognized feed format: {0}")]
    UnrecognizedFeedFormat(String),

    #[error("Unable to parse date: {0:?}")]
    DateParse(String),

    #[error("Notification error: {0}")]
    Notify(#[source] reqwest::Error),

    #[error("Notification rejected: {0}")]
    NotifyStatus(reqwest::StatusCode),

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FeedbellError>;
