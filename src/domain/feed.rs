use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured feed together with its notification target and watermark.
///
/// The watermark is the publish time of the most recently notified item.
/// It starts at the moment the descriptor is created and only moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    pub url: String,
    pub notify_endpoint: String,
    pub watermark: DateTime<Utc>,
}

impl FeedDescriptor {
    pub fn new(url: String, notify_endpoint: String, watermark: DateTime<Utc>) -> Self {
        Self {
            url,
            notify_endpoint,
            watermark,
        }
    }
}
