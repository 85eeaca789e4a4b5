use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feed entry reduced to what a notification needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
}

impl NormalizedItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>, published: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            published,
        }
    }

    /// Plain-text notification body: title, a blank line, then the link.
    pub fn notification_body(&self) -> String {
        format!("{}\n\n{}", self.title, self.link)
    }
}
