pub mod http_notifier;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::NormalizedItem;

#[async_trait]
pub trait Notifier {
    /// Deliver one notification for `item` to `endpoint`. Best effort: a
    /// failed delivery is reported but never retried.
    async fn notify(&self, endpoint: &str, item: &NormalizedItem) -> Result<()>;
}
