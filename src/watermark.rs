//! New-item detection against a feed's watermark.
//!
//! Items are compared one at a time and the watermark is advanced as soon
//! as a newer item is seen. With [`ItemOrder::AsPublished`] an item listed
//! after a newer one is compared against the already advanced watermark, so
//! feeds that are not oldest-first can hide genuinely new items within a
//! single pass. [`ItemOrder::Chronological`] sorts first to avoid that.

use serde::Deserialize;

use crate::domain::{FeedDescriptor, NormalizedItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOrder {
    /// Scan items in the order the feed lists them.
    #[default]
    AsPublished,
    /// Sort items by publish time, oldest first, before scanning.
    Chronological,
}

/// Return the items newer than the feed's watermark, advancing it in place.
pub fn select_new(
    feed: &mut FeedDescriptor,
    mut items: Vec<NormalizedItem>,
    order: ItemOrder,
) -> Vec<NormalizedItem> {
    if order == ItemOrder::Chronological {
        items.sort_by_key(|item| item.published);
    }

    let mut fresh = Vec::new();
    for item in items {
        if item.published > feed.watermark {
            tracing::debug!(
                "advancing watermark from {} to {}",
                feed.watermark,
                item.published
            );
            feed.watermark = item.published;
            fresh.push(item);
        }
    }

    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn feed_at(watermark: DateTime<Utc>) -> FeedDescriptor {
        FeedDescriptor::new(
            "https://example.com/feed.xml".into(),
            "https://ntfy.example.com/topic".into(),
            watermark,
        )
    }

    fn item(n: u32) -> NormalizedItem {
        NormalizedItem::new(
            format!("Item {}", n),
            format!("https://example.com/{}", n),
            day(n),
        )
    }

    #[test]
    fn test_newer_item_is_selected_and_advances() {
        let mut feed = feed_at(day(1));
        let fresh = select_new(&mut feed, vec![item(2)], ItemOrder::AsPublished);

        assert_eq!(fresh, vec![item(2)]);
        assert_eq!(feed.watermark, day(2));
    }

    #[test]
    fn test_items_at_or_before_watermark_are_dropped() {
        let mut feed = feed_at(day(3));
        let fresh = select_new(&mut feed, vec![item(1), item(3)], ItemOrder::AsPublished);

        assert!(fresh.is_empty());
        assert_eq!(feed.watermark, day(3));
    }

    #[test]
    fn test_chronological_input_selects_every_new_item() {
        let mut feed = feed_at(day(1));
        let fresh = select_new(
            &mut feed,
            vec![item(1), item(2), item(3), item(4)],
            ItemOrder::AsPublished,
        );

        assert_eq!(fresh, vec![item(2), item(3), item(4)]);
        assert_eq!(feed.watermark, day(4));
    }

    #[test]
    fn test_newest_first_input_only_selects_the_newest() {
        let mut feed = feed_at(day(1));
        let fresh = select_new(
            &mut feed,
            vec![item(4), item(3), item(2)],
            ItemOrder::AsPublished,
        );

        assert_eq!(fresh, vec![item(4)]);
        assert_eq!(feed.watermark, day(4));
    }

    #[test]
    fn test_chronological_order_recovers_newest_first_feeds() {
        let mut feed = feed_at(day(1));
        let fresh = select_new(
            &mut feed,
            vec![item(4), item(3), item(2)],
            ItemOrder::Chronological,
        );

        assert_eq!(fresh, vec![item(2), item(3), item(4)]);
        assert_eq!(feed.watermark, day(4));
    }

    #[test]
    fn test_second_pass_over_same_items_selects_nothing() {
        let mut feed = feed_at(day(1));
        let items = vec![item(2), item(3)];

        assert_eq!(select_new(&mut feed, items.clone(), ItemOrder::AsPublished).len(), 2);
        assert!(select_new(&mut feed, items, ItemOrder::AsPublished).is_empty());
        assert_eq!(feed.watermark, day(3));
    }

    #[test]
    fn test_watermark_never_moves_backwards() {
        let mut feed = feed_at(day(5));
        select_new(&mut feed, vec![item(2), item(6), item(3)], ItemOrder::Chronological);
        assert_eq!(feed.watermark, day(6));
    }
}
