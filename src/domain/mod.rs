pub mod feed;
pub mod item;

pub use feed::FeedDescriptor;
pub use item::NormalizedItem;
