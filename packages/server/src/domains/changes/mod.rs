//! Weekly changelog domain
//!
//! Everything between "a week identifier and a status label arrive" and
//! "a feed document leaves": week-slug arithmetic, entry extraction from
//! the upstream page, the time-windowed result cache, and feed assembly.

pub mod cache;
pub mod extract;
pub mod feed;
pub mod models;
pub mod service;
pub mod slug;

pub use cache::{InMemoryResultCache, ResultCache};
pub use extract::extract_changes;
pub use feed::{assemble_feed, render_digest_html};
pub use models::{CacheEntry, CacheKey, ChangeItem, FilterLabel, WeekSlug};
pub use service::ChangeFeedService;
