//! Kernel module - server infrastructure and dependencies.

pub mod fetcher;

pub use fetcher::{FetchError, FetchResult, FetchedPage, HttpPageFetcher, MockPageFetcher, PageFetcher};
