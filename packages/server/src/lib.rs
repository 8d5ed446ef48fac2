// Weekly Changelog Feed - API Core
//
// This crate republishes a third-party weekly changelog (published at a
// date-derived URL with no native feed) as an RSS feed or HTML digest,
// filtered by status label.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
