// HTTP routes
pub mod digest;
pub mod feed;
pub mod health;

pub use digest::*;
pub use feed::*;
pub use health::*;
