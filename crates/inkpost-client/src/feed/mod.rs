//! Home feed: a page of recommended or searched posts plus the most-liked
//! sidebar, served live when possible and from the bundled dataset
//! otherwise.

pub mod composer;
pub mod controller;
pub mod fallback;
pub mod source;

pub use composer::{FeedComposer, FeedOrigin, FeedViewModel};
pub use controller::{FeedController, FeedState};
pub use fallback::FallbackSource;
pub use source::{ApiSource, PostSource};
