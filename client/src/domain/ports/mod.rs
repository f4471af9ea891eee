//! Domain ports (traits)
//!
//! Port traits define what the feed controller needs from the outside world.
//! Adapters provide concrete implementations of these traits.

pub mod api;
pub mod view;

pub use api::{ApiResponse, FeedApi, LikeResponse};
pub use view::{Confirm, Control, FeedView};
