//! Application layer
//!
//! The feed service and everything it orchestrates: app state, the
//! action vocabulary, notifications and polling.

pub mod action_parser;
pub mod feed_service;
pub mod notifications;
pub mod poller;
pub mod state;

pub use action_parser::{help_text, parse_action, FeedAction};
pub use feed_service::{FeedService, Outcome};
pub use poller::PollHandle;
