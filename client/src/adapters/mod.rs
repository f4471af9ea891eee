//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod http;
pub mod terminal;

pub use http::HttpFeedApi;
pub use terminal::{HtmlSnapshotView, InputLines, PromptConfirm};
