//! Domain entities
//!
//! Plain data models for the feed: posts, user summaries and the viewer's session,
//! plus the notifications shown to them.

pub mod notification;
pub mod post;
pub mod session;
pub mod user;

pub use notification::{Notification, NotificationKind};
pub use post::{FeedStats, LikeAction, LikeState, Post, PostDraft, PostId, Role};
pub use session::Session;
pub use user::UserSummary;
