//! Render surface and prompt ports
//!
//! `FeedView` receives finished markup for each page region. It is
//! synchronous: regions are swapped in place, nothing waits on I/O.

use async_trait::async_trait;

use crate::domain::entities::{Notification, PostId};

/// An interactive control that is disabled while its request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    PostForm,
    QuickPost,
    Like(PostId),
    Delete(PostId),
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::PostForm => write!(f, "post-form"),
            Control::QuickPost => write!(f, "quick-post"),
            Control::Like(id) => write!(f, "like-{}", id),
            Control::Delete(id) => write!(f, "delete-{}", id),
        }
    }
}

/// Where rendered markup goes
pub trait FeedView: Send + Sync {
    /// Show or hide the admin-only regions (stats, recent users, quick post)
    fn set_admin_mode(&self, admin: bool);

    fn render_posts(&self, markup: String);

    fn render_stats(&self, markup: String);

    fn render_recent_users(&self, markup: String);

    /// Swap the like control of a single post
    fn replace_like_control(&self, id: PostId, markup: String);

    fn set_control_enabled(&self, control: Control, enabled: bool);

    fn show_notification(&self, notification: &Notification);

    /// Remove the notification with this id, if it is still shown
    fn dismiss_notification(&self, id: u64);

    /// Close and reset the post form after a successful submit
    fn reset_post_form(&self);

    fn clear_quick_post(&self);
}

/// Asks the user to confirm a destructive action
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}
