//! Feed module
//!
//! HTML rendering of the feed page, plus a plain-text digest for the terminal.

pub mod renderer;

pub use renderer::{
    render_like_control, render_load_error, render_notification, render_page, render_posts,
    render_recent_users, render_stats, render_summary, PageSnapshot,
};
