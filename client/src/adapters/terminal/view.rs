//! HTML snapshot view
//!
//! Keeps the page regions in memory and hands every new version of the
//! page to a background writer, which rewrites a standalone HTML file.
//! Versions produced faster than the file can be written are collapsed
//! into the latest one. Notifications are also echoed to stdout.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;

use tokio::sync::watch;

use crate::domain::entities::{Notification, PostId};
use crate::domain::ports::{Control, FeedView};
use crate::feed::{render_notification, render_page, PageSnapshot};

#[derive(Default)]
struct ViewState {
    page: PageSnapshot,
    notification_id: Option<u64>,
    pending: BTreeSet<String>,
    version: u64,
}

/// A rendered page and its version number
type PageVersion = (u64, String);

pub struct HtmlSnapshotView {
    state: Mutex<ViewState>,
    pages: watch::Sender<PageVersion>,
    written: watch::Receiver<u64>,
}

impl HtmlSnapshotView {
    /// Create the view and spawn its file writer. Must be called from
    /// within a tokio runtime.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        let (pages, page_rx) = watch::channel((0, String::new()));
        let (written_tx, written) = watch::channel(0);
        tokio::spawn(write_pages(output.into(), page_rx, written_tx));

        Self {
            state: Mutex::new(ViewState::default()),
            pages,
            written,
        }
    }

    /// Wait until the latest page version is on disk
    pub async fn flush(&self) {
        let target = self.lock().version;
        let mut written = self.written.clone();
        if written.wait_for(|version| *version >= target).await.is_err() {
            tracing::warn!("Page writer stopped before the snapshot was written");
        }
    }

    /// Current page as it was last rendered
    #[cfg(test)]
    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().page.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply a change to the page and queue the result for writing
    fn update(&self, change: impl FnOnce(&mut ViewState)) {
        let mut state = self.lock();
        change(&mut *state);
        let pending = state.pending.iter().cloned().collect();
        state.page.pending = pending;
        state.version += 1;

        // Sent under the lock so versions reach the writer in order
        self.pages.send_replace((state.version, render_page(&state.page)));
    }
}

/// Write each new page version to `output` until the view is dropped
async fn write_pages(
    output: PathBuf,
    mut pages: watch::Receiver<PageVersion>,
    written: watch::Sender<u64>,
) {
    while pages.changed().await.is_ok() {
        let (version, html) = pages.borrow_and_update().clone();

        if let Err(e) = tokio::fs::write(&output, html).await {
            tracing::warn!(error = %e, path = %output.display(), "Failed to write page snapshot");
        }
        written.send_replace(version);
    }
}

/// Replace the line holding a post's like control
fn splice_like_control(posts: &str, id: PostId, markup: &str) -> Option<String> {
    let marker = format!("<span class=\"like-control\" id=\"like-{}\">", id);
    let mut found = false;
    let lines: Vec<String> = posts
        .lines()
        .map(|line| {
            if !found && line.contains(&marker) {
                found = true;
                let indent = &line[..line.len() - line.trim_start().len()];
                format!("{}{}", indent, markup)
            } else {
                line.to_string()
            }
        })
        .collect();

    if found {
        let mut out = lines.join("\n");
        if posts.ends_with('\n') {
            out.push('\n');
        }
        Some(out)
    } else {
        None
    }
}

impl FeedView for HtmlSnapshotView {
    fn set_admin_mode(&self, admin: bool) {
        self.update(|state| state.page.admin = admin);
    }

    fn render_posts(&self, markup: String) {
        self.update(|state| state.page.posts = markup);
    }

    fn render_stats(&self, markup: String) {
        self.update(|state| state.page.stats = markup);
    }

    fn render_recent_users(&self, markup: String) {
        self.update(|state| state.page.recent_users = markup);
    }

    fn replace_like_control(&self, id: PostId, markup: String) {
        self.update(|state| {
            match splice_like_control(&state.page.posts, id, &markup) {
                Some(posts) => state.page.posts = posts,
                None => tracing::debug!(post_id = %id, "Like control not on page"),
            }
        });
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        self.update(|state| {
            if enabled {
                state.pending.remove(&control.to_string());
            } else {
                state.pending.insert(control.to_string());
            }
        });
    }

    fn show_notification(&self, notification: &Notification) {
        if notification.is_error() {
            eprintln!("{}", notification.message);
        } else {
            println!("{}", notification.message);
        }
        self.update(|state| {
            state.notification_id = Some(notification.id);
            state.page.notification = Some(render_notification(notification));
        });
    }

    fn dismiss_notification(&self, id: u64) {
        self.update(|state| {
            if state.notification_id == Some(id) {
                state.notification_id = None;
                state.page.notification = None;
            }
        });
    }

    /// The terminal has no form to clear; commands carry their own text.
    fn reset_post_form(&self) {
        tracing::debug!("Post form reset");
    }

    /// The terminal has no quick post box; logged for tracing only.
    fn clear_quick_post(&self) {
        tracing::debug!("Quick post box cleared");
    }
}
