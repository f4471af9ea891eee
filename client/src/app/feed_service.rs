//! Feed service
//!
//! Mediates every user action into backend calls and re-renders the
//! affected page regions. Failures never escape: each one becomes a
//! notification (or the inline retry control for the post list) plus an
//! `Outcome` for the caller.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::app::action_parser::FeedAction;
use crate::app::notifications::NotificationCenter;
use crate::app::state::AppState;
use crate::domain::entities::{PostDraft, PostId, Session, UserSummary};
use crate::domain::ports::{Confirm, Control, FeedApi, FeedView};
use crate::error::{AppError, ClientError};
use crate::feed::{
    render_like_control, render_load_error, render_posts, render_recent_users, render_stats,
};

/// Number of users shown in the recent users panel
pub const RECENT_USERS_LIMIT: usize = 5;

const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// How an action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The server answered `success: false`
    Rejected(String),
    /// Client-side validation blocked the request
    Invalid(String),
    /// The viewer's role does not allow the action
    Forbidden(String),
    /// Network or HTTP failure
    Failed(String),
    /// The user declined the confirmation prompt
    Cancelled,
    /// Nothing to do, e.g. the control was already busy
    Ignored,
}

/// Service driving the feed page
pub struct FeedService<A, V, C>
where
    A: FeedApi,
    V: FeedView + 'static,
    C: Confirm,
{
    api: Arc<A>,
    view: Arc<V>,
    confirm: Arc<C>,
    state: AppState,
    notifications: NotificationCenter<V>,
    in_flight: Mutex<HashSet<Control>>,
}

impl<A, V, C> FeedService<A, V, C>
where
    A: FeedApi,
    V: FeedView + 'static,
    C: Confirm,
{
    pub fn new(api: Arc<A>, view: Arc<V>, confirm: Arc<C>, notification_lifetime: Duration) -> Self {
        let notifications = NotificationCenter::new(view.clone(), notification_lifetime);
        Self {
            api,
            view,
            confirm,
            state: AppState::default(),
            notifications,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Resolve the session, then load everything the role can see
    pub async fn init(&self) -> Outcome {
        let session = self.resolve_session().await;
        tracing::info!(role = %session.role, "Session resolved");

        self.state.set_session(session);
        self.view.set_admin_mode(self.state.is_admin());

        self.refresh().await
    }

    async fn resolve_session(&self) -> Session {
        match self.api.current_session().await {
            Ok(session) => session,
            Err(e) if e.is_not_found() => {
                tracing::debug!("Backend offers no session claim, continuing as regular user");
                Session::anonymous()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch session claim, continuing as regular user");
                Session::anonymous()
            }
        }
    }

    /// Reload posts and, for admins, the recent users panel
    pub async fn refresh(&self) -> Outcome {
        let outcome = self.load_posts().await;
        if self.state.is_admin() {
            self.load_recent_users().await;
        }
        outcome
    }

    /// Fetch the post list and render it, or render the retry control
    pub async fn load_posts(&self) -> Outcome {
        match self.api.list_posts().await {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "Loaded posts");
                self.state.replace_posts(posts);
                self.render_post_list();
                Outcome::Completed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load posts");
                let message = e.user_message();
                self.view.render_posts(render_load_error(&message));
                Outcome::Failed(message)
            }
        }
    }

    fn render_post_list(&self) {
        let session = self.state.session();
        let posts = self.state.posts();
        self.view.render_posts(render_posts(&posts, &session));
        if session.is_admin() {
            self.view.render_stats(render_stats(&self.state.stats()));
        }
    }

    /// Submit the post form
    pub async fn submit_post(&self, draft: PostDraft) -> Outcome {
        let Some(guard) = self.acquire(Control::PostForm) else {
            return Outcome::Ignored;
        };

        let result = async {
            draft.validate().map_err(AppError::Validation)?;
            let message = self.api.create_post(&draft.normalized()).await?;
            Ok::<_, AppError>(message)
        }
        .await;
        drop(guard);

        match result {
            Ok(message) => {
                tracing::info!("Post published");
                self.view.reset_post_form();
                self.notifications.success(format!(
                    "✅ {}",
                    message.unwrap_or_else(|| "Post published!".to_string())
                ));
                self.load_posts().await;
                Outcome::Completed
            }
            Err(e) => self.settle(e),
        }
    }

    /// Publish an admin quick post
    pub async fn quick_post(&self, content: String) -> Outcome {
        if !self.state.is_admin() {
            return self.settle(AppError::Forbidden(
                "Only an administrator can publish quick posts".to_string(),
            ));
        }

        let Some(guard) = self.acquire(Control::QuickPost) else {
            return Outcome::Ignored;
        };

        let draft = PostDraft::quick(content);
        let result = async {
            draft.validate_quick().map_err(AppError::Validation)?;
            let message = self.api.create_post(&draft.normalized()).await?;
            Ok::<_, AppError>(message)
        }
        .await;
        drop(guard);

        match result {
            Ok(_) => {
                tracing::info!("Quick post published");
                self.view.clear_quick_post();
                self.notifications.success("✅ Important news published!");
                self.load_posts().await;
                Outcome::Completed
            }
            Err(e) => self.settle(e),
        }
    }

    /// Like or unlike a post depending on the viewer's current state
    pub async fn toggle_like(&self, post_id: PostId) -> Outcome {
        let Some(post) = self.state.find_post(post_id) else {
            return self.settle(AppError::Validation(format!(
                "Post {} is not in the feed, refresh and try again",
                post_id
            )));
        };

        if post.is_own {
            return self.settle(AppError::Forbidden(
                "You cannot like your own post".to_string(),
            ));
        }

        let Some(_guard) = self.acquire(Control::Like(post_id)) else {
            tracing::debug!(post_id = %post_id, "Like already in flight, ignoring");
            return Outcome::Ignored;
        };

        let action = post.like_state().next_action();
        let likes = match self.api.set_like(post_id, action).await {
            Ok(likes) => likes,
            Err(e) => return self.settle(e.into()),
        };

        let new_state = action.target_state();
        let updated = self
            .state
            .apply_like(post_id, new_state, likes)
            .unwrap_or_else(|| {
                let mut post = post.clone();
                post.user_liked = new_state.is_liked();
                post.likes = likes;
                post
            });

        tracing::info!(post_id = %post_id, action = %action, likes, "Like state changed");
        self.view
            .replace_like_control(post_id, render_like_control(&updated));
        if self.state.is_admin() {
            self.view.render_stats(render_stats(&self.state.stats()));
        }

        if new_state.is_liked() {
            self.notifications.success("❤️ You liked this post!");
        } else {
            self.notifications.success("You no longer like this post");
        }
        Outcome::Completed
    }

    /// Delete a post after the user confirms
    pub async fn delete_post(&self, post_id: PostId) -> Outcome {
        if !self.state.is_admin() {
            return self.settle(AppError::Forbidden(
                "Only an administrator can delete posts".to_string(),
            ));
        }

        let Some(guard) = self.acquire(Control::Delete(post_id)) else {
            return Outcome::Ignored;
        };

        if !self.confirm.confirm(DELETE_PROMPT).await {
            tracing::debug!(post_id = %post_id, "Deletion cancelled");
            return Outcome::Cancelled;
        }

        let result = self.api.delete_post(post_id).await;
        drop(guard);

        match result {
            Ok(message) => {
                tracing::info!(post_id = %post_id, "Post deleted");
                self.notifications.success(format!(
                    "✅ {}",
                    message.unwrap_or_else(|| "Post deleted".to_string())
                ));
                self.load_posts().await;
                Outcome::Completed
            }
            Err(e) => self.settle(e.into()),
        }
    }

    /// Reload the recent users panel. Silent for non-admins and on failure.
    pub async fn load_recent_users(&self) -> Outcome {
        if !self.state.is_admin() {
            return Outcome::Ignored;
        }

        match self.api.list_users().await {
            Ok(users) => {
                let recent = select_recent_users(users, RECENT_USERS_LIMIT);
                self.view.render_recent_users(render_recent_users(&recent));
                Outcome::Completed
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users");
                Outcome::Failed(e.user_message())
            }
        }
    }

    /// Route an action to its handler
    pub async fn dispatch(&self, action: FeedAction) -> Outcome {
        tracing::debug!(?action, "Dispatching action");

        match action {
            FeedAction::Refresh => self.refresh().await,
            FeedAction::CreatePost { draft } => self.submit_post(draft).await,
            FeedAction::QuickPost { content } => self.quick_post(content).await,
            FeedAction::ToggleLike { post_id } => self.toggle_like(post_id).await,
            FeedAction::Delete { post_id } => self.delete_post(post_id).await,
            FeedAction::RecentUsers => {
                if self.state.is_admin() {
                    self.load_recent_users().await
                } else {
                    self.settle(AppError::Forbidden(
                        "Only an administrator can view the users list".to_string(),
                    ))
                }
            }
            FeedAction::Help => Outcome::Ignored,
        }
    }

    /// Surface an error as a notification and turn it into an outcome
    fn settle(&self, error: AppError) -> Outcome {
        let message = error.user_message();
        match &error {
            AppError::Client(ClientError::Rejected(_)) => {
                tracing::info!(reason = %message, "Request rejected by server")
            }
            AppError::Client(e) => tracing::warn!(error = %e, "Request failed"),
            AppError::Validation(_) | AppError::Forbidden(_) => {
                tracing::debug!(reason = %message, "Action blocked client-side")
            }
        }

        self.notifications.error(format!("❌ {}", message));

        match error {
            AppError::Validation(_) => Outcome::Invalid(message),
            AppError::Forbidden(_) => Outcome::Forbidden(message),
            AppError::Client(ClientError::Rejected(_)) => Outcome::Rejected(message),
            AppError::Client(_) => Outcome::Failed(message),
        }
    }

    fn acquire(&self, control: Control) -> Option<ControlGuard<'_, V>> {
        ControlGuard::acquire(self.view.as_ref(), &self.in_flight, control)
    }
}

/// Keeps a control disabled while its request is in flight and re-enables
/// it on drop, whatever the outcome.
struct ControlGuard<'a, V>
where
    V: FeedView,
{
    view: &'a V,
    in_flight: &'a Mutex<HashSet<Control>>,
    control: Control,
}

impl<'a, V> ControlGuard<'a, V>
where
    V: FeedView,
{
    fn acquire(view: &'a V, in_flight: &'a Mutex<HashSet<Control>>, control: Control) -> Option<Self> {
        let inserted = in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(control);
        if !inserted {
            return None;
        }
        view.set_control_enabled(control, false);
        Some(Self {
            view,
            in_flight,
            control,
        })
    }
}

impl<V> Drop for ControlGuard<'_, V>
where
    V: FeedView,
{
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.control);
        self.view.set_control_enabled(self.control, true);
    }
}

/// Pick the `limit` most recent users.
///
/// The backend is expected to list users oldest first. When every
/// registration date parses, the list is sorted by it first so that
/// expectation does not have to hold; otherwise the server order is used
/// as-is.
pub fn select_recent_users(mut users: Vec<UserSummary>, limit: usize) -> Vec<UserSummary> {
    if users.iter().all(|u| u.registered_at().is_some()) {
        users.sort_by_key(|u| u.registered_at());
    } else {
        tracing::warn!("Unparsable registration dates, relying on server order for recent users");
    }

    let start = users.len().saturating_sub(limit);
    users.split_off(start)
}
