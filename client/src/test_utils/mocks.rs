//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record how they were used.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::entities::{
    LikeAction, Notification, Post, PostDraft, PostId, Session, UserSummary,
};
use crate::domain::ports::{Confirm, Control, FeedApi, FeedView};
use crate::error::ClientError;

// ============================================================================
// Mock Feed API
// ============================================================================

/// A backend call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CurrentSession,
    ListPosts,
    CreatePost(PostDraft),
    DeletePost(PostId),
    SetLike(PostId, LikeAction),
    ListUsers,
}

#[derive(Default)]
struct MockApiState {
    session: Option<Session>,
    session_error: Option<u16>,
    posts: Vec<Post>,
    users: Vec<UserSummary>,
    next_id: i64,
    like_result: u64,
    posts_error: Option<u16>,
    mutation_error: Option<u16>,
    reject_creates: Option<String>,
    reject_deletes: Option<String>,
    calls: Vec<ApiCall>,
}

#[derive(Default)]
pub struct MockFeedApi {
    state: Arc<RwLock<MockApiState>>,
}

impl MockFeedApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.write().unwrap().next_id = 1000;
        api
    }

    pub fn with_session(self, session: Session) -> Self {
        self.state.write().unwrap().session = Some(session);
        self
    }

    /// Make `current_session` fail with this HTTP status
    pub fn failing_session(self, status: u16) -> Self {
        self.state.write().unwrap().session_error = Some(status);
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.state.write().unwrap().posts = posts;
        self
    }

    pub fn with_users(self, users: Vec<UserSummary>) -> Self {
        self.state.write().unwrap().users = users;
        self
    }

    pub fn rejecting_creates(self, message: &str) -> Self {
        self.state.write().unwrap().reject_creates = Some(message.to_string());
        self
    }

    pub fn rejecting_deletes(self, message: &str) -> Self {
        self.state.write().unwrap().reject_deletes = Some(message.to_string());
        self
    }

    /// Make `list_posts` fail with this HTTP status
    pub fn fail_posts_with(&self, status: u16) {
        self.state.write().unwrap().posts_error = Some(status);
    }

    /// Make create, delete and like calls fail with this HTTP status
    pub fn fail_mutations_with(&self, status: u16) {
        self.state.write().unwrap().mutation_error = Some(status);
    }

    /// Like count the server reports after the next like/unlike
    pub fn set_like_result(&self, likes: u64) {
        self.state.write().unwrap().like_result = likes;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.read().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.write().unwrap().calls.clear();
    }

    /// Record a call, yielding first so callers really are suspended
    /// mid-request like they would be against a network.
    async fn record(&self, call: ApiCall) {
        tokio::task::yield_now().await;
        self.state.write().unwrap().calls.push(call);
    }

    fn http_error(status: u16) -> ClientError {
        ClientError::Api {
            status,
            message: String::new(),
        }
    }
}

#[async_trait]
impl FeedApi for MockFeedApi {
    async fn current_session(&self) -> Result<Session, ClientError> {
        self.record(ApiCall::CurrentSession).await;
        let state = self.state.read().unwrap();
        if let Some(status) = state.session_error {
            return Err(Self::http_error(status));
        }
        Ok(state.session.clone().unwrap_or_default())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.record(ApiCall::ListPosts).await;
        let state = self.state.read().unwrap();
        if let Some(status) = state.posts_error {
            return Err(Self::http_error(status));
        }
        Ok(state.posts.clone())
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Option<String>, ClientError> {
        self.record(ApiCall::CreatePost(draft.clone())).await;
        let mut state = self.state.write().unwrap();
        if let Some(status) = state.mutation_error {
            return Err(Self::http_error(status));
        }
        if let Some(message) = &state.reject_creates {
            return Err(ClientError::Rejected(message.clone()));
        }

        state.next_id += 1;
        let post = Post {
            id: PostId(state.next_id),
            title: draft.title.clone(),
            content: draft.content.clone(),
            author: "Me".to_string(),
            author_role: state.session.clone().unwrap_or_default().role,
            date_posted: "15.03.2024 12:00".to_string(),
            likes: 0,
            is_own: true,
            user_liked: false,
        };
        state.posts.insert(0, post);
        Ok(Some("Post added!".to_string()))
    }

    async fn delete_post(&self, id: PostId) -> Result<Option<String>, ClientError> {
        self.record(ApiCall::DeletePost(id)).await;
        let mut state = self.state.write().unwrap();
        if let Some(status) = state.mutation_error {
            return Err(Self::http_error(status));
        }
        if let Some(message) = &state.reject_deletes {
            return Err(ClientError::Rejected(message.clone()));
        }
        state.posts.retain(|p| p.id != id);
        Ok(None)
    }

    async fn set_like(&self, id: PostId, action: LikeAction) -> Result<u64, ClientError> {
        self.record(ApiCall::SetLike(id, action)).await;
        let mut state = self.state.write().unwrap();
        if let Some(status) = state.mutation_error {
            return Err(Self::http_error(status));
        }
        let likes = state.like_result;
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == id) {
            post.likes = likes;
            post.user_liked = action == LikeAction::Like;
        }
        Ok(likes)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        self.record(ApiCall::ListUsers).await;
        Ok(self.state.read().unwrap().users.clone())
    }
}

// ============================================================================
// Recording View
// ============================================================================

#[derive(Default)]
struct ViewRecord {
    admin_mode: Option<bool>,
    posts: String,
    stats: String,
    users: String,
    like_controls: HashMap<PostId, String>,
    controls: HashMap<Control, Vec<bool>>,
    notification: Option<Notification>,
    dismissed: Vec<u64>,
    form_resets: usize,
    quick_clears: usize,
}

/// View that keeps the latest markup of every region
#[derive(Default)]
pub struct RecordingView {
    record: RwLock<ViewRecord>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admin_mode(&self) -> Option<bool> {
        self.record.read().unwrap().admin_mode
    }

    pub fn posts_markup(&self) -> String {
        self.record.read().unwrap().posts.clone()
    }

    pub fn stats_markup(&self) -> String {
        self.record.read().unwrap().stats.clone()
    }

    pub fn users_markup(&self) -> String {
        self.record.read().unwrap().users.clone()
    }

    pub fn like_control(&self, id: PostId) -> Option<String> {
        self.record.read().unwrap().like_controls.get(&id).cloned()
    }

    /// Every enabled/disabled transition of a control, oldest first
    pub fn control_history(&self, control: Control) -> Vec<bool> {
        self.record
            .read()
            .unwrap()
            .controls
            .get(&control)
            .cloned()
            .unwrap_or_default()
    }

    /// Controls start enabled
    pub fn control_enabled(&self, control: Control) -> bool {
        self.control_history(control).last().copied().unwrap_or(true)
    }

    pub fn visible_notification(&self) -> Option<Notification> {
        self.record.read().unwrap().notification.clone()
    }

    pub fn dismissed(&self) -> Vec<u64> {
        self.record.read().unwrap().dismissed.clone()
    }

    pub fn form_resets(&self) -> usize {
        self.record.read().unwrap().form_resets
    }

    pub fn quick_clears(&self) -> usize {
        self.record.read().unwrap().quick_clears
    }
}

impl FeedView for RecordingView {
    fn set_admin_mode(&self, admin: bool) {
        self.record.write().unwrap().admin_mode = Some(admin);
    }

    fn render_posts(&self, markup: String) {
        self.record.write().unwrap().posts = markup;
    }

    fn render_stats(&self, markup: String) {
        self.record.write().unwrap().stats = markup;
    }

    fn render_recent_users(&self, markup: String) {
        self.record.write().unwrap().users = markup;
    }

    fn replace_like_control(&self, id: PostId, markup: String) {
        self.record.write().unwrap().like_controls.insert(id, markup);
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        self.record
            .write()
            .unwrap()
            .controls
            .entry(control)
            .or_default()
            .push(enabled);
    }

    fn show_notification(&self, notification: &Notification) {
        self.record.write().unwrap().notification = Some(notification.clone());
    }

    fn dismiss_notification(&self, id: u64) {
        let mut record = self.record.write().unwrap();
        record.dismissed.push(id);
        if record.notification.as_ref().map(|n| n.id) == Some(id) {
            record.notification = None;
        }
    }

    fn reset_post_form(&self) {
        self.record.write().unwrap().form_resets += 1;
    }

    fn clear_quick_post(&self) {
        self.record.write().unwrap().quick_clears += 1;
    }
}

// ============================================================================
// Static Confirm
// ============================================================================

/// Confirmation prompt that always gives the same answer
pub struct StaticConfirm(pub bool);

#[async_trait]
impl Confirm for StaticConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
