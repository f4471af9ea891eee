//! Application state
//!
//! The current post list and the viewer's session, owned by the controller
//! and handed to the renderer explicitly. The post list is never edited in
//! place: every change swaps in a new list.

use std::sync::{Arc, RwLock};

use crate::domain::entities::{FeedStats, LikeState, Post, PostId, Session};

#[derive(Debug, Default)]
pub struct AppState {
    session: RwLock<Session>,
    posts: RwLock<Arc<Vec<Post>>>,
}

impl AppState {
    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_session(&self, session: Session) {
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_admin()
    }

    /// Snapshot of the current post list
    pub fn posts(&self) -> Arc<Vec<Post>> {
        self.posts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn find_post(&self, id: PostId) -> Option<Post> {
        self.posts().iter().find(|p| p.id == id).cloned()
    }

    /// Replace the whole post list
    pub fn replace_posts(&self, posts: Vec<Post>) {
        *self
            .posts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(posts);
    }

    /// Swap in a copy of the list reflecting a confirmed like change.
    /// Returns the updated post, or `None` if it is no longer listed.
    pub fn apply_like(&self, id: PostId, state: LikeState, likes: u64) -> Option<Post> {
        let mut guard = self
            .posts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut updated = None;
        let next: Vec<Post> = guard
            .iter()
            .map(|post| {
                if post.id == id {
                    let mut post = post.clone();
                    post.user_liked = state.is_liked();
                    post.likes = likes;
                    updated = Some(post.clone());
                    post
                } else {
                    post.clone()
                }
            })
            .collect();

        if updated.is_some() {
            *guard = Arc::new(next);
        }
        updated
    }

    pub fn stats(&self) -> FeedStats {
        FeedStats::from_posts(&self.posts())
    }
}
