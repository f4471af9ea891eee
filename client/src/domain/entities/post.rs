//! Post domain entity
//!
//! A user-authored feed entry. Posts are created server-side; the client
//! only reads them and reflects what the server reports after a mutation.

use serde::{Deserialize, Serialize};

/// Maximum title length accepted by the post form
pub const MAX_TITLE_CHARS: usize = 200;

/// Fixed title used for admin quick posts
pub const QUICK_POST_TITLE: &str = "🔥 Important news";

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<i64>()
            .map(PostId)
            .map_err(|_| format!("'{}' is not a valid post id", s))
    }
}

/// Role of an account as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        // Anything the backend does not call "admin" gets no elevated affordances.
        if s.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// A feed post as returned by `GET /api/posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub author_role: Role,
    /// Formatted by the backend, treated as opaque
    pub date_posted: String,
    #[serde(default)]
    pub likes: u64,
    /// The current viewer wrote this post
    #[serde(default, alias = "is_author")]
    pub is_own: bool,
    /// The current viewer has liked this post
    #[serde(default)]
    pub user_liked: bool,
}

impl Post {
    pub fn like_state(&self) -> LikeState {
        LikeState::from_liked(self.user_liked)
    }
}

/// Per-post like state, always taken from the server's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeState {
    Unliked,
    Liked,
}

impl LikeState {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            LikeState::Liked
        } else {
            LikeState::Unliked
        }
    }

    pub fn is_liked(&self) -> bool {
        matches!(self, LikeState::Liked)
    }

    /// The transition a click on the control requests
    pub fn next_action(&self) -> LikeAction {
        match self {
            LikeState::Unliked => LikeAction::Like,
            LikeState::Liked => LikeAction::Unlike,
        }
    }
}

/// Like endpoint to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// State reached once the server confirms this action
    pub fn target_state(&self) -> LikeState {
        match self {
            LikeAction::Like => LikeState::Liked,
            LikeAction::Unlike => LikeState::Unliked,
        }
    }
}

impl std::fmt::Display for LikeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LikeAction::Like => write!(f, "like"),
            LikeAction::Unlike => write!(f, "unlike"),
        }
    }
}

/// Body of `POST /api/posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Admin shortcut with the fixed quick-post title
    pub fn quick(content: impl Into<String>) -> Self {
        Self::new(QUICK_POST_TITLE, content)
    }

    /// Client-side checks for the post form
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err("Please fill in both the title and the content".to_string());
        }
        let title_len = self.title.chars().count();
        if title_len > MAX_TITLE_CHARS {
            return Err(format!(
                "Title is too long ({} characters, maximum {})",
                title_len, MAX_TITLE_CHARS
            ));
        }
        Ok(())
    }

    /// Client-side checks for a quick post, which only carries content
    pub fn validate_quick(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Please enter the news text".to_string());
        }
        Ok(())
    }

    /// Trimmed copy sent over the wire
    pub fn normalized(&self) -> Self {
        Self::new(self.title.trim(), self.content.trim())
    }
}

/// Aggregate numbers shown to admins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedStats {
    pub total_posts: usize,
    pub total_likes: u64,
}

impl FeedStats {
    pub fn from_posts(posts: &[Post]) -> Self {
        Self {
            total_posts: posts.len(),
            total_likes: posts.iter().map(|p| p.likes).sum(),
        }
    }
}
