//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{Post, PostId, Role, Session, UserSummary};

/// A post by someone else, not liked by the viewer, with no likes
pub fn test_post(id: i64) -> Post {
    Post {
        id: PostId(id),
        title: format!("Post {}", id),
        content: format!("Content of post {}", id),
        author: "Jane Doe".to_string(),
        author_role: Role::User,
        date_posted: "15.03.2024 12:00".to_string(),
        likes: 0,
        is_own: false,
        user_liked: false,
    }
}

pub fn test_user(full_name: &str, registration_date: &str) -> UserSummary {
    UserSummary {
        full_name: full_name.to_string(),
        email: format!(
            "{}@example.com",
            full_name.to_lowercase().replace(' ', ".")
        ),
        role: Role::User,
        registration_date: registration_date.to_string(),
    }
}

pub fn admin_session() -> Session {
    Session::new("Admin", Role::Admin)
}

pub fn user_session() -> Session {
    Session::new("Regular User", Role::User)
}
