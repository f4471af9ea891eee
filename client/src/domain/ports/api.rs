//! Newsfeed backend port trait
//!
//! Defines the REST calls the client makes against the newsfeed backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{LikeAction, Post, PostDraft, PostId, Session, UserSummary};
use crate::error::ClientError;

/// Envelope returned by create and delete calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Turn `success: false` into `ClientError::Rejected`
    pub fn into_result(self) -> Result<Option<String>, ClientError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ClientError::Rejected(
                self.message
                    .unwrap_or_else(|| "The server rejected the request".to_string()),
            ))
        }
    }
}

/// Envelope returned by like and unlike calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LikeResponse {
    /// Authoritative like count, or the reason there is none
    pub fn into_result(self) -> Result<u64, ClientError> {
        if !self.success {
            return Err(ClientError::Rejected(
                self.message
                    .unwrap_or_else(|| "The server rejected the request".to_string()),
            ));
        }
        self.likes.ok_or_else(|| {
            ClientError::Deserialization("like response is missing the like count".to_string())
        })
    }
}

/// Newsfeed backend operations
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// `GET /api/session`: the authenticated viewer's claim
    async fn current_session(&self) -> Result<Session, ClientError>;

    /// `GET /api/posts`
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError>;

    /// `POST /api/posts`; returns the server's success message, if any
    async fn create_post(&self, draft: &PostDraft) -> Result<Option<String>, ClientError>;

    /// `DELETE /api/posts/{id}`
    async fn delete_post(&self, id: PostId) -> Result<Option<String>, ClientError>;

    /// `POST /api/posts/{id}/like` or `/unlike`; returns the new like count
    async fn set_like(&self, id: PostId, action: LikeAction) -> Result<u64, ClientError>;

    /// `GET /api/users`
    async fn list_users(&self) -> Result<Vec<UserSummary>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_failure_keeps_message() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"success":false,"message":"Log in first!"}"#).unwrap();
        match resp.into_result() {
            Err(ClientError::Rejected(msg)) => assert_eq!(msg, "Log in first!"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn api_response_success_without_message() {
        let resp: ApiResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), None);
    }

    #[test]
    fn like_response_returns_server_count() {
        let resp: LikeResponse = serde_json::from_str(r#"{"success":true,"likes":5}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), 5);
    }

    #[test]
    fn like_response_without_count_is_an_error() {
        let resp: LikeResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(ClientError::Deserialization(_))
        ));
    }
}
