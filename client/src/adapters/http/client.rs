//! HTTP client for the newsfeed backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{LikeAction, Post, PostDraft, PostId, Session, UserSummary};
use crate::domain::ports::{ApiResponse, FeedApi, LikeResponse};
use crate::error::ClientError;

/// Implementation of the newsfeed backend client
#[derive(Clone)]
pub struct HttpFeedApi {
    http: Client,
    base_url: String,
}

impl HttpFeedApi {
    /// Create a client for `base_url`. When a session cookie is given it is
    /// sent with every request; the backend decides what it grants.
    pub fn new(
        base_url: &str,
        session_cookie: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = session_cookie {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie).map_err(|_| {
                    ClientError::InvalidConfig("Invalid session cookie format".to_string())
                })?,
            );
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        handle_response(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        handle_response(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        tracing::debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        handle_response(response).await
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        match self.get_json::<Listing<T>>(path).await? {
            Listing::Items(items) => Ok(items),
            Listing::Envelope(envelope) => {
                envelope.into_result()?;
                Err(ClientError::Deserialization(format!(
                    "expected a list from {}",
                    path
                )))
            }
        }
    }
}

/// List endpoints answer with an envelope instead of the list when the
/// session is missing.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Items(Vec<T>),
    Envelope(ApiResponse),
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ClientError::Deserialization(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();

    // Prefer the backend's own explanation when it sent one
    if let Ok(ApiResponse {
        success: false,
        message: Some(message),
    }) = serde_json::from_str::<ApiResponse>(&body)
    {
        return Err(ClientError::Rejected(message));
    }

    Err(ClientError::Api {
        status: status.as_u16(),
        message: first_line(&body),
    })
}

/// Short, single-line excerpt of an error body
fn first_line(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .chars()
        .take(200)
        .collect()
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn current_session(&self) -> Result<Session, ClientError> {
        self.get_json("/api/session").await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get_list("/api/posts").await
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Option<String>, ClientError> {
        let response: ApiResponse = self.post_json("/api/posts", Some(draft)).await?;
        response.into_result()
    }

    async fn delete_post(&self, id: PostId) -> Result<Option<String>, ClientError> {
        let response: ApiResponse = self.delete_json(&format!("/api/posts/{}", id)).await?;
        response.into_result()
    }

    async fn set_like(&self, id: PostId, action: LikeAction) -> Result<u64, ClientError> {
        let response: LikeResponse = self
            .post_json::<(), _>(&format!("/api/posts/{}/{}", id, action), None)
            .await?;
        response.into_result()
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        self.get_list("/api/users").await
    }
}
