//! HTTP client for the Photogram API

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use super::session::SessionStore;
use crate::auth::{AuthSession, LoginRequest, RegisterRequest};
use crate::error::{Error, Result};
use crate::photos::{
    CommentReceipt, CommentRequest, LikeReceipt, NewPhoto, Photo, PhotoDeleted, PhotoUpdated,
    TitleUpdate,
};
use crate::users::{ProfileUpdate, UserProfile};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Talks to the API and attaches the stored session token to each request
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    sessions: SessionStore,
    session: Option<AuthSession>,
}

impl ApiClient {
    /// Create a client, restoring any session saved by a previous run
    pub fn new(base_url: impl Into<String>, sessions: SessionStore) -> Result<Self> {
        let session = sessions.load()?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sessions,
            session,
        })
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Where the session is persisted between runs
    pub fn session_file(&self) -> &Path {
        self.sessions.path()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let errors = match response.json::<ErrorBody>().await {
            Ok(body) if !body.errors.is_empty() => body.errors,
            _ => vec![status.to_string()],
        };
        Err(Error::Api {
            status: status.as_u16(),
            errors,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.authorized(self.http.get(self.url(path))).send().await?;
        Self::parse(response).await
    }

    /// Store a freshly issued session, both in memory and on disk
    fn remember(&mut self, session: AuthSession) -> Result<AuthSession> {
        self.sessions.save(&session)?;
        self.session = Some(session.clone());
        Ok(session)
    }

    pub async fn register(&mut self, req: &RegisterRequest) -> Result<AuthSession> {
        let response = self
            .http
            .post(self.url("/users/register"))
            .json(req)
            .send()
            .await?;
        let session = Self::parse(response).await?;
        self.remember(session)
    }

    pub async fn login(&mut self, req: &LoginRequest) -> Result<AuthSession> {
        let response = self
            .http
            .post(self.url("/users/login"))
            .json(req)
            .send()
            .await?;
        let session = Self::parse(response).await?;
        self.remember(session)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session = None;
        self.sessions.clear()
    }

    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get("/users/current").await
    }

    pub async fn user(&self, id: &str) -> Result<UserProfile> {
        self.get(&format!("/users/{}", id)).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let response = self
            .authorized(self.http.put(self.url("/users/")))
            .json(update)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn photos(&self) -> Result<Vec<Photo>> {
        self.get("/photos").await
    }

    pub async fn user_photos(&self, user_id: &str) -> Result<Vec<Photo>> {
        self.get(&format!("/photos/user/{}", user_id)).await
    }

    pub async fn search_photos(&self, query: &str) -> Result<Vec<Photo>> {
        let url = Url::parse_with_params(&self.url("/photos/search"), &[("q", query)])
            .map_err(|e| Error::Config(format!("Invalid API url: {}", e)))?;
        let response = self.authorized(self.http.get(url)).send().await?;
        Self::parse(response).await
    }

    pub async fn photo(&self, id: &str) -> Result<Photo> {
        self.get(&format!("/photos/{}", id)).await
    }

    pub async fn post_photo(&self, req: &NewPhoto) -> Result<Photo> {
        let response = self
            .authorized(self.http.post(self.url("/photos")))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_photo(&self, id: &str, req: &TitleUpdate) -> Result<PhotoUpdated> {
        let response = self
            .authorized(self.http.put(self.url(&format!("/photos/{}", id))))
            .json(req)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_photo(&self, id: &str) -> Result<PhotoDeleted> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/photos/{}", id))))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn like(&self, id: &str) -> Result<LikeReceipt> {
        let response = self
            .authorized(self.http.put(self.url(&format!("/photos/like/{}", id))))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn comment(&self, id: &str, text: &str) -> Result<CommentReceipt> {
        let body = CommentRequest {
            comment: Some(text.to_string()),
        };
        let response = self
            .authorized(self.http.put(self.url(&format!("/photos/comment/{}", id))))
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }
}
