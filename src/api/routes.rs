//! API route handlers
//!
//! Every handler returns `Result`, so a failure is turned into exactly one
//! `{errors: [...]}` response and the success path is never reached after it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::extract::JsonBody;
use super::server::SharedState;
use crate::auth::{CurrentUser, LoginRequest, RegisterRequest};
use crate::error::Result;
use crate::photos::{CommentRequest, NewPhoto, TitleUpdate};
use crate::users::ProfileUpdate;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// User routes

pub async fn register(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let session = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse> {
    let session = state.auth.login(req).await?;
    Ok(Json(session))
}

pub async fn current_user(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user)
}

pub async fn update_profile(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<impl IntoResponse> {
    let profile = state.users.update_profile(user.id, update).await?;
    Ok(Json(profile))
}

pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let profile = state.users.get_by_id(&id).await?;
    Ok(Json(profile))
}

// Photo routes

pub async fn insert_photo(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<NewPhoto>,
) -> Result<impl IntoResponse> {
    let photo = state.photos.insert(&user, req).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

pub async fn list_photos(
    State(state): State<SharedState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.list_all().await?))
}

pub async fn user_photos(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.list_by_user(&id).await?))
}

pub async fn search_photos(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let q = query.q.unwrap_or_default();
    Ok(Json(state.photos.search(&q).await?))
}

pub async fn get_photo(
    State(state): State<SharedState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.get(&id).await?))
}

pub async fn update_photo(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<TitleUpdate>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.update_title(&user, &id, req).await?))
}

pub async fn delete_photo(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.delete(&user, &id).await?))
}

pub async fn like_photo(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.like(&user, &id).await?))
}

pub async fn comment_photo(
    State(state): State<SharedState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.photos.comment(&user, &id, req).await?))
}
