//! User directory handlers
//!
//! Thin layer: extract, delegate to [`crate::services::users`], respond.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::Result,
    handlers::extract::{JsonBody, PathParams},
    models::users::{RegisterUser, UpdateUserRequest, UserDto},
    services::users,
    state::AppState,
};

/// GET /api/usuarios
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(users::list_users(&mut conn).await?))
}

/// GET /api/usuarios/{id}
pub async fn get_user(State(state): State<AppState>, PathParams(id): PathParams<i32>) -> Result<Json<UserDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(users::get_user(&mut conn, id).await?))
}

/// GET /api/usuarios/email/{email}
pub async fn get_user_by_email(
    State(state): State<AppState>,
    PathParams(email): PathParams<String>,
) -> Result<Json<UserDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(users::get_user_by_email(&mut conn, &email).await?))
}

/// POST /api/usuarios
///
/// # HTTP Status Codes
/// - `201 CREATED`: user registered
/// - `400 BAD_REQUEST`: validation error
/// - `409 CONFLICT`: email already registered
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<UserDto>)> {
    let mut conn = state.connection().await?;
    let user = users::register_user(&mut conn, request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/usuarios/{id}
pub async fn update_user(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(users::update_user(&mut conn, id, request).await?))
}

/// DELETE /api/usuarios/{id}
pub async fn delete_user(State(state): State<AppState>, PathParams(id): PathParams<i32>) -> Result<StatusCode> {
    let mut conn = state.connection().await?;
    users::delete_user(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
