use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::Result,
    handlers::extract::{JsonBody, PathParams},
    models::professionals::{ProfessionalDto, ProfessionalRequest},
    services::professionals,
    state::AppState,
};

/// GET /api/profesionales
pub async fn list_professionals(State(state): State<AppState>) -> Result<Json<Vec<ProfessionalDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(professionals::list_professionals(&mut conn).await?))
}

/// GET /api/profesionales/{id}
pub async fn get_professional(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<ProfessionalDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(professionals::get_professional(&mut conn, id).await?))
}

/// GET /api/profesionales/especialidad/{especialidad}
pub async fn list_by_specialty(
    State(state): State<AppState>,
    PathParams(specialty): PathParams<String>,
) -> Result<Json<Vec<ProfessionalDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(professionals::list_by_specialty(&mut conn, &specialty).await?))
}

/// GET /api/profesionales/usuario/{usuarioId}
pub async fn list_by_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<i32>,
) -> Result<Json<Vec<ProfessionalDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(professionals::list_by_user(&mut conn, user_id).await?))
}

/// POST /api/profesionales
///
/// `404` when `usuarioId` does not name an existing user.
pub async fn create_professional(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ProfessionalRequest>,
) -> Result<(StatusCode, Json<ProfessionalDto>)> {
    let mut conn = state.connection().await?;
    let professional = professionals::create_professional(&mut conn, request).await?;
    Ok((StatusCode::CREATED, Json(professional)))
}

/// PUT /api/profesionales/{id}
pub async fn update_professional(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<ProfessionalRequest>,
) -> Result<Json<ProfessionalDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(professionals::update_professional(&mut conn, id, request).await?))
}

/// DELETE /api/profesionales/{id}
pub async fn delete_professional(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode> {
    let mut conn = state.connection().await?;
    professionals::delete_professional(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
