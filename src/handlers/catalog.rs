//! Service catalog handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::Result,
    handlers::extract::{JsonBody, PathParams, QueryParams},
    models::catalog::{PriceRangeParams, ServiceDto, ServiceRequest, ServiceSearchParams},
    services::catalog,
    state::AppState,
};

/// GET /api/servicios
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<ServiceDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(catalog::list_services(&mut conn).await?))
}

/// GET /api/servicios/{id}
pub async fn get_service(State(state): State<AppState>, PathParams(id): PathParams<i32>) -> Result<Json<ServiceDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(catalog::get_service(&mut conn, id).await?))
}

/// GET /api/servicios/buscar?nombre=
///
/// Always `200`; no match is an empty array.
pub async fn search_services(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ServiceSearchParams>,
) -> Result<Json<Vec<ServiceDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(catalog::search_services(&mut conn, &params.name).await?))
}

/// GET /api/servicios/precio?min=&max=
pub async fn list_services_by_price(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PriceRangeParams>,
) -> Result<Json<Vec<ServiceDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(
        catalog::list_services_by_price(&mut conn, params.min, params.max).await?,
    ))
}

/// POST /api/servicios
pub async fn create_service(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceDto>)> {
    let mut conn = state.connection().await?;
    let service = catalog::create_service(&mut conn, request).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/servicios/{id}
pub async fn update_service(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<ServiceRequest>,
) -> Result<Json<ServiceDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(catalog::update_service(&mut conn, id, request).await?))
}

/// DELETE /api/servicios/{id}
pub async fn delete_service(State(state): State<AppState>, PathParams(id): PathParams<i32>) -> Result<StatusCode> {
    let mut conn = state.connection().await?;
    catalog::delete_service(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
