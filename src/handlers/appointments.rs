//! Appointment handlers
//!
//! Booking, rescheduling and the filtered listings. Status segments in the
//! path are parsed case-insensitively by the service layer.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::Result,
    handlers::extract::{JsonBody, PathParams, QueryParams},
    models::appointments::{AppointmentDto, AppointmentRequest, DateRangeParams},
    services::appointments,
    state::AppState,
};

/// GET /api/citas
pub async fn list_appointments(State(state): State<AppState>) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(appointments::list_appointments(&mut conn).await?))
}

/// GET /api/citas/{id}
pub async fn get_appointment(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<Json<AppointmentDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(appointments::get_appointment(&mut conn, id).await?))
}

/// GET /api/citas/usuario/{usuarioId}
pub async fn list_by_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<i32>,
) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(appointments::list_by_user(&mut conn, user_id).await?))
}

/// GET /api/citas/usuario/{usuarioId}/estado/{estado}
pub async fn list_by_user_and_status(
    State(state): State<AppState>,
    PathParams((user_id, status)): PathParams<(i32, String)>,
) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(
        appointments::list_by_user_and_status(&mut conn, user_id, &status).await?,
    ))
}

/// GET /api/citas/profesional/{profesionalId}
pub async fn list_by_professional(
    State(state): State<AppState>,
    PathParams(professional_id): PathParams<i32>,
) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(
        appointments::list_by_professional(&mut conn, professional_id).await?,
    ))
}

/// GET /api/citas/servicio/{servicioId}
pub async fn list_by_service(
    State(state): State<AppState>,
    PathParams(service_id): PathParams<i32>,
) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(appointments::list_by_service(&mut conn, service_id).await?))
}

/// GET /api/citas/estado/{estado}
pub async fn list_by_status(
    State(state): State<AppState>,
    PathParams(status): PathParams<String>,
) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(appointments::list_by_status(&mut conn, &status).await?))
}

/// GET /api/citas/rango?inicio=&fin=
pub async fn list_between(
    State(state): State<AppState>,
    QueryParams(range): QueryParams<DateRangeParams>,
) -> Result<Json<Vec<AppointmentDto>>> {
    let mut conn = state.connection().await?;
    Ok(Json(
        appointments::list_between(&mut conn, range.start, range.end).await?,
    ))
}

/// POST /api/citas
///
/// # HTTP Status Codes
/// - `201 CREATED`: appointment booked, `estado` defaults to `PENDIENTE`
/// - `400 BAD_REQUEST`: missing fields or unknown status
/// - `404 NOT_FOUND`: user, service or professional does not exist
pub async fn create_appointment(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentDto>)> {
    let mut conn = state.connection().await?;
    let appointment = appointments::create_appointment(&mut conn, request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /api/citas/{id}
pub async fn update_appointment(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
    JsonBody(request): JsonBody<AppointmentRequest>,
) -> Result<Json<AppointmentDto>> {
    let mut conn = state.connection().await?;
    Ok(Json(appointments::update_appointment(&mut conn, id, request).await?))
}

/// DELETE /api/citas/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode> {
    let mut conn = state.connection().await?;
    appointments::delete_appointment(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
