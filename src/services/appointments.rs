use chrono::NaiveDateTime;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    mapping::{to_appointment_draft, to_appointment_dto},
    models::appointments::{
        Appointment, AppointmentDraft, AppointmentDto, AppointmentRefs, AppointmentRequest,
        AppointmentStatus,
    },
    queries::{appointments, catalog, professionals, users},
    services::{
        begin_failed, catalog::service_not_found, commit, professionals::professional_not_found,
        users::user_not_found,
    },
    validation::{FieldErrors, sanitize_optional},
};
use sqlx::Acquire;

pub fn appointment_not_found(id: i32) -> Error {
    Error::NotFound(format!("Cita no encontrada con ID: {}", id))
}

/// Whether the caller must name a status. Creation falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusRule {
    DefaultWhenMissing,
    Required,
}

fn validate_appointment(
    request: AppointmentRequest,
    rule: StatusRule,
) -> Result<(AppointmentDraft, AppointmentRefs)> {
    let mut errors = FieldErrors::new();

    let scheduled_at = errors.required("fechaHora", request.scheduled_at, "La fecha y hora son obligatorias");
    let user_id = errors.required("usuarioId", request.user_id, "El usuario es obligatorio");
    let service_id = errors.required("servicioId", request.service_id, "El servicio es obligatorio");
    let professional_id =
        errors.required("profesionalId", request.professional_id, "El profesional es obligatorio");

    let status = match (sanitize_optional(request.status), rule) {
        (Some(raw), _) => match AppointmentStatus::parse(&raw) {
            Ok(status) => Some(status),
            Err(message) => {
                errors.add("estado", message);
                None
            }
        },
        (None, StatusRule::DefaultWhenMissing) => Some(AppointmentStatus::default()),
        (None, StatusRule::Required) => {
            errors.add("estado", "El estado es obligatorio");
            None
        }
    };

    errors.finish(|| {
        Some((
            to_appointment_draft(scheduled_at?, status?),
            AppointmentRefs {
                user_id: user_id?,
                service_id: service_id?,
                professional_id: professional_id?,
            },
        ))
    })
}

fn check_transition(from: AppointmentStatus, to: AppointmentStatus) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(Error::validation(
            "estado",
            format!("No se puede cambiar el estado de la cita de {} a {}", from, to),
        ))
    }
}

fn parse_status(raw: &str) -> Result<AppointmentStatus> {
    AppointmentStatus::parse(raw).map_err(|message| Error::validation("estado", message))
}

async fn resolve_user(conn: &mut DbConn, id: i32) -> Result<i32> {
    let user = users::get_user_by_id(conn, id).await?.ok_or_else(|| user_not_found(id))?;
    Ok(user.id)
}

async fn resolve_service(conn: &mut DbConn, id: i32) -> Result<i32> {
    let service = catalog::get_service_by_id(conn, id)
        .await?
        .ok_or_else(|| service_not_found(id))?;
    Ok(service.id)
}

async fn resolve_professional(conn: &mut DbConn, id: i32) -> Result<i32> {
    let professional = professionals::get_professional_by_id(conn, id)
        .await?
        .ok_or_else(|| professional_not_found(id))?;
    Ok(professional.id)
}

/// Resolves the references that differ from `current`. On creation there
/// is no current appointment, so all three are looked up.
async fn resolve_refs(
    conn: &mut DbConn,
    requested: AppointmentRefs,
    current: Option<&Appointment>,
) -> Result<AppointmentRefs> {
    let user_id = match current {
        Some(current) if current.user_id == requested.user_id => current.user_id,
        _ => resolve_user(conn, requested.user_id).await?,
    };
    let service_id = match current {
        Some(current) if current.service_id == requested.service_id => current.service_id,
        _ => resolve_service(conn, requested.service_id).await?,
    };
    let professional_id = match current {
        Some(current) if current.professional_id == requested.professional_id => current.professional_id,
        _ => resolve_professional(conn, requested.professional_id).await?,
    };

    Ok(AppointmentRefs {
        user_id,
        service_id,
        professional_id,
    })
}

/// Books an appointment. Every reference must exist; the status defaults
/// to `PENDIENTE`. Overlapping bookings are accepted.
pub async fn create_appointment(conn: &mut DbConn, request: AppointmentRequest) -> Result<AppointmentDto> {
    let (draft, requested) = validate_appointment(request, StatusRule::DefaultWhenMissing)?;
    tracing::debug!(
        user_id = requested.user_id,
        service_id = requested.service_id,
        professional_id = requested.professional_id,
        "Creating appointment"
    );

    let mut tx = conn.begin().await.map_err(begin_failed)?;

    let refs = resolve_refs(&mut tx, requested, None).await?;
    let appointment = appointments::create_appointment(&mut tx, &draft.attach(refs)).await?;
    let record = appointments::get_appointment_record(&mut tx, appointment.id)
        .await?
        .ok_or_else(|| appointment_not_found(appointment.id))?;

    commit(tx).await?;

    tracing::info!(appointment_id = record.id, status = %record.status, "Appointment created");
    Ok(to_appointment_dto(&record))
}

pub async fn get_appointment(conn: &mut DbConn, id: i32) -> Result<AppointmentDto> {
    tracing::debug!(appointment_id = id, "Fetching appointment");
    let record = appointments::get_appointment_record(conn, id)
        .await?
        .ok_or_else(|| appointment_not_found(id))?;

    Ok(to_appointment_dto(&record))
}

/// Full-field replace. Only references that change are looked up again.
pub async fn update_appointment(
    conn: &mut DbConn,
    id: i32,
    request: AppointmentRequest,
) -> Result<AppointmentDto> {
    let (draft, requested) = validate_appointment(request, StatusRule::Required)?;
    tracing::debug!(appointment_id = id, status = %draft.status, "Updating appointment");

    let mut tx = conn.begin().await.map_err(begin_failed)?;

    let current = appointments::get_appointment_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| appointment_not_found(id))?;
    check_transition(current.status, draft.status)?;

    let refs = resolve_refs(&mut tx, requested, Some(&current)).await?;
    appointments::update_appointment(&mut tx, id, &draft.attach(refs))
        .await?
        .ok_or_else(|| appointment_not_found(id))?;
    let record = appointments::get_appointment_record(&mut tx, id)
        .await?
        .ok_or_else(|| appointment_not_found(id))?;

    commit(tx).await?;

    tracing::info!(appointment_id = id, status = %record.status, "Appointment updated");
    Ok(to_appointment_dto(&record))
}

pub async fn delete_appointment(conn: &mut DbConn, id: i32) -> Result<()> {
    tracing::debug!(appointment_id = id, "Deleting appointment");
    if appointments::delete_appointment(conn, id).await? == 0 {
        return Err(appointment_not_found(id));
    }

    tracing::info!(appointment_id = id, "Appointment deleted");
    Ok(())
}

pub async fn list_appointments(conn: &mut DbConn) -> Result<Vec<AppointmentDto>> {
    let records = appointments::list_appointments(conn).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}

pub async fn list_by_user(conn: &mut DbConn, user_id: i32) -> Result<Vec<AppointmentDto>> {
    let records = appointments::list_appointments_by_user(conn, user_id).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}

pub async fn list_by_professional(conn: &mut DbConn, professional_id: i32) -> Result<Vec<AppointmentDto>> {
    let records = appointments::list_appointments_by_professional(conn, professional_id).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}

pub async fn list_by_service(conn: &mut DbConn, service_id: i32) -> Result<Vec<AppointmentDto>> {
    let records = appointments::list_appointments_by_service(conn, service_id).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}

/// `status` is parsed case-insensitively; an unknown value is rejected.
pub async fn list_by_status(conn: &mut DbConn, status: &str) -> Result<Vec<AppointmentDto>> {
    let status = parse_status(status)?;
    let records = appointments::list_appointments_by_status(conn, status).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}

pub async fn list_by_user_and_status(
    conn: &mut DbConn,
    user_id: i32,
    status: &str,
) -> Result<Vec<AppointmentDto>> {
    let status = parse_status(status)?;
    let records = appointments::list_appointments_by_user_and_status(conn, user_id, status).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}

/// Appointments scheduled within `start..=end`.
pub async fn list_between(
    conn: &mut DbConn,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<AppointmentDto>> {
    if start > end {
        return Err(Error::validation(
            "inicio",
            "La fecha de inicio no puede ser posterior a la fecha de fin",
        ));
    }

    let records = appointments::list_appointments_between(conn, start, end).await?;
    Ok(records.iter().map(to_appointment_dto).collect())
}
