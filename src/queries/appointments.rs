use chrono::NaiveDateTime;

use crate::{
    error::{Error, Result},
    models::appointments::{Appointment, AppointmentRecord, AppointmentStatus, NewAppointment},
};

use crate::DbConn;

// The professional's display name is the name of the user owning the profile.
const RECORD_SELECT: &str = r#"
    SELECT c.id, c.fecha_hora AS scheduled_at, c.estado AS status,
           c.usuario_id AS user_id, u.nombre AS user_name,
           c.servicio_id AS service_id, s.nombre AS service_name,
           c.profesional_id AS professional_id, pu.nombre AS professional_name
    FROM cita c
    JOIN usuario u ON u.id = c.usuario_id
    JOIN servicio s ON s.id = c.servicio_id
    JOIN profesional p ON p.id = c.profesional_id
    JOIN usuario pu ON pu.id = p.usuario_id
"#;

const RECORD_ORDER: &str = "ORDER BY c.fecha_hora, c.id";

pub async fn create_appointment(conn: &mut DbConn, new_appointment: &NewAppointment) -> Result<Appointment> {
    let appointment = sqlx::query_as::<_, Appointment>(
        r#"
        INSERT INTO cita (fecha_hora, estado, usuario_id, servicio_id, profesional_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, fecha_hora AS scheduled_at, estado AS status, usuario_id AS user_id,
                  servicio_id AS service_id, profesional_id AS professional_id
        "#,
    )
    .bind(new_appointment.scheduled_at)
    .bind(new_appointment.status)
    .bind(new_appointment.user_id)
    .bind(new_appointment.service_id)
    .bind(new_appointment.professional_id)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(appointment)
}

pub async fn get_appointment_by_id(conn: &mut DbConn, id: i32) -> Result<Option<Appointment>> {
    let appointment = sqlx::query_as::<_, Appointment>(
        r#"
        SELECT id, fecha_hora AS scheduled_at, estado AS status, usuario_id AS user_id,
               servicio_id AS service_id, profesional_id AS professional_id
        FROM cita
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(appointment)
}

pub async fn get_appointment_record(conn: &mut DbConn, id: i32) -> Result<Option<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.id = $1");
    let record = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(record)
}

pub async fn list_appointments(conn: &mut DbConn) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

pub async fn list_appointments_by_user(conn: &mut DbConn, user_id: i32) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.usuario_id = $1 {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(user_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

pub async fn list_appointments_by_professional(
    conn: &mut DbConn,
    professional_id: i32,
) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.profesional_id = $1 {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(professional_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

pub async fn list_appointments_by_service(conn: &mut DbConn, service_id: i32) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.servicio_id = $1 {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(service_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

pub async fn list_appointments_by_status(
    conn: &mut DbConn,
    status: AppointmentStatus,
) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.estado = $1 {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(status)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

pub async fn list_appointments_by_user_and_status(
    conn: &mut DbConn,
    user_id: i32,
    status: AppointmentStatus,
) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.usuario_id = $1 AND c.estado = $2 {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(user_id)
        .bind(status)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

/// Appointments scheduled within `start..=end`.
pub async fn list_appointments_between(
    conn: &mut DbConn,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<AppointmentRecord>> {
    let query = format!("{RECORD_SELECT} WHERE c.fecha_hora BETWEEN $1 AND $2 {RECORD_ORDER}");
    let records = sqlx::query_as::<_, AppointmentRecord>(&query)
        .bind(start)
        .bind(end)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

/// Full-field replace. Returns `None` when the id is unknown.
pub async fn update_appointment(
    conn: &mut DbConn,
    id: i32,
    fields: &NewAppointment,
) -> Result<Option<Appointment>> {
    let appointment = sqlx::query_as::<_, Appointment>(
        r#"
        UPDATE cita
        SET fecha_hora = $1, estado = $2, usuario_id = $3, servicio_id = $4, profesional_id = $5
        WHERE id = $6
        RETURNING id, fecha_hora AS scheduled_at, estado AS status, usuario_id AS user_id,
                  servicio_id AS service_id, profesional_id AS professional_id
        "#,
    )
    .bind(fields.scheduled_at)
    .bind(fields.status)
    .bind(fields.user_id)
    .bind(fields.service_id)
    .bind(fields.professional_id)
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(appointment)
}

pub async fn delete_appointment(conn: &mut DbConn, id: i32) -> Result<u64> {
    let rows_affected = sqlx::query("DELETE FROM cita WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?
        .rows_affected();

    Ok(rows_affected)
}
