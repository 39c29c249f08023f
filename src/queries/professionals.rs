use crate::{
    error::{Error, Result},
    models::professionals::{NewProfessional, Professional, ProfessionalRecord},
};

use crate::DbConn;

const RECORD_SELECT: &str = r#"
    SELECT p.id, p.especialidad AS specialty, p.horario_disponible AS available_at,
           p.usuario_id AS user_id, u.nombre AS user_name
    FROM profesional p
    JOIN usuario u ON u.id = p.usuario_id
"#;

pub async fn create_professional(conn: &mut DbConn, new_professional: &NewProfessional) -> Result<Professional> {
    let professional = sqlx::query_as::<_, Professional>(
        r#"
        INSERT INTO profesional (especialidad, horario_disponible, usuario_id)
        VALUES ($1, $2, $3)
        RETURNING id, especialidad AS specialty, horario_disponible AS available_at, usuario_id AS user_id
        "#,
    )
    .bind(&new_professional.specialty)
    .bind(new_professional.available_at)
    .bind(new_professional.user_id)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(professional)
}

/// Bare row lookup, used to resolve references.
pub async fn get_professional_by_id(conn: &mut DbConn, id: i32) -> Result<Option<Professional>> {
    let professional = sqlx::query_as::<_, Professional>(
        r#"
        SELECT id, especialidad AS specialty, horario_disponible AS available_at, usuario_id AS user_id
        FROM profesional
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(professional)
}

/// A professional with the name of the user that owns it.
pub async fn get_professional_record(conn: &mut DbConn, id: i32) -> Result<Option<ProfessionalRecord>> {
    let query = format!("{RECORD_SELECT} WHERE p.id = $1");
    let record = sqlx::query_as::<_, ProfessionalRecord>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(record)
}

pub async fn list_professionals(conn: &mut DbConn) -> Result<Vec<ProfessionalRecord>> {
    let query = format!("{RECORD_SELECT} ORDER BY p.id");
    let records = sqlx::query_as::<_, ProfessionalRecord>(&query)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

/// Exact match on the specialty.
pub async fn list_professionals_by_specialty(
    conn: &mut DbConn,
    specialty: &str,
) -> Result<Vec<ProfessionalRecord>> {
    let query = format!("{RECORD_SELECT} WHERE p.especialidad = $1 ORDER BY p.id");
    let records = sqlx::query_as::<_, ProfessionalRecord>(&query)
        .bind(specialty)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

pub async fn list_professionals_by_user(conn: &mut DbConn, user_id: i32) -> Result<Vec<ProfessionalRecord>> {
    let query = format!("{RECORD_SELECT} WHERE p.usuario_id = $1 ORDER BY p.id");
    let records = sqlx::query_as::<_, ProfessionalRecord>(&query)
        .bind(user_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Sqlx)?;

    Ok(records)
}

/// Full-field replace. Returns `None` when the id is unknown.
pub async fn update_professional(
    conn: &mut DbConn,
    id: i32,
    fields: &NewProfessional,
) -> Result<Option<Professional>> {
    let professional = sqlx::query_as::<_, Professional>(
        r#"
        UPDATE profesional
        SET especialidad = $1, horario_disponible = $2, usuario_id = $3
        WHERE id = $4
        RETURNING id, especialidad AS specialty, horario_disponible AS available_at, usuario_id AS user_id
        "#,
    )
    .bind(&fields.specialty)
    .bind(fields.available_at)
    .bind(fields.user_id)
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(professional)
}

/// Deletes a professional; its appointments are removed by cascade.
pub async fn delete_professional(conn: &mut DbConn, id: i32) -> Result<u64> {
    let rows_affected = sqlx::query("DELETE FROM profesional WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?
        .rows_affected();

    Ok(rows_affected)
}
