use crate::{
    error::{Error, Result},
    models::catalog::{NewService, Service},
};

use crate::DbConn;

pub async fn create_service(conn: &mut DbConn, new_service: &NewService) -> Result<Service> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        INSERT INTO servicio (nombre, descripcion, duracion, precio)
        VALUES ($1, $2, $3, $4)
        RETURNING id, nombre AS name, descripcion AS description, duracion AS duration, precio AS price
        "#,
    )
    .bind(&new_service.name)
    .bind(&new_service.description)
    .bind(&new_service.duration)
    .bind(new_service.price)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(service)
}

pub async fn get_service_by_id(conn: &mut DbConn, id: i32) -> Result<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, nombre AS name, descripcion AS description, duracion AS duration, precio AS price
        FROM servicio
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(service)
}

pub async fn list_services(conn: &mut DbConn) -> Result<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, nombre AS name, descripcion AS description, duracion AS duration, precio AS price
        FROM servicio
        ORDER BY id
        "#,
    )
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(services)
}

/// Case-insensitive substring match on the name. `%`, `_` and `\` in the
/// input match literally.
pub async fn search_services_by_name(conn: &mut DbConn, fragment: &str) -> Result<Vec<Service>> {
    let pattern = format!("%{}%", escape_like(fragment));

    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, nombre AS name, descripcion AS description, duracion AS duration, precio AS price
        FROM servicio
        WHERE nombre ILIKE $1 ESCAPE '\'
        ORDER BY id
        "#,
    )
    .bind(pattern)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(services)
}

/// Services priced within `min..=max`.
pub async fn list_services_by_price(conn: &mut DbConn, min: f64, max: f64) -> Result<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, nombre AS name, descripcion AS description, duracion AS duration, precio AS price
        FROM servicio
        WHERE precio BETWEEN $1 AND $2
        ORDER BY id
        "#,
    )
    .bind(min)
    .bind(max)
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(services)
}

/// Full-field replace. Returns `None` when the id is unknown.
pub async fn update_service(conn: &mut DbConn, id: i32, fields: &NewService) -> Result<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        UPDATE servicio
        SET nombre = $1, descripcion = $2, duracion = $3, precio = $4
        WHERE id = $5
        RETURNING id, nombre AS name, descripcion AS description, duracion AS duration, precio AS price
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(&fields.duration)
    .bind(fields.price)
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(service)
}

/// Deletes a service; its appointments are removed by cascade.
pub async fn delete_service(conn: &mut DbConn, id: i32) -> Result<u64> {
    let rows_affected = sqlx::query("DELETE FROM servicio WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map_err(Error::Sqlx)?
        .rows_affected();

    Ok(rows_affected)
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("terap"), "terap");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
