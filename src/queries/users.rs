use crate::{
    error::{Error, Result},
    models::users::{NewUser, UpdateUser, User},
    queries::conflict_on_unique,
};

use crate::DbConn;

/// Creates a new user in the database.
pub async fn create_user(conn: &mut DbConn, new_user: NewUser) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO usuario (nombre, email, password, telefono, rol)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, nombre AS name, email, password AS password_hash, telefono AS phone,
                  fecha_registro AS registered_at, rol AS role
        "#,
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.phone)
    .bind(&new_user.role)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        conflict_on_unique(e, || format!("Ya existe un usuario con el email: {}", new_user.email))
    })?;

    Ok(user)
}

/// Gets a single user by their ID. The user may not exist.
pub async fn get_user_by_id(conn: &mut DbConn, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, nombre AS name, email, password AS password_hash, telefono AS phone,
               fecha_registro AS registered_at, rol AS role
        FROM usuario
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(user)
}

/// Gets a single user by their email address. The user may not exist.
pub async fn get_user_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, nombre AS name, email, password AS password_hash, telefono AS phone,
               fecha_registro AS registered_at, rol AS role
        FROM usuario
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(user)
}

/// Checks whether any user already uses `email`.
pub async fn email_exists(conn: &mut DbConn, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM usuario WHERE email = $1)",
    )
    .bind(email)
    .fetch_one(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(exists)
}

/// Lists all users in the database.
pub async fn list_users(conn: &mut DbConn) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, nombre AS name, email, password AS password_hash, telefono AS phone,
               fecha_registro AS registered_at, rol AS role
        FROM usuario
        ORDER BY id
        "#,
    )
    .fetch_all(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(users)
}

/// Replaces a user's name, email and phone. Returns `None` when the id is unknown.
pub async fn update_user(conn: &mut DbConn, id: i32, update: &UpdateUser) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE usuario
        SET nombre = $1, email = $2, telefono = $3
        WHERE id = $4
        RETURNING id, nombre AS name, email, password AS password_hash, telefono AS phone,
                  fecha_registro AS registered_at, rol AS role
        "#,
    )
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.phone)
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        conflict_on_unique(e, || format!("Ya existe un usuario con el email: {}", update.email))
    })?;

    Ok(user)
}

/// Deletes a user by their ID. Professional profiles and appointments go with it.
pub async fn delete_user(conn: &mut DbConn, id: i32) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM usuario
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(conn)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}
