use crate::DbConn;
use crate::{
    error::{Error, Result},
    mapping::to_user_dto,
    models::users::{DEFAULT_ROLE, NewUser, RegisterUser, UpdateUser, UpdateUserRequest, UserDto},
    queries::users,
    services::{begin_failed, commit},
    validation::{
        FieldErrors, sanitize_optional, validate_email, validate_max_length, validate_password,
        validate_phone,
    },
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::Acquire;

pub fn user_not_found(id: i32) -> Error {
    Error::NotFound(format!("Usuario no encontrado con ID: {}", id))
}

fn duplicate_email(email: &str) -> Error {
    Error::Conflict(format!("Ya existe un usuario con el email: {}", email))
}

/// Name, email and phone checks shared by registration and update.
fn check_profile(
    errors: &mut FieldErrors,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> (Option<String>, Option<String>, Option<String>) {
    let name = errors.required_text("nombre", name, "El nombre es obligatorio");
    if let Some(name) = &name {
        errors.check(
            "nombre",
            validate_max_length(name, 255, "El nombre no puede exceder 255 caracteres"),
        );
    }

    let email = errors.required_text("email", email, "El email es obligatorio");
    if let Some(email) = &email {
        errors.check("email", validate_email(email));
    }

    let phone = sanitize_optional(phone);
    if let Some(phone) = &phone {
        errors.check("telefono", validate_phone(phone));
    }

    (name, email, phone)
}

/// Hashes a plaintext password with Argon2 and a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a password hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!("Password verification failed: {}", e))),
    }
}

/// Registers a new user with password validation and hashing.
///
/// The role is always [`DEFAULT_ROLE`].
pub async fn register_user(conn: &mut DbConn, request: RegisterUser) -> Result<UserDto> {
    let mut errors = FieldErrors::new();
    let (name, email, phone) = check_profile(&mut errors, request.name, request.email, request.phone);
    let password = errors.required("password", request.password, "La contraseña es obligatoria");
    if let Some(password) = &password {
        errors.check("password", validate_password(password));
    }
    let (name, email, password) = errors.finish(|| Some((name?, email?, password?)))?;

    tracing::debug!(email = %email, "Registering user");

    let mut tx = conn.begin().await.map_err(begin_failed)?;

    if users::email_exists(&mut tx, &email).await? {
        return Err(duplicate_email(&email));
    }

    let new_user = NewUser {
        name,
        email,
        password_hash: hash_password(&password)?,
        phone,
        role: DEFAULT_ROLE.to_string(),
    };
    let user = users::create_user(&mut tx, new_user).await?;

    commit(tx).await?;

    tracing::info!(user_id = user.id, "User created");
    Ok(to_user_dto(&user))
}

pub async fn get_user(conn: &mut DbConn, id: i32) -> Result<UserDto> {
    tracing::debug!(user_id = id, "Fetching user");
    let user = users::get_user_by_id(conn, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(to_user_dto(&user))
}

pub async fn get_user_by_email(conn: &mut DbConn, email: &str) -> Result<UserDto> {
    tracing::debug!(email = %email, "Fetching user by email");
    let user = users::get_user_by_email(conn, email.trim())
        .await?
        .ok_or_else(|| Error::NotFound(format!("Usuario no encontrado con email: {}", email.trim())))?;

    Ok(to_user_dto(&user))
}

pub async fn list_users(conn: &mut DbConn) -> Result<Vec<UserDto>> {
    let users = users::list_users(conn).await?;
    Ok(users.iter().map(to_user_dto).collect())
}

/// Replaces name, email and phone. Password, role and registration
/// timestamp are left untouched.
pub async fn update_user(conn: &mut DbConn, id: i32, request: UpdateUserRequest) -> Result<UserDto> {
    let mut errors = FieldErrors::new();
    let (name, email, phone) = check_profile(&mut errors, request.name, request.email, request.phone);
    let update = errors.finish(|| Some(UpdateUser {
        name: name?,
        email: email?,
        phone,
    }))?;

    tracing::debug!(user_id = id, "Updating user");

    let mut tx = conn.begin().await.map_err(begin_failed)?;

    let current = users::get_user_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    if current.email != update.email {
        if let Some(other) = users::get_user_by_email(&mut tx, &update.email).await? {
            if other.id != id {
                return Err(duplicate_email(&update.email));
            }
        }
    }

    let user = users::update_user(&mut tx, id, &update)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    commit(tx).await?;

    tracing::info!(user_id = id, "User updated");
    Ok(to_user_dto(&user))
}

/// Deletes a user together with its professional profiles and appointments.
pub async fn delete_user(conn: &mut DbConn, id: i32) -> Result<()> {
    tracing::debug!(user_id = id, "Deleting user");
    if users::delete_user(conn, id).await? == 0 {
        return Err(user_not_found(id));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(())
}
