use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role assigned to every account created through registration or bootstrap.
pub const DEFAULT_ROLE: &str = "SUPERADMIN";

/// A persisted `usuario` row.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// service layer. Use [`UserDto`] for anything outward.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub registered_at: NaiveDateTime,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: String,
}

/// Fields an update may change. Password, role and registration
/// timestamp are not part of it.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Registration payload (`POST /api/usuarios`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUser {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

/// Update payload (`PUT /api/usuarios/{id}`). Extra fields such as
/// `rol` or `fechaRegistro` are accepted and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
}

/// Outward user representation. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "fechaRegistro")]
    pub registered_at: NaiveDateTime,
    #[serde(rename = "rol")]
    pub role: String,
}

/// A user projected back from its transfer shape. Credentials are not
/// part of the transfer shape and must be attached before it is a [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registered_at: NaiveDateTime,
    pub role: String,
}

impl UserDraft {
    pub fn with_password_hash(self, password_hash: String) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash,
            phone: self.phone,
            registered_at: self.registered_at,
            role: self.role,
        }
    }
}
