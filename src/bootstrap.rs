//! One-shot seed of the administrative account.
//!
//! Runs from the binary after migrations and before the listener starts.
//! Concurrent startups against the same database are not guarded; the
//! unique email constraint turns the loser's insert into a conflict.

use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    DbConn,
    config::BootstrapConfig,
    error::Result,
    models::users::{DEFAULT_ROLE, NewUser},
    queries::users,
    services::users::hash_password,
};

const GENERATED_PASSWORD_LENGTH: usize = 24;

fn generate_password() -> SecretString {
    let password: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect();
    SecretString::from(password)
}

/// Creates the administrative account unless a user with
/// `admin_email` already exists. Returns whether an account was created.
pub async fn seed_admin(conn: &mut DbConn, config: &BootstrapConfig) -> Result<bool> {
    if users::email_exists(conn, &config.admin_email).await? {
        tracing::debug!(email = %config.admin_email, "Administrative account already present");
        return Ok(false);
    }

    let (password, generated) = match &config.admin_password {
        Some(password) => (password.clone(), false),
        None => (generate_password(), true),
    };

    let new_user = NewUser {
        name: config.admin_name.clone(),
        email: config.admin_email.clone(),
        password_hash: hash_password(password.expose_secret())?,
        phone: Some(config.admin_phone.clone()),
        role: DEFAULT_ROLE.to_string(),
    };
    let user = users::create_user(conn, new_user).await?;

    if generated {
        tracing::warn!(
            email = %user.email,
            password = %password.expose_secret(),
            "Administrative account created with a generated password; change it after first login"
        );
    } else {
        tracing::info!(user_id = user.id, email = %user.email, "Administrative account created");
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password();
        let value = password.expose_secret();
        assert_eq!(value.len(), GENERATED_PASSWORD_LENGTH);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(value, generate_password().expose_secret());
    }
}
