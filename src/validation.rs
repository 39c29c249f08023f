//! Input validation utilities for the service layer.
//!
//! Field checks return a plain message so callers can attach it to the
//! field name they are validating. [`FieldErrors`] collects those messages
//! and turns them into a single [`Error::Validation`].

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result, ValidationErrors};

/// Outcome of a single field check: `Err` carries the message for the caller.
pub type FieldResult = std::result::Result<(), String>;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9+()\- ]{1,255}$").expect("phone pattern is a valid regex")
});

/// Accumulates per-field validation messages.
///
/// The first message recorded for a field wins; later ones are ignored so
/// the caller sees the most basic problem (e.g. "required" before "too long").
#[derive(Debug, Default)]
pub struct FieldErrors {
    fields: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Records the message of a failed check under `field`.
    pub fn check(&mut self, field: &str, result: FieldResult) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    /// Returns the value when present, otherwise records `message` under `field`.
    pub fn required<T>(&mut self, field: &str, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.add(field, message);
        }
        value
    }

    /// Like [`FieldErrors::required`] but blank strings also count as missing.
    /// The returned value is trimmed.
    pub fn required_text(&mut self, field: &str, value: Option<String>, message: &str) -> Option<String> {
        match value.map(|v| sanitize_string(&v)) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Fails with every recorded message, or builds the validated value.
    ///
    /// `build` only runs when no message was recorded, so it may rely on
    /// every `required` field being present.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T> {
        if let Some(errors) = self.into_errors() {
            return Err(Error::Validation(errors));
        }
        build().ok_or_else(|| Error::Internal("Validated input is incomplete".to_string()))
    }

    fn into_errors(self) -> Option<ValidationErrors> {
        match self.fields.len() {
            0 => None,
            1 => self
                .fields
                .into_iter()
                .next()
                .map(|(field, message)| ValidationErrors::Single { field, message }),
            _ => Some(ValidationErrors::Multiple { fields: self.fields }),
        }
    }
}

/// Validates email format using comprehensive checks
///
/// # Examples
/// ```
/// use citas::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> FieldResult {
    let email = email.trim();

    if email.is_empty() {
        return Err("El email es obligatorio".to_string());
    }

    if email.len() > 254 {
        return Err("El email es demasiado largo (máximo 254 caracteres)".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err("El email debe contener exactamente un símbolo @".to_string());
    }

    let (local_part, domain) = (parts[0], parts[1]);

    if local_part.is_empty() || domain.is_empty() {
        return Err("El email debe tener un formato válido".to_string());
    }

    if local_part.len() > 64 {
        return Err("La parte local del email es demasiado larga (máximo 64 caracteres)".to_string());
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("El dominio del email debe tener un formato válido".to_string());
    }

    if email.contains("..") {
        return Err("El email no puede contener puntos consecutivos".to_string());
    }

    let invalid_chars = ['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':', '"', ' '];
    if let Some(c) = invalid_chars.iter().find(|c| email.contains(**c)) {
        return Err(format!("El email no puede contener '{}'", c));
    }

    Ok(())
}

/// Validates password strength and format
pub fn validate_password(password: &str) -> FieldResult {
    if password.len() < 8 {
        return Err("La contraseña debe tener al menos 8 caracteres".to_string());
    }

    if password.len() > 128 {
        return Err("La contraseña es demasiado larga (máximo 128 caracteres)".to_string());
    }

    let lowered = password.to_lowercase();
    if ["password", "12345678", "qwerty123", "admin123"].contains(&lowered.as_str()) {
        return Err("La contraseña es demasiado común".to_string());
    }

    if password.contains(char::is_whitespace) {
        return Err("La contraseña no puede contener espacios".to_string());
    }

    Ok(())
}

/// Validates a phone number: digits, spaces and `+-()` only.
pub fn validate_phone(phone: &str) -> FieldResult {
    if phone.chars().count() > 255 {
        return Err("El teléfono no puede exceder 255 caracteres".to_string());
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err("El teléfono solo puede contener dígitos, espacios y los símbolos + - ( )".to_string());
    }
    Ok(())
}

/// Checks a length limit counted in characters.
pub fn validate_max_length(value: &str, max: usize, message: &str) -> FieldResult {
    if value.chars().count() > max {
        return Err(message.to_string());
    }
    Ok(())
}

/// Validates that a price is a finite, strictly positive amount.
pub fn validate_price(price: f64) -> FieldResult {
    if !price.is_finite() || price <= 0.0 {
        return Err("El precio debe ser un valor positivo".to_string());
    }
    Ok(())
}

/// Sanitizes string input by trimming whitespace
pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

/// Trims an optional string and treats blank input as absent.
pub fn sanitize_optional(input: Option<String>) -> Option<String> {
    input
        .map(|v| sanitize_string(&v))
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.email+tag@domain.co.uk").is_ok());
        assert!(validate_email("user_name@sub.domain.com").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@@domain.com").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("user name@domain.com").is_err());
        assert!(validate_email("user@domain..com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("validpassword123").is_ok());
        assert!(validate_password("MySecureP@ssw0rd!").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("password").is_err());
        assert!(validate_password("Admin123").is_err());
        assert!(validate_password("space in password").is_err());
        assert!(validate_password(&"a".repeat(130)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+57 (300) 123-4567").is_ok());
        assert!(validate_phone("0000000000").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone(&"1".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(50.0).is_ok());
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-10.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_max_length_counts_characters() {
        assert!(validate_max_length("Clínica", 7, "largo").is_ok());
        assert_eq!(validate_max_length("Clínicas", 7, "largo"), Err("largo".to_string()));
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello world  "), "hello world");
        assert_eq!(sanitize_string("\ttest\n"), "test");
        assert_eq!(sanitize_string("   "), "");
        assert_eq!(sanitize_optional(Some("   ".to_string())), None);
        assert_eq!(sanitize_optional(Some(" 123 ".to_string())), Some("123".to_string()));
    }

    #[test]
    fn test_field_errors_single_and_multiple() {
        let mut errors = FieldErrors::new();
        errors.add("nombre", "obligatorio");
        errors.add("nombre", "demasiado largo");
        let err = errors.finish(|| Some(())).unwrap_err();
        match err {
            Error::Validation(v) => {
                assert_eq!(v.message_for("nombre"), Some("obligatorio"));
                assert!(matches!(v, ValidationErrors::Single { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut errors = FieldErrors::new();
        let name = errors.required_text("nombre", Some("  ".to_string()), "obligatorio");
        let price = errors.required::<f64>("precio", None, "precio obligatorio");
        assert!(name.is_none() && price.is_none());
        assert_eq!(errors.len(), 2);
        match errors.finish(|| Some(())).unwrap_err() {
            Error::Validation(ValidationErrors::Multiple { fields }) => {
                assert_eq!(fields["precio"], "precio obligatorio");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_field_errors_build_when_clean() {
        let mut errors = FieldErrors::new();
        let name = errors.required_text("nombre", Some("  Terapia  ".to_string()), "obligatorio");
        assert!(errors.is_empty());
        assert_eq!(errors.finish(|| name).unwrap(), "Terapia");
    }
}
