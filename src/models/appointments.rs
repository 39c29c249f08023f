use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle of an appointment.
///
/// Allowed moves: `PENDIENTE -> CONFIRMADA | CANCELADA`,
/// `CONFIRMADA -> COMPLETADA | CANCELADA`. `CANCELADA` and `COMPLETADA`
/// are terminal. Staying in the same status is always allowed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AppointmentStatus {
    #[default]
    Pendiente,
    Confirmada,
    Cancelada,
    Completada,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pendiente,
        AppointmentStatus::Confirmada,
        AppointmentStatus::Cancelada,
        AppointmentStatus::Completada,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Cancelada | AppointmentStatus::Completada)
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self == next
            || matches!(
                (self, next),
                (AppointmentStatus::Pendiente, AppointmentStatus::Confirmada)
                    | (AppointmentStatus::Pendiente, AppointmentStatus::Cancelada)
                    | (AppointmentStatus::Confirmada, AppointmentStatus::Completada)
                    | (AppointmentStatus::Confirmada, AppointmentStatus::Cancelada)
            )
    }

    /// Parses caller input (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Result<Self, String> {
        Self::from_str(value.trim()).map_err(|_| {
            let known: Vec<String> = Self::ALL.iter().map(ToString::to_string).collect();
            format!(
                "Estado de cita desconocido: '{}'. Valores permitidos: {}",
                value.trim(),
                known.join(", ")
            )
        })
    }
}

/// A persisted `cita` row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Appointment {
    pub id: i32,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub user_id: i32,
    pub service_id: i32,
    pub professional_id: i32,
}

/// An appointment joined with the display names of its three parents.
/// `professional_name` is the name of the user owning the professional profile.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AppointmentRecord {
    pub id: i32,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub user_id: i32,
    pub user_name: String,
    pub service_id: i32,
    pub service_name: String,
    pub professional_id: i32,
    pub professional_name: String,
}

/// Relation-free projection of an appointment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
}

impl AppointmentDraft {
    /// Completes the draft with references the caller has already resolved.
    pub fn attach(self, refs: AppointmentRefs) -> NewAppointment {
        NewAppointment {
            scheduled_at: self.scheduled_at,
            status: self.status,
            user_id: refs.user_id,
            service_id: refs.service_id,
            professional_id: refs.professional_id,
        }
    }
}

/// Ids of the three parents of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentRefs {
    pub user_id: i32,
    pub service_id: i32,
    pub professional_id: i32,
}

/// An appointment draft with all three references resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub user_id: i32,
    pub service_id: i32,
    pub professional_id: i32,
}

/// Create/update payload for `/api/citas`. Display-name fields sent back
/// by clients are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(rename = "fechaHora", default)]
    pub scheduled_at: Option<NaiveDateTime>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<i32>,
    #[serde(rename = "servicioId", default)]
    pub service_id: Option<i32>,
    #[serde(rename = "profesionalId", default)]
    pub professional_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDto {
    pub id: i32,
    #[serde(rename = "fechaHora")]
    pub scheduled_at: NaiveDateTime,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
    #[serde(rename = "usuarioId")]
    pub user_id: i32,
    #[serde(rename = "usuarioNombre")]
    pub user_name: String,
    #[serde(rename = "servicioId")]
    pub service_id: i32,
    #[serde(rename = "servicioNombre")]
    pub service_name: String,
    #[serde(rename = "profesionalId")]
    pub professional_id: i32,
    #[serde(rename = "profesionalNombre")]
    pub professional_name: String,
}

/// `GET /api/citas/rango?inicio=&fin=`
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeParams {
    #[serde(rename = "inicio")]
    pub start: NaiveDateTime,
    #[serde(rename = "fin")]
    pub end: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pendiente);
        assert_eq!(AppointmentStatus::default().to_string(), "PENDIENTE");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AppointmentStatus::parse("confirmada"), Ok(AppointmentStatus::Confirmada));
        assert_eq!(AppointmentStatus::parse(" Cancelada "), Ok(AppointmentStatus::Cancelada));
        assert_eq!(AppointmentStatus::parse("COMPLETADA"), Ok(AppointmentStatus::Completada));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let message = AppointmentStatus::parse("EN_CURSO").unwrap_err();
        assert!(message.contains("EN_CURSO"));
        assert!(message.contains("PENDIENTE"));
        assert!(AppointmentStatus::parse("").is_err());
    }

    #[test]
    fn test_transitions() {
        use AppointmentStatus::{Cancelada, Completada, Confirmada, Pendiente};

        assert!(Pendiente.can_transition_to(Confirmada));
        assert!(Pendiente.can_transition_to(Cancelada));
        assert!(!Pendiente.can_transition_to(Completada));
        assert!(Confirmada.can_transition_to(Completada));
        assert!(Confirmada.can_transition_to(Cancelada));
        assert!(!Confirmada.can_transition_to(Pendiente));
        assert!(!Cancelada.can_transition_to(Pendiente));
        assert!(!Completada.can_transition_to(Cancelada));
    }

    #[test]
    fn test_same_status_always_allowed() {
        for status in AppointmentStatus::ALL {
            assert!(status.can_transition_to(status));
        }
        assert!(AppointmentStatus::Cancelada.is_terminal());
        assert!(AppointmentStatus::Completada.is_terminal());
        assert!(!AppointmentStatus::Pendiente.is_terminal());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&AppointmentStatus::Confirmada).unwrap();
        assert_eq!(json, "\"CONFIRMADA\"");
    }
}
