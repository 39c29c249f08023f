use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A persisted `profesional` row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Professional {
    pub id: i32,
    pub specialty: String,
    pub available_at: Option<NaiveDateTime>,
    pub user_id: i32,
}

/// A professional joined with its owning user.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProfessionalRecord {
    pub id: i32,
    pub specialty: String,
    pub available_at: Option<NaiveDateTime>,
    pub user_id: i32,
    pub user_name: String,
}

/// Relation-free projection of a professional payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfessionalDraft {
    pub specialty: String,
    pub available_at: Option<NaiveDateTime>,
}

impl ProfessionalDraft {
    /// Completes the draft with an owner the caller has already resolved.
    pub fn attach(self, user_id: i32) -> NewProfessional {
        NewProfessional {
            specialty: self.specialty,
            available_at: self.available_at,
            user_id,
        }
    }
}

/// A professional draft with its owner resolved, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfessional {
    pub specialty: String,
    pub available_at: Option<NaiveDateTime>,
    pub user_id: i32,
}

/// Create/update payload for `/api/profesionales`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalRequest {
    #[serde(rename = "especialidad", default)]
    pub specialty: Option<String>,
    #[serde(rename = "horarioDisponible", default)]
    pub available_at: Option<NaiveDateTime>,
    #[serde(rename = "usuarioId", default)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalDto {
    pub id: i32,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "horarioDisponible")]
    pub available_at: Option<NaiveDateTime>,
    #[serde(rename = "usuarioId")]
    pub user_id: i32,
    #[serde(rename = "usuarioNombre")]
    pub user_name: String,
}
