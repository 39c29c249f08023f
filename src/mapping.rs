//! Conversions between persisted records and transfer shapes.
//!
//! Every function here is pure. Outward projections drop the password
//! hash. Inward projections never populate relationships: they produce a
//! draft that the owning service completes once it has resolved the
//! referenced rows itself.

use chrono::NaiveDateTime;

use crate::models::{
    appointments::{AppointmentDraft, AppointmentDto, AppointmentRecord, AppointmentStatus},
    catalog::{Service, ServiceDto},
    professionals::{ProfessionalDraft, ProfessionalDto, ProfessionalRecord},
    users::{User, UserDraft, UserDto},
};

pub fn to_user_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        registered_at: user.registered_at,
        role: user.role.clone(),
    }
}

pub fn to_user_draft(dto: &UserDto) -> UserDraft {
    UserDraft {
        id: dto.id,
        name: dto.name.clone(),
        email: dto.email.clone(),
        phone: dto.phone.clone(),
        registered_at: dto.registered_at,
        role: dto.role.clone(),
    }
}

pub fn to_service_dto(service: &Service) -> ServiceDto {
    ServiceDto {
        id: service.id,
        name: service.name.clone(),
        description: service.description.clone(),
        duration: service.duration.clone(),
        price: service.price,
    }
}

pub fn to_professional_dto(record: &ProfessionalRecord) -> ProfessionalDto {
    ProfessionalDto {
        id: record.id,
        specialty: record.specialty.clone(),
        available_at: record.available_at,
        user_id: record.user_id,
        user_name: record.user_name.clone(),
    }
}

pub fn to_professional_draft(specialty: String, available_at: Option<NaiveDateTime>) -> ProfessionalDraft {
    ProfessionalDraft {
        specialty,
        available_at,
    }
}

/// The professional's display name comes from the user that owns the profile.
pub fn to_appointment_dto(record: &AppointmentRecord) -> AppointmentDto {
    AppointmentDto {
        id: record.id,
        scheduled_at: record.scheduled_at,
        status: record.status,
        user_id: record.user_id,
        user_name: record.user_name.clone(),
        service_id: record.service_id,
        service_name: record.service_name.clone(),
        professional_id: record.professional_id,
        professional_name: record.professional_name.clone(),
    }
}

pub fn to_appointment_draft(scheduled_at: NaiveDateTime, status: AppointmentStatus) -> AppointmentDraft {
    AppointmentDraft {
        scheduled_at,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(hour, 30, 0))
            .unwrap()
    }

    fn sample_user() -> User {
        User {
            id: 7,
            name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            phone: Some("3001234567".to_string()),
            registered_at: timestamp(9),
            role: "SUPERADMIN".to_string(),
        }
    }

    #[test]
    fn test_user_dto_never_contains_password() {
        let user = sample_user();
        let dto = to_user_dto(&user);
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
        assert_eq!(json["nombre"], "Ana Pérez");
        assert_eq!(json["fechaRegistro"], "2025-03-14T09:30:00");
    }

    #[test]
    fn test_user_round_trip_restores_all_other_fields() {
        let user = sample_user();
        let restored = to_user_draft(&to_user_dto(&user)).with_password_hash(user.password_hash.clone());
        assert_eq!(restored, user);
    }

    #[test]
    fn test_missing_records_map_to_nothing() {
        let none: Option<&User> = None;
        assert!(none.map(to_user_dto).is_none());
    }

    #[test]
    fn test_service_dto_fields() {
        let service = Service {
            id: 1,
            name: "Terapia individual".to_string(),
            description: Some("Sesión uno a uno".to_string()),
            duration: Some("50 minutos".to_string()),
            price: 50.0,
        };
        let json = serde_json::to_value(to_service_dto(&service)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["nombre"], "Terapia individual");
        assert_eq!(json["descripcion"], "Sesión uno a uno");
        assert_eq!(json["duracion"], "50 minutos");
        assert_eq!(json["precio"], 50.0);
    }

    #[test]
    fn test_professional_dto_uses_owner_name() {
        let record = ProfessionalRecord {
            id: 3,
            specialty: "Clínica".to_string(),
            available_at: Some(timestamp(8)),
            user_id: 7,
            user_name: "Ana Pérez".to_string(),
        };
        let dto = to_professional_dto(&record);
        assert_eq!(dto.user_id, 7);
        assert_eq!(dto.user_name, "Ana Pérez");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["especialidad"], "Clínica");
        assert_eq!(json["usuarioId"], 7);
    }

    #[test]
    fn test_appointment_dto_names() {
        let record = AppointmentRecord {
            id: 11,
            scheduled_at: timestamp(15),
            status: AppointmentStatus::Pendiente,
            user_id: 2,
            user_name: "Carlos Ruiz".to_string(),
            service_id: 1,
            service_name: "Terapia individual".to_string(),
            professional_id: 3,
            professional_name: "Ana Pérez".to_string(),
        };
        let dto = to_appointment_dto(&record);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["estado"], "PENDIENTE");
        assert_eq!(json["usuarioNombre"], "Carlos Ruiz");
        assert_eq!(json["servicioNombre"], "Terapia individual");
        assert_eq!(json["profesionalNombre"], "Ana Pérez");
        assert_eq!(json["fechaHora"], "2025-03-14T15:30:00");
    }

    #[test]
    fn test_drafts_carry_no_relations() {
        let draft = to_appointment_draft(timestamp(10), AppointmentStatus::Confirmada);
        assert_eq!(draft.status, AppointmentStatus::Confirmada);
        assert_eq!(draft.scheduled_at, timestamp(10));

        let professional = to_professional_draft("Familiar".to_string(), None);
        assert_eq!(professional.specialty, "Familiar");
        assert!(professional.available_at.is_none());
    }
}
