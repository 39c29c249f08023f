//! Shared request builders for the service and HTTP tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use citas::models::{
    appointments::AppointmentRequest, catalog::ServiceRequest, professionals::ProfessionalRequest,
    users::RegisterUser,
};

use crate::common::TestDb;

pub const TEST_PASSWORD: &str = "ClaveSegura2025";

/// 2025-06-`day` at `hour`:00.
pub fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid test timestamp")
}

pub fn register_request(db: &TestDb, tag: &str) -> RegisterUser {
    RegisterUser {
        name: Some(format!("Usuario {}", tag)),
        email: Some(db.email(tag)),
        password: Some(TEST_PASSWORD.to_string()),
        phone: Some("+57 300 123 4567".to_string()),
    }
}

pub fn service_request(db: &TestDb, tag: &str, price: f64) -> ServiceRequest {
    ServiceRequest {
        name: Some(db.name(tag)),
        description: Some("Sesión uno a uno".to_string()),
        duration: Some("50 minutos".to_string()),
        price: Some(price),
    }
}

pub fn professional_request(specialty: &str, user_id: i32) -> ProfessionalRequest {
    ProfessionalRequest {
        specialty: Some(specialty.to_string()),
        available_at: Some(timestamp(1, 8)),
        user_id: Some(user_id),
    }
}

pub fn appointment_request(
    scheduled_at: NaiveDateTime,
    user_id: i32,
    service_id: i32,
    professional_id: i32,
) -> AppointmentRequest {
    AppointmentRequest {
        scheduled_at: Some(scheduled_at),
        status: None,
        user_id: Some(user_id),
        service_id: Some(service_id),
        professional_id: Some(professional_id),
    }
}
