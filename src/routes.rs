use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{appointments, catalog, health_check, professionals, users},
    state::AppState,
};

/// Builds the full `/api` router with request tracing and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(user_routes())
        .merge(service_routes())
        .merge(professional_routes())
        .merge(appointment_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/usuarios", get(users::list_users).post(users::register_user))
        .route(
            "/api/usuarios/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route("/api/usuarios/email/{email}", get(users::get_user_by_email))
}

fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/api/servicios", get(catalog::list_services).post(catalog::create_service))
        .route(
            "/api/servicios/{id}",
            get(catalog::get_service)
                .put(catalog::update_service)
                .delete(catalog::delete_service),
        )
        .route("/api/servicios/buscar", get(catalog::search_services))
        .route("/api/servicios/precio", get(catalog::list_services_by_price))
}

fn professional_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/profesionales",
            get(professionals::list_professionals).post(professionals::create_professional),
        )
        .route(
            "/api/profesionales/{id}",
            get(professionals::get_professional)
                .put(professionals::update_professional)
                .delete(professionals::delete_professional),
        )
        .route(
            "/api/profesionales/especialidad/{especialidad}",
            get(professionals::list_by_specialty),
        )
        .route("/api/profesionales/usuario/{usuario_id}", get(professionals::list_by_user))
}

fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/citas",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/api/citas/{id}",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route("/api/citas/usuario/{usuario_id}", get(appointments::list_by_user))
        .route(
            "/api/citas/usuario/{usuario_id}/estado/{estado}",
            get(appointments::list_by_user_and_status),
        )
        .route(
            "/api/citas/profesional/{profesional_id}",
            get(appointments::list_by_professional),
        )
        .route("/api/citas/servicio/{servicio_id}", get(appointments::list_by_service))
        .route("/api/citas/estado/{estado}", get(appointments::list_by_status))
        .route("/api/citas/rango", get(appointments::list_between))
}
