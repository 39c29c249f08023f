use crate::DbConn;
use crate::{
    error::{Error, Result},
    mapping::to_service_dto,
    models::catalog::{NewService, ServiceDto, ServiceRequest},
    queries::catalog,
    validation::{FieldErrors, sanitize_optional, sanitize_string, validate_max_length, validate_price},
};

pub fn service_not_found(id: i32) -> Error {
    Error::NotFound(format!("Servicio no encontrado con ID: {}", id))
}

fn validate_service(request: ServiceRequest) -> Result<NewService> {
    let mut errors = FieldErrors::new();

    let name = errors.required_text("nombre", request.name, "El nombre del servicio es obligatorio");
    if let Some(name) = &name {
        errors.check(
            "nombre",
            validate_max_length(name, 255, "El nombre no puede exceder 255 caracteres"),
        );
    }

    let description = sanitize_optional(request.description);
    if let Some(description) = &description {
        errors.check(
            "descripcion",
            validate_max_length(description, 1000, "La descripción no puede exceder 1000 caracteres"),
        );
    }

    let duration = sanitize_optional(request.duration);
    if let Some(duration) = &duration {
        errors.check(
            "duracion",
            validate_max_length(duration, 255, "La duración no puede exceder 255 caracteres"),
        );
    }

    let price = errors.required("precio", request.price, "El precio es obligatorio");
    if let Some(price) = price {
        errors.check("precio", validate_price(price));
    }

    errors.finish(|| {
        Some(NewService {
            name: name?,
            description,
            duration,
            price: price?,
        })
    })
}

pub async fn create_service(conn: &mut DbConn, request: ServiceRequest) -> Result<ServiceDto> {
    let new_service = validate_service(request)?;
    tracing::debug!(name = %new_service.name, "Creating service");

    let service = catalog::create_service(conn, &new_service).await?;

    tracing::info!(service_id = service.id, "Service created");
    Ok(to_service_dto(&service))
}

pub async fn get_service(conn: &mut DbConn, id: i32) -> Result<ServiceDto> {
    tracing::debug!(service_id = id, "Fetching service");
    let service = catalog::get_service_by_id(conn, id)
        .await?
        .ok_or_else(|| service_not_found(id))?;

    Ok(to_service_dto(&service))
}

pub async fn list_services(conn: &mut DbConn) -> Result<Vec<ServiceDto>> {
    let services = catalog::list_services(conn).await?;
    Ok(services.iter().map(to_service_dto).collect())
}

/// Case-insensitive substring search on the name. No match is an empty list.
pub async fn search_services(conn: &mut DbConn, fragment: &str) -> Result<Vec<ServiceDto>> {
    let fragment = sanitize_string(fragment);
    tracing::debug!(fragment = %fragment, "Searching services");

    let services = catalog::search_services_by_name(conn, &fragment).await?;
    Ok(services.iter().map(to_service_dto).collect())
}

/// Services priced within `min..=max`.
pub async fn list_services_by_price(conn: &mut DbConn, min: f64, max: f64) -> Result<Vec<ServiceDto>> {
    if !min.is_finite() || !max.is_finite() {
        return Err(Error::validation("min", "El rango de precios debe contener valores numéricos"));
    }
    if min > max {
        return Err(Error::validation(
            "min",
            "El precio mínimo no puede ser mayor que el precio máximo",
        ));
    }

    let services = catalog::list_services_by_price(conn, min, max).await?;
    Ok(services.iter().map(to_service_dto).collect())
}

/// Full-field replace of a service.
pub async fn update_service(conn: &mut DbConn, id: i32, request: ServiceRequest) -> Result<ServiceDto> {
    let fields = validate_service(request)?;
    tracing::debug!(service_id = id, "Updating service");

    let service = catalog::update_service(conn, id, &fields)
        .await?
        .ok_or_else(|| service_not_found(id))?;

    tracing::info!(service_id = id, "Service updated");
    Ok(to_service_dto(&service))
}

/// Deletes a service and every appointment booked for it.
pub async fn delete_service(conn: &mut DbConn, id: i32) -> Result<()> {
    tracing::debug!(service_id = id, "Deleting service");
    if catalog::delete_service(conn, id).await? == 0 {
        return Err(service_not_found(id));
    }

    tracing::info!(service_id = id, "Service deleted");
    Ok(())
}
