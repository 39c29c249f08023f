use serde::{Deserialize, Serialize};

/// A persisted `servicio` row: a bookable offering.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: f64,
}

/// Validated fields for inserting or fully replacing a service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: f64,
}

/// Create/update payload for `/api/servicios`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "duracion", default)]
    pub duration: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDto {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "duracion")]
    pub duration: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
}

/// `GET /api/servicios/buscar?nombre=`
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSearchParams {
    #[serde(rename = "nombre", default)]
    pub name: String,
}

/// `GET /api/servicios/precio?min=&max=`
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRangeParams {
    pub min: f64,
    pub max: f64,
}
