//! Service information endpoint

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "NCC eCare AI Backend";

/// Endpoints advertised on `/`
pub const ENDPOINTS: &[&str] = &[
    "POST /api/explain",
    "POST /api/ocr",
    "GET /api/suggest-doctor",
    "POST /api/predict-disease",
];

/// Service information response
#[derive(Serialize)]
pub struct ServiceInfo {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    endpoints: &'static [&'static str],
}

/// GET / - Describe the service and its endpoints
pub async fn get() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "running",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    })
}
