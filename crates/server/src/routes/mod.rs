pub mod doctors;
pub mod explain;
pub mod health;
pub mod metrics;
pub mod ocr;
pub mod root;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the `/api` routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/explain", post(explain::explain))
        .route("/ocr", post(ocr::extract))
        .route("/suggest-doctor", get(doctors::suggest))
        .route("/predict-disease", post(explain::predict_disease))
}
