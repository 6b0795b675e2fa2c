//! Report explanation and disease prediction endpoints

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use ecare_core::{DiseasePrediction, Explanation, GatewayError};
use serde::Deserialize;

use crate::ai;
use crate::error::{ApiResponse, rejection};
use crate::state::AppState;

/// Request body for report explanation
#[derive(Deserialize)]
pub struct ReportTextRequest {
    text: String,
}

/// Request body for disease prediction
#[derive(Deserialize)]
pub struct SymptomsRequest {
    symptoms: String,
}

/// POST /api/explain - Explain medical report text in plain language
pub async fn explain(
    State(state): State<AppState>,
    body: Result<Json<ReportTextRequest>, JsonRejection>,
) -> ApiResponse<Explanation> {
    ApiResponse::from_result("explain", explain_inner(&state, body).await)
}

async fn explain_inner(
    state: &AppState,
    body: Result<Json<ReportTextRequest>, JsonRejection>,
) -> Result<Explanation, GatewayError> {
    let Json(body) = body.map_err(rejection)?;
    ai::explain::explain_report(state.llm()?, &body.text).await
}

/// POST /api/predict-disease - Predict a likely condition from symptoms
pub async fn predict_disease(
    State(state): State<AppState>,
    body: Result<Json<SymptomsRequest>, JsonRejection>,
) -> ApiResponse<DiseasePrediction> {
    ApiResponse::from_result("predict-disease", predict_inner(&state, body).await)
}

async fn predict_inner(
    state: &AppState,
    body: Result<Json<SymptomsRequest>, JsonRejection>,
) -> Result<DiseasePrediction, GatewayError> {
    let Json(body) = body.map_err(rejection)?;
    ai::predict::predict_disease(state.llm()?, &body.symptoms).await
}
