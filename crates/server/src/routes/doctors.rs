//! Doctor suggestion by specialization

use axum::extract::{Query, State, rejection::QueryRejection};
use ecare_core::{DoctorList, GatewayError, Specialization};
use serde::Deserialize;

use crate::error::{ApiResponse, rejection};
use crate::state::AppState;

/// Query parameters for doctor suggestion
#[derive(Debug, Deserialize, Default)]
pub struct SuggestParams {
    pub specialization: Option<String>,
    pub symptoms: Option<String>,
}

impl SuggestParams {
    /// Explicit specialization, else the one classified from symptoms,
    /// else `General`
    fn resolve(&self) -> String {
        if let Some(spec) = self.specialization.as_deref().filter(|s| !s.trim().is_empty()) {
            return spec.trim().to_string();
        }
        match &self.symptoms {
            Some(symptoms) => Specialization::detect(symptoms).to_string(),
            None => Specialization::General.to_string(),
        }
    }
}

/// GET /api/suggest-doctor - List doctors matching a specialization
pub async fn suggest(
    State(state): State<AppState>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> ApiResponse<DoctorList> {
    let result = match params {
        Ok(Query(params)) => suggest_inner(&state, &params).await,
        Err(e) => Err(rejection(e)),
    };
    ApiResponse::from_result("suggest-doctor", result)
}

async fn suggest_inner(
    state: &AppState,
    params: &SuggestParams,
) -> Result<DoctorList, GatewayError> {
    let specialization = params.resolve();
    let doctors = state
        .doctors()
        .find_by_specialization(&specialization)
        .await?;

    tracing::info!(
        specialization = %specialization,
        found = doctors.len(),
        "Doctor lookup"
    );

    Ok(DoctorList {
        doctors,
        specialization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(specialization: Option<&str>, symptoms: Option<&str>) -> SuggestParams {
        SuggestParams {
            specialization: specialization.map(str::to_string),
            symptoms: symptoms.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(params(None, None).resolve(), "General");
        assert_eq!(params(Some("cardio"), None).resolve(), "cardio");
        assert_eq!(params(None, Some("skin rash")).resolve(), "Dermatology");
        assert_eq!(
            params(Some("Neurology"), Some("skin rash")).resolve(),
            "Neurology"
        );
        assert_eq!(params(Some("  "), Some("cough")).resolve(), "Pulmonology");
    }
}
