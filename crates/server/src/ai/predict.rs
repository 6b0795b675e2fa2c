//! Disease prediction from free-text symptoms

use ecare_core::{DiseasePrediction, GatewayError, Specialization, disease_predict_prompt};
use serde::Deserialize;

use super::client::ChatCompletion;

/// Prediction as the model returns it, before the label is checked
#[derive(Debug, Deserialize)]
struct RawPrediction {
    disease: String,
    explanation: String,
    #[serde(default)]
    specialization: Option<String>,
}

/// Ask the model for the most likely condition behind `symptoms`
pub async fn predict_disease(
    llm: &dyn ChatCompletion,
    symptoms: &str,
) -> Result<DiseasePrediction, GatewayError> {
    let prompt = disease_predict_prompt(symptoms)?;
    let reply = llm.complete(&prompt).await?;

    let prediction = parse_prediction(&reply, symptoms)?;
    tracing::info!(
        disease = %prediction.disease,
        specialization = %prediction.specialization,
        "Disease predicted"
    );

    Ok(prediction)
}

/// Parse the model reply. An unknown or missing specialization falls back to
/// the keyword classifier.
fn parse_prediction(reply: &str, symptoms: &str) -> Result<DiseasePrediction, GatewayError> {
    let json_str = extract_json(reply)?;
    let raw: RawPrediction = serde_json::from_str(&json_str)
        .map_err(|e| GatewayError::Provider(format!("Failed to parse prediction: {}", e)))?;

    let specialization = match raw.specialization.as_deref().map(str::parse::<Specialization>) {
        Some(Ok(spec)) => spec,
        _ => {
            let detected = Specialization::detect(symptoms);
            tracing::warn!(
                returned = raw.specialization.as_deref().unwrap_or("<none>"),
                fallback = %detected,
                "Model returned no usable specialization"
            );
            detected
        }
    };

    Ok(DiseasePrediction {
        disease: raw.disease.trim().to_string(),
        explanation: raw.explanation.trim().to_string(),
        specialization,
    })
}

/// Extract a JSON object from text that might contain markdown code blocks
fn extract_json(text: &str) -> Result<String, GatewayError> {
    let trimmed = text.trim();

    // Direct JSON object
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    // Wrapped in ```json ... ```
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return Ok(after[..end].trim().to_string());
        }
    }

    // Wrapped in ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            return Ok(after[..end].trim().to_string());
        }
    }

    // Object embedded in prose
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Ok(trimmed[start..=end].to_string());
        }
    }

    Err(GatewayError::Provider(format!(
        "Could not extract JSON from response: {}",
        trimmed
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_reply() {
        let reply = r#"{"disease": "Migraine", "explanation": "Recurring headaches.", "specialization": "Neurology"}"#;
        let prediction = parse_prediction(reply, "headache").unwrap();
        assert_eq!(prediction.disease, "Migraine");
        assert_eq!(prediction.specialization, Specialization::Neurology);
    }

    #[test]
    fn test_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"disease\": \"Sinusitis\", \"explanation\": \"Blocked sinuses.\", \"specialization\": \"ent\"}\n```";
        let prediction = parse_prediction(reply, "blocked nose").unwrap();
        assert_eq!(prediction.specialization, Specialization::Ent);
    }

    #[test]
    fn test_unknown_label_falls_back_to_classifier() {
        let reply = r#"{"disease": "Angina", "explanation": "Reduced blood flow.", "specialization": "Heart Surgery"}"#;
        let prediction = parse_prediction(reply, "chest pain when walking").unwrap();
        assert_eq!(prediction.specialization, Specialization::Cardiology);

        let reply = r#"{"disease": "Flu", "explanation": "Viral infection."}"#;
        let prediction = parse_prediction(reply, "fever and chills").unwrap();
        assert_eq!(prediction.specialization, Specialization::General);
    }

    #[test]
    fn test_prose_with_embedded_object() {
        let reply = r#"Sure. {"disease": "Asthma", "explanation": "Narrowed airways.", "specialization": "Pulmonology"} Hope this helps."#;
        let prediction = parse_prediction(reply, "wheezing").unwrap();
        assert_eq!(prediction.disease, "Asthma");
    }

    #[test]
    fn test_unparseable_reply() {
        assert!(matches!(
            parse_prediction("I cannot help with that.", "cough"),
            Err(GatewayError::Provider(_))
        ));
        assert!(matches!(
            parse_prediction(r#"{"disease": 3}"#, "cough"),
            Err(GatewayError::Provider(_))
        ));
    }
}
