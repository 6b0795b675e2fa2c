//! Uniform `{success, ...}` response envelope
//!
//! Every endpoint answers with either `{"success": true, <payload fields>}` or
//! `{"success": false, "error": "<message>"}`. The two shapes never mix.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::doctor::DoctorRecord;
use crate::specialization::Specialization;

const FALLBACK_ERROR: &str = "Unknown error";

/// Success payload of an endpoint
pub trait Payload: Serialize {
    /// Fields that accompany a failure of this operation
    fn failure_fields() -> Vec<(&'static str, JsonValue)> {
        Vec::new()
    }
}

/// No payload, for failures raised outside an operation (rate limiting)
impl Payload for () {}

/// Outcome of one operation, ready to be sent on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure(String),
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Envelope::Success(payload)
    }

    /// Failure with `message`; an empty message is replaced so `error` is
    /// never blank.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Envelope::Failure(FALLBACK_ERROR.to_string())
        } else {
            Envelope::Failure(message)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Envelope::success(payload),
            Err(e) => Envelope::failure(e.to_string()),
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<'a, T> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

impl<T: Payload> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success(payload) => SuccessBody {
                success: true,
                payload,
            }
            .serialize(serializer),
            Envelope::Failure(error) => {
                let extra = T::failure_fields();
                let mut map = serializer.serialize_map(Some(2 + extra.len()))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                for (key, value) in &extra {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// `POST /api/explain` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub explanation: String,
}

impl Payload for Explanation {}

/// `POST /api/ocr` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
}

impl Payload for ExtractedText {}

/// `GET /api/suggest-doctor` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorList {
    pub doctors: Vec<DoctorRecord>,
    pub specialization: String,
}

impl Payload for DoctorList {
    fn failure_fields() -> Vec<(&'static str, JsonValue)> {
        vec![("doctors", JsonValue::Array(Vec::new()))]
    }
}

/// `POST /api/predict-disease` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseasePrediction {
    pub disease: String,
    pub explanation: String,
    pub specialization: Specialization,
}

impl Payload for DiseasePrediction {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_has_no_error() {
        let envelope = Envelope::success(Explanation {
            explanation: "All values normal".to_string(),
        });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "explanation": "All values normal"})
        );
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let envelope: Envelope<ExtractedText> = Envelope::failure("OCR failed: bad image");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": false, "error": "OCR failed: bad image"}));
    }

    #[test]
    fn test_failure_message_never_empty() {
        let envelope: Envelope<Explanation> = Envelope::failure("  ");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], FALLBACK_ERROR);
    }

    #[test]
    fn test_doctor_failure_keeps_empty_list() {
        let envelope: Envelope<DoctorList> = Envelope::failure("Database error: refused");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": "Database error: refused", "doctors": []})
        );
    }

    #[test]
    fn test_from_result() {
        let ok: Result<ExtractedText, String> = Ok(ExtractedText {
            text: "Hb 13.5".to_string(),
        });
        assert!(Envelope::from(ok).is_success());

        let err: Result<ExtractedText, String> = Err("boom".to_string());
        assert_eq!(Envelope::from(err), Envelope::Failure("boom".to_string()));
    }

    #[test]
    fn test_prediction_serializes_label() {
        let envelope = Envelope::success(DiseasePrediction {
            disease: "Sinusitis".to_string(),
            explanation: "Blocked sinuses.".to_string(),
            specialization: Specialization::Ent,
        });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["specialization"], "ENT");
        assert_eq!(value["success"], true);
    }
}
