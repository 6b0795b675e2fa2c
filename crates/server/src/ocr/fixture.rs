//! Recognizers that do not look at the image

use std::path::Path;

use ecare_core::GatewayError;

use super::{TextFragment, TextRecognizer};

/// Sample complete blood count report used by the `sample` fixture
pub const SAMPLE_REPORT: &str = "Patient Name: User
Date: 2025-02-20
Test: Complete Blood Count (CBC)
Hemoglobin (Hb): 13.5 g/dL
White Blood Cell (WBC): 7,500 /μL
Red Blood Cell (RBC): 4.8 million/μL
Platelet Count: 250,000 /μL
Fasting Blood Sugar: 95 mg/dL
Total Cholesterol: 210 mg/dL
HDL Cholesterol: 55 mg/dL
LDL Cholesterol: 130 mg/dL
Doctor: Dr. Silva
Hospital: Narammala Channel Centre";

/// Returns the same text for every non-empty upload
#[derive(Debug, Clone)]
pub struct FixtureRecognizer {
    text: String,
}

impl FixtureRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_REPORT)
    }

    /// Load the fixture text from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Recognition(format!(
                "Failed to read OCR fixture {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(text.trim_end()))
    }
}

impl TextRecognizer for FixtureRecognizer {
    fn recognize(&self, _image: &[u8]) -> Result<Vec<TextFragment>, GatewayError> {
        Ok(vec![TextFragment::new(self.text.clone())])
    }
}

/// Stand-in when no engine is available; every call fails
#[derive(Debug, Clone, Copy)]
pub struct UnavailableRecognizer;

impl TextRecognizer for UnavailableRecognizer {
    fn recognize(&self, _image: &[u8]) -> Result<Vec<TextFragment>, GatewayError> {
        Err(GatewayError::Recognition(
            "OCR engine not available (build with the `ocr` feature or set OCR_FIXTURE)"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fixture_file() {
        let err = FixtureRecognizer::from_file("/nonexistent/fixture.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fixture.txt"));
    }

    #[test]
    fn test_unavailable_fails() {
        assert!(matches!(
            UnavailableRecognizer.recognize(b"img"),
            Err(GatewayError::Recognition(_))
        ));
    }
}
