//! Text recognition over uploaded images
//!
//! Engines sit behind [`TextRecognizer`] so the real Tesseract binding can be
//! swapped for a fixed fixture in tests or on hosts without libtesseract.

mod fixture;
#[cfg(feature = "ocr")]
mod tesseract;
#[cfg_attr(not(feature = "ocr"), allow(dead_code))]
mod tsv;

pub use fixture::{FixtureRecognizer, SAMPLE_REPORT, UnavailableRecognizer};
#[cfg(feature = "ocr")]
pub use tesseract::TesseractRecognizer;

use std::sync::Arc;

use axum::body::Bytes;
use ecare_core::GatewayError;

use crate::config::OcrConfig;

/// Position of a recognized fragment on the page, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One piece of recognized text
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    /// 0.0 to 1.0
    pub confidence: f32,
    pub bounding_box: Option<BoundingBox>,
}

impl TextFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            bounding_box: None,
        }
    }
}

/// OCR engine abstraction. Implementations block, callers run them on the
/// blocking pool.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text fragments in reading order
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextFragment>, GatewayError>;
}

/// Run recognition on `image` and join the fragments with single spaces.
///
/// An empty upload yields an empty string without touching the engine.
pub async fn extract_text(
    recognizer: Arc<dyn TextRecognizer>,
    image: Bytes,
) -> Result<String, GatewayError> {
    if image.is_empty() {
        return Ok(String::new());
    }

    let fragments = tokio::task::spawn_blocking(move || recognizer.recognize(&image))
        .await
        .map_err(|e| GatewayError::Recognition(format!("OCR task failed: {}", e)))??;

    Ok(join_fragments(&fragments))
}

/// Concatenate fragment texts in engine order
pub fn join_fragments(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick the recognizer for this process.
///
/// A configured fixture always wins. Otherwise Tesseract is used when the
/// crate was built with the `ocr` feature.
pub fn recognizer_from_config(config: &OcrConfig) -> Result<Arc<dyn TextRecognizer>, GatewayError> {
    if let Some(fixture) = &config.fixture {
        let recognizer = if fixture == "sample" {
            FixtureRecognizer::sample()
        } else {
            FixtureRecognizer::from_file(fixture)?
        };
        tracing::warn!(fixture = %fixture, "OCR fixture enabled, uploads are not recognized");
        return Ok(Arc::new(recognizer));
    }

    engine(config)
}

#[cfg(feature = "ocr")]
fn engine(config: &OcrConfig) -> Result<Arc<dyn TextRecognizer>, GatewayError> {
    let recognizer = TesseractRecognizer::new(config.tessdata_dir.clone(), &config.language)?;
    tracing::info!(language = %config.language, "Tesseract OCR enabled");
    Ok(Arc::new(recognizer))
}

#[cfg(not(feature = "ocr"))]
fn engine(_config: &OcrConfig) -> Result<Arc<dyn TextRecognizer>, GatewayError> {
    tracing::warn!("Built without the `ocr` feature and no OCR_FIXTURE set, OCR disabled");
    Ok(Arc::new(UnavailableRecognizer))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Words(Vec<&'static str>);

    impl TextRecognizer for Words {
        fn recognize(&self, _image: &[u8]) -> Result<Vec<TextFragment>, GatewayError> {
            Ok(self.0.iter().map(|w| TextFragment::new(*w)).collect())
        }
    }

    struct Broken;

    impl TextRecognizer for Broken {
        fn recognize(&self, _image: &[u8]) -> Result<Vec<TextFragment>, GatewayError> {
            Err(GatewayError::Recognition("unsupported image format".to_string()))
        }
    }

    #[tokio::test]
    async fn test_fragments_joined_in_order() {
        let recognizer = Arc::new(Words(vec!["Hemoglobin:", "13.5", "g/dL"]));
        let text = extract_text(recognizer, Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(text, "Hemoglobin: 13.5 g/dL");
    }

    #[tokio::test]
    async fn test_empty_image_is_empty_text() {
        let text = extract_text(Arc::new(Broken), Bytes::new()).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let err = extract_text(Arc::new(Broken), Bytes::from_static(b"garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Recognition(_)));
    }

    #[test]
    fn test_no_fragments() {
        assert_eq!(join_fragments(&[]), "");
    }

    #[test]
    fn test_sample_fixture_from_config() {
        let config = OcrConfig {
            tessdata_dir: None,
            language: "eng".to_string(),
            fixture: Some("sample".to_string()),
        };
        let recognizer = recognizer_from_config(&config).unwrap();
        let fragments = recognizer.recognize(b"anything").unwrap();
        assert_eq!(join_fragments(&fragments), SAMPLE_REPORT);
    }
}
