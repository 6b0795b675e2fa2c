//! Tesseract-backed recognizer (`ocr` feature)

use std::path::PathBuf;

use ecare_core::GatewayError;

use super::tsv::parse_tsv;
use super::{TextFragment, TextRecognizer};

/// Runs libtesseract over each image. A fresh engine is created per call, so
/// the recognizer itself holds only settings.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    tessdata_dir: Option<PathBuf>,
    language: String,
}

impl TesseractRecognizer {
    /// Check the traineddata files up front so a bad setup fails at startup
    pub fn new(tessdata_dir: Option<PathBuf>, language: &str) -> Result<Self, GatewayError> {
        if let Some(dir) = &tessdata_dir {
            for lang in language.split('+') {
                let file = dir.join(format!("{}.traineddata", lang));
                if !file.exists() {
                    return Err(GatewayError::Recognition(format!(
                        "Tesseract language data not found: {}",
                        file.display()
                    )));
                }
            }
        }

        Ok(Self {
            tessdata_dir,
            language: language.to_string(),
        })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextFragment>, GatewayError> {
        let datapath = match &self.tessdata_dir {
            Some(dir) => Some(dir.to_str().ok_or_else(|| {
                GatewayError::Recognition("Invalid tessdata path".to_string())
            })?),
            None => None,
        };

        let tess = tesseract::Tesseract::new(datapath, Some(&self.language))
            .map_err(|e| GatewayError::Recognition(format!("Engine init failed: {:?}", e)))?;

        let mut tess = tess
            .set_image_from_mem(image)
            .map_err(|e| GatewayError::Recognition(format!("Unreadable image: {:?}", e)))?;

        let tsv = tess
            .get_tsv_text(0)
            .map_err(|e| GatewayError::Recognition(format!("Recognition failed: {:?}", e)))?;

        let fragments = parse_tsv(&tsv);
        tracing::debug!(words = fragments.len(), "Tesseract recognition finished");
        Ok(fragments)
    }
}
