//! Shared application context handed to every handler

use std::sync::Arc;

use ecare_core::GatewayError;

use crate::ai::{ChatCompletion, HuggingFaceClient};
use crate::config::Config;
use crate::db::{self, DoctorDirectory, PgDoctorDirectory};
use crate::ocr::{self, TextRecognizer};

/// Read-only clients built once at startup
#[derive(Clone)]
pub struct AppState {
    llm: Option<Arc<dyn ChatCompletion>>,
    ocr: Arc<dyn TextRecognizer>,
    doctors: Arc<dyn DoctorDirectory>,
}

impl AppState {
    pub fn new(
        llm: Option<Arc<dyn ChatCompletion>>,
        ocr: Arc<dyn TextRecognizer>,
        doctors: Arc<dyn DoctorDirectory>,
    ) -> Self {
        Self { llm, ocr, doctors }
    }

    /// Build the production clients from configuration
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        // None if HUGGINGFACE_API_KEY not set
        let llm = match &config.llm.api_key {
            Some(key) => Some(Arc::new(HuggingFaceClient::new(key.clone(), &config.llm)?)
                as Arc<dyn ChatCompletion>),
            None => None,
        };

        let ocr = ocr::recognizer_from_config(&config.ocr)?;

        let doctors = Arc::new(PgDoctorDirectory::new(
            db::pg_config(&config.database)?,
            config.database.timeout,
        ));

        Ok(Self::new(llm, ocr, doctors))
    }

    /// The LLM client, or a provider error when no API key was configured
    pub fn llm(&self) -> Result<&dyn ChatCompletion, GatewayError> {
        self.llm
            .as_deref()
            .ok_or_else(|| GatewayError::Provider("HUGGINGFACE_API_KEY not configured".to_string()))
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub fn ocr(&self) -> Arc<dyn TextRecognizer> {
        Arc::clone(&self.ocr)
    }

    pub fn doctors(&self) -> &dyn DoctorDirectory {
        self.doctors.as_ref()
    }
}
