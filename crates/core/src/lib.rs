//! ecare-core: domain types and pure logic for the eCare AI gateway
//!
//! Holds the specialization classifier, prompt templates, the doctor record,
//! the response envelope and the error taxonomy. Nothing here performs I/O.

pub mod doctor;
pub mod envelope;
pub mod error;
pub mod prompt;
pub mod specialization;

pub use doctor::{DoctorRecord, specialization_pattern};
pub use envelope::{DiseasePrediction, DoctorList, Envelope, Explanation, ExtractedText, Payload};
pub use error::GatewayError;
pub use prompt::{PromptError, PromptTemplate, disease_predict_prompt, report_explain_prompt};
pub use specialization::{Specialization, UnknownSpecialization};
