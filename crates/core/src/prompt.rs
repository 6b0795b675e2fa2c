//! Prompt templates sent to the language model

use std::collections::HashMap;

use thiserror::Error;

use crate::specialization::Specialization;

/// Report explanation prompt. `{report_text}` is replaced with the OCR or
/// user-supplied report.
pub const REPORT_EXPLAIN_TEMPLATE: &str = r#"You are a helpful medical assistant at Narammala Channel Centre (NCC).
A patient has uploaded their medical report. The text below was extracted from the report using OCR.

Your task:
1. Read the medical report text carefully
2. Explain each test result in simple, everyday language
3. Tell the patient if their values are normal, high, or low
4. Use bullet points for clarity
5. Add a disclaimer that this is not a professional diagnosis

Important rules:
- Do NOT use complex medical terminology
- Explain as if talking to someone with no medical knowledge
- If a value is abnormal, suggest what the patient should do (e.g., "consult a doctor")
- Keep the explanation concise but informative
- Be reassuring but honest
- If it is not a medical related report, say that this is not a medical related report and do not explain it.

Medical Report Text:
{report_text}

Please provide a clear, simple explanation:"#;

/// Disease prediction prompt. `{symptoms}` is replaced with the patient's
/// description and `{specializations}` with the allowed labels.
pub const DISEASE_PREDICT_TEMPLATE: &str = r#"You are a medical triage assistant at Narammala Channel Centre (NCC).
A patient has described their symptoms below.

Respond with ONLY a single JSON object, no other text, in exactly this shape:
{"disease": "<most likely condition>", "explanation": "<why, in at most three sentences>", "specialization": "<one of the allowed specializations>"}

Rules:
- "explanation" must be at most three sentences in simple, everyday language
- "specialization" must be exactly one of: {specializations}
- End the explanation with a reminder that this is not a professional diagnosis and the patient should consult a doctor

Patient Symptoms:
{symptoms}"#;

/// Errors raised while rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("Missing template variable: {0}")]
    MissingVariable(String),

    #[error("Unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

/// One of the fixed prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    ReportExplain,
    DiseasePredict,
}

impl PromptTemplate {
    /// Raw template text
    pub fn source(&self) -> &'static str {
        match self {
            PromptTemplate::ReportExplain => REPORT_EXPLAIN_TEMPLATE,
            PromptTemplate::DiseasePredict => DISEASE_PREDICT_TEMPLATE,
        }
    }

    /// Substitute `vars` into the template.
    ///
    /// Placeholders are `{name}` where `name` is an identifier; any other
    /// brace (like the JSON example) is copied as-is. Values are inserted
    /// literally and never re-scanned.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> Result<String, PromptError> {
        let source = self.source();
        let mut out = String::with_capacity(source.len() + 256);
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..name_len];

            if name.is_empty() || !after[name_len..].starts_with('}') {
                if name_len == after.len() && !name.is_empty() {
                    return Err(PromptError::Unterminated(offset + open));
                }
                out.push('{');
                rest = after;
                offset += open + 1;
                continue;
            }

            let value = vars
                .get(name)
                .ok_or_else(|| PromptError::MissingVariable(name.to_string()))?;
            out.push_str(value);

            let consumed = open + 1 + name_len + 1;
            rest = &rest[consumed..];
            offset += consumed;
        }
        out.push_str(rest);

        Ok(out)
    }
}

/// Render the report explanation prompt
pub fn report_explain_prompt(report_text: &str) -> Result<String, PromptError> {
    PromptTemplate::ReportExplain.render(&HashMap::from([("report_text", report_text)]))
}

/// Render the disease prediction prompt
pub fn disease_predict_prompt(symptoms: &str) -> Result<String, PromptError> {
    let specializations = Specialization::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    PromptTemplate::DiseasePredict.render(&HashMap::from([
        ("symptoms", symptoms),
        ("specializations", specializations.as_str()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_prompt_embeds_text_and_rules() {
        let prompt = report_explain_prompt("Hemoglobin: 13.5 g/dL").unwrap();
        assert!(prompt.contains("Medical Report Text:\nHemoglobin: 13.5 g/dL\n"));
        assert!(prompt.contains("normal, high, or low"));
        assert!(prompt.contains("Use bullet points"));
        assert!(prompt.contains("not a professional diagnosis"));
        assert!(prompt.contains("Do NOT use complex medical terminology"));
        assert!(prompt.contains("consult a doctor"));
        assert!(prompt.contains("not a medical related report"));
        assert!(!prompt.contains("{report_text}"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = report_explain_prompt("X").unwrap();
        let second = report_explain_prompt("X").unwrap();
        assert_eq!(first, second);
        assert_ne!(first, report_explain_prompt("Y").unwrap());
    }

    #[test]
    fn test_missing_variable() {
        let err = PromptTemplate::ReportExplain
            .render(&HashMap::from([("symptoms", "cough")]))
            .unwrap_err();
        assert_eq!(err, PromptError::MissingVariable("report_text".to_string()));
    }

    #[test]
    fn test_value_is_not_reexpanded() {
        let prompt = report_explain_prompt("{report_text} and {other}").unwrap();
        assert!(prompt.contains("Medical Report Text:\n{report_text} and {other}\n"));
    }

    #[test]
    fn test_disease_prompt_keeps_json_shape() {
        let prompt = disease_predict_prompt("dry cough for a week").unwrap();
        assert!(prompt.contains(r#"{"disease": "<most likely condition>""#));
        assert!(prompt.contains("at most three sentences"));
        assert!(prompt.contains("Neurology, Cardiology"));
        assert!(prompt.contains("ENT, Psychiatry, General"));
        assert!(prompt.ends_with("Patient Symptoms:\ndry cough for a week"));
    }
}
