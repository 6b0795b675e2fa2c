//! Patient-friendly explanation of medical report text

use ecare_core::{Explanation, GatewayError, report_explain_prompt};

use super::client::ChatCompletion;

/// Render the report prompt and ask the model for an explanation
pub async fn explain_report(
    llm: &dyn ChatCompletion,
    report_text: &str,
) -> Result<Explanation, GatewayError> {
    let prompt = report_explain_prompt(report_text)?;
    let explanation = llm.complete(&prompt).await?;

    tracing::info!(
        report_len = report_text.len(),
        explanation_len = explanation.len(),
        "Report explained"
    );

    Ok(Explanation { explanation })
}
