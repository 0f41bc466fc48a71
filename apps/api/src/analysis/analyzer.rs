//! Resume Analysis: scores an uploaded resume PDF for a target role.
//!
//! Flow: PDF bytes → text (blocking extractor) → truncated prompt →
//!       Generator in JSON mode → `ResumeAnalysis`.
//!
//! Unlike generation there is no fallback: a reply that does not parse is an error.

use bytes::Bytes;
use tracing::{info, warn};

use crate::analysis::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{generate_json, GenerationOptions, Generator, LlmError};
use crate::models::analysis::ResumeAnalysis;

/// Characters of resume text sent to the model.
pub const MAX_RESUME_CHARS: usize = 5000;

/// Extracts plain text from a PDF.
///
/// The extractor is CPU-bound and can panic on malformed files, so it runs on
/// the blocking pool; both errors and panics are reported as a bad upload.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&pdf).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| {
        warn!("PDF extractor aborted: {e}");
        AppError::Validation("Could not read the uploaded PDF".to_string())
    })?
    .map_err(|e| {
        warn!("PDF extraction failed: {e}");
        AppError::Validation("Could not read the uploaded PDF".to_string())
    })?;

    let text = extracted.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text.to_string())
}

pub fn build_analysis_prompt(resume_text: &str, target_role: &str) -> String {
    let excerpt: String = resume_text.chars().take(MAX_RESUME_CHARS).collect();
    let prompt = ANALYSIS_PROMPT_TEMPLATE
        .replace("{target_role}", target_role)
        .replace("{resume_text}", &excerpt);
    format!("{prompt}\n{JSON_ONLY_INSTRUCTION}")
}

pub async fn analyze_resume(
    generator: &dyn Generator,
    options: &GenerationOptions,
    resume_text: &str,
    target_role: &str,
) -> Result<ResumeAnalysis, LlmError> {
    let prompt = build_analysis_prompt(resume_text, target_role);
    let analysis: ResumeAnalysis = generate_json(generator, &prompt, options).await?;

    info!(
        "Analyzed resume for '{}' (ATS score {})",
        target_role, analysis.ats_score
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fakes::CannedGenerator;

    const REPLY: &str = r#"```json
{
  "atsScore": "72",
  "riskFactor": "Medium - few metrics",
  "jobProbability": "40%",
  "improvements": ["Quantify impact", "Add Kubernetes"],
  "roadmap": [{"period": "Week 1", "task": "Ship a Rust CLI"}],
  "interviewRiskDetection": "Thin system design experience.",
  "personalBrandingScore": 65
}
```"#;

    #[test]
    fn test_prompt_truncates_resume_text() {
        let text = "é".repeat(MAX_RESUME_CHARS + 100);
        let prompt = build_analysis_prompt(&text, "Data Engineer");

        assert_eq!(prompt.matches('é').count(), MAX_RESUME_CHARS);
        assert!(prompt.contains("target role: \"Data Engineer\""));
        assert!(prompt.contains("keyword density for a Data Engineer"));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_prompt_leaves_resume_braces_alone() {
        let prompt = build_analysis_prompt("Skills: {target_role}", "SRE");
        assert!(prompt.contains("Resume Text: Skills: {target_role}"));
    }

    #[tokio::test]
    async fn test_parses_fenced_reply() {
        let generator = CannedGenerator::replying(REPLY);
        let analysis = analyze_resume(
            &generator,
            &GenerationOptions::default(),
            "Jane Doe, Rust engineer",
            "Backend Engineer",
        )
        .await
        .unwrap();

        assert_eq!(analysis.ats_score, 72);
        assert_eq!(analysis.personal_branding_score, 65);
        assert_eq!(analysis.roadmap[0].period, "Week 1");
        assert_eq!(analysis.improvements.len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_an_error() {
        let generator = CannedGenerator::replying("I cannot help with that.");
        let result = analyze_resume(
            &generator,
            &GenerationOptions::default(),
            "text",
            "Backend Engineer",
        )
        .await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let generator = CannedGenerator::failing();
        let result = analyze_resume(
            &generator,
            &GenerationOptions::default(),
            "text",
            "Backend Engineer",
        )
        .await;
        assert!(matches!(result, Err(LlmError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_garbage_upload_is_a_validation_error() {
        let result = extract_pdf_text(Bytes::from_static(b"definitely not a pdf")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
