//! Agent System
//!
//! One pass of the interpretation pipeline per form submission:
//!
//! ```text
//! Form input (file and/or pasted text)
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Normalize  │  → CSV / Excel / PDF text + pasted text
//! └─────────────┘
//!      │
//!      ├── empty ──────────────► NoContent (warning, no remote call)
//!      ▼
//! ┌─────────────┐
//! │  Diagnosis  │  → fixed prompt → remote model
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ├── failure ────────────► Failed (error shown)
//!      ▼
//!  Interpreted (reply shown)
//! ```

pub mod diagnosis;

pub use diagnosis::{DiagnosisAgent, DiagnosisPrompt, DiagnosisResult};

use crate::config::LLMConfig;
use crate::extract::{self, ExtractionError};
use crate::llm::LLMAdapter;
use crate::models::InputPayload;
use crate::types::{AppError, AppResult};
use tracing::{info, warn};

pub const NO_CONTENT_WARNING: &str = "Please provide some medical content to analyze.";

/// Where one pass through the pipeline ended up.
#[derive(Debug)]
pub enum InterpretationOutcome {
    /// Nothing to analyze; the model was not contacted
    NoContent {
        extraction_errors: Vec<ExtractionError>,
    },
    Interpreted {
        result: DiagnosisResult,
        extraction_errors: Vec<ExtractionError>,
    },
    Failed {
        error: AppError,
        extraction_errors: Vec<ExtractionError>,
    },
}

impl InterpretationOutcome {
    pub fn extraction_errors(&self) -> &[ExtractionError] {
        match self {
            InterpretationOutcome::NoContent { extraction_errors }
            | InterpretationOutcome::Interpreted { extraction_errors, .. }
            | InterpretationOutcome::Failed { extraction_errors, .. } => extraction_errors,
        }
    }
}

/// Run the full interpretation pipeline for one submission.
///
/// Extraction runs on the blocking pool since PDF and workbook parsing are
/// CPU bound. The only error returned is a failure to run that task; every
/// pipeline failure is reported through the outcome.
pub async fn run_interpretation(
    payload: InputPayload,
    llm: &dyn LLMAdapter,
    config: &LLMConfig,
) -> AppResult<InterpretationOutcome> {
    info!(
        has_file = payload.file.is_some(),
        has_text = payload.pasted_text.is_some(),
        "Starting interpretation pipeline"
    );

    let normalization = tokio::task::spawn_blocking(move || extract::normalize(&payload))
        .await
        .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))?;

    let extraction_errors = normalization.extraction_errors;

    if normalization.text.is_empty() {
        warn!(error_count = extraction_errors.len(), "No content to analyze");
        return Ok(InterpretationOutcome::NoContent { extraction_errors });
    }

    let outcome = match DiagnosisAgent::interpret(&normalization.text, llm, config).await {
        Ok(result) => InterpretationOutcome::Interpreted {
            result,
            extraction_errors,
        },
        Err(error) => InterpretationOutcome::Failed {
            error,
            extraction_errors,
        },
    };

    info!(
        interpreted = matches!(outcome, InterpretationOutcome::Interpreted { .. }),
        "Interpretation pipeline complete"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::diagnosis::test_support::ScriptedAdapter;
    use super::*;
    use crate::models::UploadedFile;

    fn llm_config() -> LLMConfig {
        LLMConfig {
            google_api_key: "test-key".to_string(),
            model: "gemini-pro".to_string(),
            api_base: "http://localhost".to_string(),
            max_output_tokens: None,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_empty_input_skips_remote_call() {
        let adapter = ScriptedAdapter::replying("unused");
        let payload = InputPayload::new(None, Some("  ".to_string()));

        let outcome = run_interpretation(payload, &adapter, &llm_config()).await.unwrap();

        assert!(matches!(outcome, InterpretationOutcome::NoContent { .. }));
        assert_eq!(adapter.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_file_alone_is_no_content() {
        let adapter = ScriptedAdapter::replying("unused");
        let payload = InputPayload::new(Some(UploadedFile::new("x.pdf", b"junk".to_vec())), None);

        let outcome = run_interpretation(payload, &adapter, &llm_config()).await.unwrap();

        assert!(matches!(outcome, InterpretationOutcome::NoContent { .. }));
        assert_eq!(outcome.extraction_errors().len(), 1);
        assert_eq!(adapter.calls(), 0);
    }

    #[tokio::test]
    async fn test_prompt_contains_file_and_paste() {
        let adapter = ScriptedAdapter::replying("Possible hypothyroidism.");
        let payload = InputPayload::new(
            Some(UploadedFile::new("thyroid.csv", b"test,value\nTSH,9.8\n".to_vec())),
            Some(" tired all the time ".to_string()),
        );

        let outcome = run_interpretation(payload, &adapter, &llm_config()).await.unwrap();

        match outcome {
            InterpretationOutcome::Interpreted { result, extraction_errors } => {
                assert_eq!(result.0, "Possible hypothyroidism.");
                assert!(extraction_errors.is_empty());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let prompt = &adapter.prompts()[0];
        assert!(prompt.starts_with("Based on these medical test results"));
        assert!(prompt.contains("TSH"));
        assert!(prompt.contains("9.8\n\ntired all the time\n\nExplain simply."));
    }

    #[tokio::test]
    async fn test_remote_failure_is_an_outcome() {
        let adapter = ScriptedAdapter::failing("network unreachable");
        let payload = InputPayload::new(None, Some("ALT 300".to_string()));

        let outcome = run_interpretation(payload, &adapter, &llm_config()).await.unwrap();

        match outcome {
            InterpretationOutcome::Failed { error, .. } => {
                assert!(error.to_string().contains("network unreachable"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extraction_error_kept_when_paste_succeeds() {
        let adapter = ScriptedAdapter::replying("ok");
        let payload = InputPayload::new(
            Some(UploadedFile::new("scan.docx", b"PK".to_vec())),
            Some("BP 160/100".to_string()),
        );

        let outcome = run_interpretation(payload, &adapter, &llm_config()).await.unwrap();

        assert!(matches!(outcome, InterpretationOutcome::Interpreted { .. }));
        assert_eq!(outcome.extraction_errors().len(), 1);
        assert_eq!(adapter.prompts()[0].matches("BP 160/100").count(), 1);
    }
}
