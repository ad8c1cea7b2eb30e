//! Diagnosis Agent
//!
//! Wraps normalized report text in the fixed instruction template and sends it
//! to the configured model. Failures come back as values; nothing is retried.

use crate::config::LLMConfig;
use crate::llm::LLMAdapter;
use crate::models::NormalizedText;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};
use tracing::{error, info};

const PROMPT_PREFIX: &str =
    "Based on these medical test results or descriptions, what could be the possible diagnosis?";
const PROMPT_SUFFIX: &str = "Explain simply.";

/// The single prompt sent for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisPrompt(String);

impl DiagnosisPrompt {
    pub fn from_text(text: &NormalizedText) -> Self {
        Self(format!("{}\n\n{}\n\n{}", PROMPT_PREFIX, text.as_str(), PROMPT_SUFFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The model's reply, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisResult(pub String);

pub struct DiagnosisAgent;

impl DiagnosisAgent {
    pub fn build_request(prompt: &DiagnosisPrompt, config: &LLMConfig) -> LLMRequest {
        LLMRequest {
            model: config.model.clone(),
            messages: vec![LLMMessage::user(prompt.as_str())],
            max_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }

    /// Send the prompt for `text`. Callers must not pass empty text.
    pub async fn interpret(
        text: &NormalizedText,
        llm: &dyn LLMAdapter,
        config: &LLMConfig,
    ) -> AppResult<DiagnosisResult> {
        if text.is_empty() {
            return Err(AppError::InvalidRequest("no content provided".to_string()));
        }

        let prompt = DiagnosisPrompt::from_text(text);
        let request = Self::build_request(&prompt, config);

        info!(
            provider = llm.provider_name(),
            model = %config.model,
            prompt_len = prompt.as_str().len(),
            "Dispatching diagnosis prompt"
        );

        match llm.create_chat_completion(&request).await {
            Ok(response) => {
                info!(
                    response_len = response.content.len(),
                    finish_reason = %response.finish_reason,
                    "Diagnosis received"
                );
                Ok(DiagnosisResult(response.content))
            }
            Err(e) => {
                error!(error = %e, "Diagnosis request failed");
                Err(e)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedAdapter;
    use super::*;

    fn llm_config() -> LLMConfig {
        LLMConfig {
            google_api_key: "test-key".to_string(),
            model: "gemini-pro".to_string(),
            api_base: "http://localhost".to_string(),
            max_output_tokens: Some(1024),
            temperature: None,
        }
    }

    #[test]
    fn test_prompt_template() {
        let text = NormalizedText::combine(None, Some("Hb 9.1 g/dL"));
        let prompt = DiagnosisPrompt::from_text(&text);
        assert_eq!(
            prompt.as_str(),
            "Based on these medical test results or descriptions, what could be the possible diagnosis?\n\nHb 9.1 g/dL\n\nExplain simply."
        );
    }

    #[test]
    fn test_request_carries_single_user_prompt() {
        let prompt = DiagnosisPrompt::from_text(&NormalizedText::combine(None, Some("x")));
        let request = DiagnosisAgent::build_request(&prompt, &llm_config());

        assert_eq!(request.model, "gemini-pro");
        assert_eq!(request.messages, vec![LLMMessage::user(prompt.as_str())]);
        assert_eq!(request.max_tokens, Some(1024));
    }

    #[tokio::test]
    async fn test_interpret_returns_model_text() {
        let adapter = ScriptedAdapter::replying("Likely iron-deficiency anemia.");
        let text = NormalizedText::combine(Some("Ferritin 5"), None);

        let result = DiagnosisAgent::interpret(&text, &adapter, &llm_config())
            .await
            .unwrap();

        assert_eq!(result, DiagnosisResult("Likely iron-deficiency anemia.".to_string()));
        assert_eq!(adapter.calls(), 1);
        assert!(adapter.prompts()[0].contains("Ferritin 5"));
    }

    #[tokio::test]
    async fn test_interpret_surfaces_remote_failure() {
        let adapter = ScriptedAdapter::failing("quota exceeded");
        let text = NormalizedText::combine(None, Some("fever"));

        let err = DiagnosisAgent::interpret(&text, &adapter, &llm_config())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::LLMApi(_)));
        assert_eq!(adapter.calls(), 1);
    }

    #[tokio::test]
    async fn test_interpret_refuses_empty_text() {
        let adapter = ScriptedAdapter::replying("unused");
        let err = DiagnosisAgent::interpret(&NormalizedText::default(), &adapter, &llm_config())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(adapter.calls(), 0);
    }
}
