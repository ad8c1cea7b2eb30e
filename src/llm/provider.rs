use std::sync::Arc;

use async_trait::async_trait;
use crate::config::LLMConfig;
use crate::types::{LLMRequest, LLMResponse, AppResult};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;

    /// Provider name used in logs
    fn provider_name(&self) -> &str;
}

/// Build the adapter the service talks to.
pub fn build_adapter(config: &LLMConfig) -> Arc<dyn LLMAdapter> {
    Arc::new(crate::llm::google::GoogleAdapter::with_api_base(
        &config.google_api_key,
        &config.api_base,
    ))
}
