//! Direct provider completion backend.
//!
//! Uses rig-core's provider clients for the fallback path when no
//! proxy is reachable. Failures surface as raw provider text; the
//! router runs them through the classifier.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Chat;
use rig::providers;

use crate::constants::{COMPLETION_TEMPERATURE, MAX_COMPLETION_TOKENS};
use crate::models::{ChatMessage, ProviderName, Role};

/// One chat completion against the model provider.
///
/// `history` excludes the new user message; the credential is threaded
/// through per call and never stored by implementations.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        system_prompt: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, String>;
}

/// Build an agent from a rig-core client and run one chat turn.
///
/// Always sets `max_tokens`; without it some providers default to a
/// low limit that truncates responses.
macro_rules! chat_once {
    ($client:expr, $model:expr, $system:expr, $history:expr, $user:expr, $label:expr) => {{
        let agent = $client
            .agent($model)
            .preamble($system)
            .temperature(COMPLETION_TEMPERATURE)
            .max_tokens(MAX_COMPLETION_TOKENS)
            .build();
        agent
            .chat($user, $history)
            .await
            .map_err(|e| format!("{} API error: {e}", $label))
    }};
}

/// rig-core based completion backend.
pub struct RigBackend {
    provider: ProviderName,
    model: String,
    base_url: Option<String>,
}

impl RigBackend {
    pub fn new(provider: ProviderName, model: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            base_url,
        }
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
    ) -> Result<providers::openai::CompletionsClient, String> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(ref base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        builder
            .build()
            .map_err(|e| format!("failed to create OpenAI client: {e}"))
    }
}

/// Convert wire history into rig-core chat messages.
fn to_rig_history(history: &[ChatMessage]) -> Vec<rig::completion::Message> {
    history
        .iter()
        .map(|m| match m.role {
            Role::User => rig::completion::Message::user(m.content.clone()),
            Role::Assistant => rig::completion::Message::assistant(m.content.clone()),
        })
        .collect()
}

#[async_trait]
impl CompletionBackend for RigBackend {
    async fn complete(
        &self,
        api_key: &str,
        system_prompt: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, String> {
        let rig_history = to_rig_history(history);

        match self.provider {
            ProviderName::OpenAI | ProviderName::OpenAICompatible => {
                let client = self.build_openai_client(api_key)?;
                chat_once!(
                    client,
                    &self.model,
                    system_prompt,
                    rig_history,
                    user_message,
                    "OpenAI"
                )
            }
            ProviderName::DeepSeek => {
                let client = providers::deepseek::Client::new(api_key)
                    .map_err(|e| format!("failed to create DeepSeek client: {e}"))?;
                chat_once!(
                    client,
                    &self.model,
                    system_prompt,
                    rig_history,
                    user_message,
                    "DeepSeek"
                )
            }
        }
    }
}
