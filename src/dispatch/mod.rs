//! Request dispatch: proxy first, direct provider fallback.
//!
//! Each [`ChatClient::send_message`] call is an independent linear
//! attempt: no retries, no cancellation. Callers that want to avoid
//! interleaved responses on one thread are responsible for not
//! overlapping duplicate requests.

pub mod direct;
pub mod error;
pub mod proxy;

pub use direct::{CompletionBackend, RigBackend};
pub use error::{classify, ChatError};
pub use proxy::{HttpProxyTransport, ProxyFailure, ProxyRequest, ProxyTransport};

use std::sync::Arc;

use crate::config::Config;
use crate::constants::API_KEY_PREFIX;
use crate::context::{assemble, AssembledContext};
use crate::models::{ConversationMessage, OpenFileContext};
use crate::prompt;

/// Everything one dispatch needs, snapshotted by the caller before the
/// call. The pipeline never reads shared state itself.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// The thread's selected-code snapshot.
    pub code_context: String,
    /// The new user message.
    pub user_message: String,
    /// Full thread history; the assembler windows it.
    pub history: Vec<ConversationMessage>,
    /// Current open files, in the order the user opened them.
    pub open_files: Vec<OpenFileContext>,
    /// Per-request language label override.
    pub language_hint: Option<String>,
}

/// The dispatch pipeline: context assembly, prompt construction, and
/// proxy-or-direct routing.
pub struct ChatClient {
    proxy: Option<Arc<dyn ProxyTransport>>,
    backend: Arc<dyn CompletionBackend>,
    api_key: Option<String>,
    language: Option<String>,
}

impl ChatClient {
    /// Assemble a client from explicit parts. Tests inject mock
    /// transports and backends here.
    pub fn new(
        proxy: Option<Arc<dyn ProxyTransport>>,
        backend: Arc<dyn CompletionBackend>,
        api_key: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            proxy,
            backend,
            api_key,
            language,
        }
    }

    /// Build the production client from resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        let proxy = config
            .proxy
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| Arc::new(HttpProxyTransport::new(url)) as Arc<dyn ProxyTransport>);

        let backend = Arc::new(RigBackend::new(
            config.provider.name,
            &config.provider.model,
            config.provider.base_url.clone(),
        ));

        Self {
            proxy,
            backend,
            api_key: config.provider.api_key.clone(),
            language: config.chat.language.clone(),
        }
    }

    /// Send one review message through the pipeline.
    ///
    /// Resolves with the model's response text, or fails with one of
    /// the fixed [`ChatError`] categories. The single recovered failure
    /// is an unavailable proxy, which silently falls back to the
    /// direct provider path.
    pub async fn send_message(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let AssembledContext {
            enhanced_context,
            limited_history,
        } = assemble(
            &request.code_context,
            &request.open_files,
            &request.history,
        );

        let language = prompt::resolve_language(
            &request.code_context,
            request.language_hint.as_deref().or(self.language.as_deref()),
        );

        // Proxy attempt.
        let proxy_failure = match &self.proxy {
            Some(transport) => {
                let body = ProxyRequest {
                    code_context: enhanced_context.clone(),
                    user_message: request.user_message.clone(),
                    history: limited_history.clone(),
                    language: language.clone(),
                };
                match transport.send_chat(&body).await {
                    Ok(content) => return Ok(content),
                    Err(failure) => Some(failure),
                }
            }
            None => None,
        };

        match proxy_failure {
            Some(ProxyFailure::Rejected { status, message }) => {
                // Authoritative server-side failure. Falling back here
                // would mask it behind a possibly-absent credential.
                tracing::debug!(status, "proxy rejected the request");
                return Err(error::classify_proxy(&message));
            }
            Some(ProxyFailure::Unavailable(reason)) => {
                tracing::debug!(%reason, "proxy unavailable, falling back to direct call");
            }
            None => {
                tracing::debug!("no proxy configured, dispatching directly");
            }
        }

        // Direct attempt: credential pre-flight before any network call.
        let api_key = match self.api_key.as_deref().filter(|key| !key.is_empty()) {
            Some(key) => key,
            None => return Err(ChatError::CredentialMissing),
        };
        if !api_key.starts_with(API_KEY_PREFIX) {
            return Err(ChatError::CredentialInvalid);
        }

        let system_prompt = prompt::build_system_prompt(&enhanced_context, Some(&language));

        self.backend
            .complete(api_key, &system_prompt, &limited_history, &request.user_message)
            .await
            .map_err(|raw| error::classify(&raw))
    }
}
