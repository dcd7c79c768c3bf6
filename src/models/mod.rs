//! Shared types used across all modules.
//!
//! This module defines the core data structures for conversation
//! messages, threads, open-file contexts, and provider selection.
//! Other modules import from here rather than reaching into each
//! other's internals.

pub mod message;
pub mod open_file;
pub mod thread;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use message::{ChatMessage, ConversationMessage, Role};
pub use open_file::OpenFileContext;
pub use thread::{SelectionRange, Thread};

/// Supported direct-call provider backends.
///
/// All of them speak the chat-completion shape and issue credentials
/// with the `sk-` prefix the pre-flight check enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// Any OpenAI-compatible API (e.g. Ollama, Together, local servers).
    #[serde(rename = "openai-compatible")]
    OpenAICompatible,
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::OpenAI => write!(f, "openai"),
            ProviderName::DeepSeek => write!(f, "deepseek"),
            ProviderName::OpenAICompatible => write!(f, "openai-compatible"),
        }
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderName::OpenAI),
            "deepseek" => Ok(ProviderName::DeepSeek),
            "openai-compatible" => Ok(ProviderName::OpenAICompatible),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: openai, deepseek, openai-compatible"
            )),
        }
    }
}

impl ProviderName {
    /// Returns the provider-specific environment variable name for the API key.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
            ProviderName::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}
