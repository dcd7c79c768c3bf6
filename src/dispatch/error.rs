//! User-facing error taxonomy and provider-failure classification.

use thiserror::Error;

/// Everything a dispatch can fail with.
///
/// Display strings are the fixed messages shown to the user; only
/// [`ChatError::Unknown`] passes raw provider text through, since no
/// better categorisation exists for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// No credential available for the direct provider call.
    #[error("OpenAI API key required. Add one in settings or configure the review proxy.")]
    CredentialMissing,

    /// A credential is present but fails the local prefix check.
    #[error("Invalid API key format. Provider keys start with \"sk-\".")]
    CredentialInvalid,

    /// The provider rejected the credential at call time.
    #[error("The provider rejected the API key. Check your settings.")]
    CredentialRejected,

    #[error("Rate limit reached. Wait a moment and retry.")]
    RateLimited,

    #[error("The selected code is too large for the model. Select a smaller portion.")]
    ContextTooLarge,

    /// The proxy was reached and reported a failure that fits no other
    /// category. Never triggers fallback.
    #[error("Review service error: {0}")]
    ProxyError(String),

    #[error("{0}")]
    Unknown(String),
}

/// Map raw provider failure text to a category.
///
/// Case-insensitive substring matching, first match wins, in this
/// priority order: rate limiting, context size, credential rejection.
/// Total: every input maps to exactly one category.
pub fn classify(raw: &str) -> ChatError {
    let lower = raw.to_lowercase();
    if lower.contains("rate limit") {
        ChatError::RateLimited
    } else if lower.contains("context length") || lower.contains("maximum") {
        ChatError::ContextTooLarge
    } else if lower.contains("api key") {
        ChatError::CredentialRejected
    } else {
        ChatError::Unknown(raw.to_string())
    }
}

/// Classify a reached-proxy rejection.
///
/// Same taxonomy as [`classify`], except an unrecognised message
/// becomes [`ChatError::ProxyError`] so the caller can tell an
/// authoritative server-side failure from an unclassified provider one.
pub fn classify_proxy(message: &str) -> ChatError {
    match classify(message) {
        ChatError::Unknown(raw) => ChatError::ProxyError(raw),
        other => other,
    }
}
