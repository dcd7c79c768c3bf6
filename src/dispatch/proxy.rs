//! HTTP transport for the trusted review proxy.
//!
//! The transport reports failures as structured outcomes so the
//! router's fallback decision never depends on matching raw error
//! strings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::PROXY_CHAT_PATH;
use crate::models::ChatMessage;

/// Request body for the proxy chat endpoint (camelCase wire names).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub code_context: String,
    pub user_message: String,
    pub history: Vec<ChatMessage>,
    pub language: String,
}

#[derive(Debug, Deserialize)]
struct ProxySuccess {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
}

/// Structured outcome of a failed proxy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyFailure {
    /// The endpoint is absent, unreachable, or not configured.
    /// Fallback eligible: infrastructure absence, not a user-actionable
    /// condition.
    Unavailable(String),
    /// The proxy was reached and reported a concrete failure. A
    /// reachable proxy's rejection is authoritative; never falls back.
    Rejected { status: u16, message: String },
}

/// One proxy chat attempt. Implemented over HTTP in production and by
/// canned mocks in tests.
#[async_trait]
pub trait ProxyTransport: Send + Sync {
    async fn send_chat(&self, request: &ProxyRequest) -> Result<String, ProxyFailure>;
}

/// reqwest-backed transport POSTing to `{base_url}/api/chat`.
pub struct HttpProxyTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProxyTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PROXY_CHAT_PATH)
    }
}

#[async_trait]
impl ProxyTransport for HttpProxyTransport {
    async fn send_chat(&self, request: &ProxyRequest) -> Result<String, ProxyFailure> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| ProxyFailure::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            let body: ProxySuccess = response.json().await.map_err(|e| {
                ProxyFailure::Rejected {
                    status,
                    message: format!("invalid proxy response: {e}"),
                }
            })?;
            return Ok(body.content);
        }

        // A host that answers but has no chat route deployed counts as
        // an absent proxy, not a proxy-side rejection.
        if status == 404 || status == 501 {
            return Err(ProxyFailure::Unavailable(format!(
                "proxy endpoint missing (status {status})"
            )));
        }

        let message = match response.json::<ProxyErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("proxy returned status {status}"),
        };
        Err(ProxyFailure::Rejected { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn endpoint_joins_base_url_and_path() {
        let transport = HttpProxyTransport::new("https://review.example.com");
        assert_eq!(transport.endpoint(), "https://review.example.com/api/chat");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let transport = HttpProxyTransport::new("https://review.example.com/");
        assert_eq!(transport.endpoint(), "https://review.example.com/api/chat");
    }

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = ProxyRequest {
            code_context: "fn main() {}".into(),
            user_message: "is this correct?".into(),
            history: vec![ChatMessage {
                role: Role::User,
                content: "earlier question".into(),
            }],
            language: "rust".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["codeContext"], "fn main() {}");
        assert_eq!(json["userMessage"], "is this correct?");
        assert_eq!(json["language"], "rust");
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][0]["content"], "earlier question");
    }

    #[test]
    fn success_body_parses_content() {
        let body: ProxySuccess = serde_json::from_str(r#"{"content": "looks good"}"#).unwrap();
        assert_eq!(body.content, "looks good");
    }

    #[test]
    fn error_body_parses_message() {
        let body: ProxyErrorBody =
            serde_json::from_str(r#"{"error": "rate limit exceeded"}"#).unwrap();
        assert_eq!(body.error, "rate limit exceeded");
    }
}
