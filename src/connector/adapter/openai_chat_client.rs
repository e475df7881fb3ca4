use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AuthScheme, ChatClientConfig};
use crate::application::ChatClient;
use crate::domain::{ChatRequest, DomainError};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
/// Longest slice of an error body carried into a [`DomainError`].
const MAX_ERROR_BODY: usize = 512;

/// OpenAI chat-completions request payload.
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for OpenAI-compatible `POST {base_url}/chat/completions` endpoints.
///
/// Implements [`ChatClient`] so the lookup use case stays decoupled from
/// transport and serialization details. One call to
/// [`complete`](ChatClient::complete) is one HTTP request; failures are
/// reported, never retried.
///
/// Error mapping:
/// - connect/DNS failure, timeout, or a 2xx body that cannot be read → `Network`
/// - `401`/`403` → `Authentication`
/// - any other non-2xx, or a 2xx whose body lacks `choices[0].message.content`
///   → `RemoteService`
pub struct OpenAiChatClient {
    client: reqwest::Client,
    model: String,
    /// Full endpoint URL (base + CHAT_COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(config: &ChatClientConfig) -> Result<Self, DomainError> {
        let url = format!(
            "{}{}",
            config.base_url().trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        );

        let parsed = reqwest::Url::parse(&url).map_err(|e| {
            DomainError::configuration(format!("invalid base URL '{}': {e}", config.base_url()))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(DomainError::configuration(format!(
                "base URL '{}' must be an absolute http(s) URL",
                config.base_url()
            )));
        }

        if config.timeout().is_zero() {
            return Err(DomainError::configuration("request timeout must be greater than zero"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(auth_headers(config)?)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("OpenAiChatClient: failed to build HTTP client: {e}"))
            })?;

        debug!(
            "OpenAiChatClient targeting {} with model {} (timeout {:?})",
            url,
            config.model(),
            config.timeout()
        );

        Ok(Self {
            client,
            model: config.model().to_string(),
            url,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, DomainError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system() {
            messages.push(ApiMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ApiMessage {
            role: "user",
            content: request.user(),
        });

        let body = ApiRequest {
            model: &self.model,
            messages,
            temperature: request.temperature(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::network(format!("OpenAiChatClient: request to {} failed: {e}", self.url))
            })?;

        let status = response.status();

        if !status.is_success() {
            // The status alone classifies the failure; an unreadable body only loses the message.
            let text = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}");
            debug!("OpenAiChatClient: error body: {text}");
            return Err(error_for_status(status, &text));
        }

        let text = response.text().await.map_err(|e| {
            DomainError::network(format!("OpenAiChatClient: failed to read response body: {e}"))
        })?;

        decode_content(&text)
    }
}

fn auth_headers(config: &ChatClientConfig) -> Result<HeaderMap, DomainError> {
    let (name, value) = match config.auth_scheme() {
        AuthScheme::Bearer => (AUTHORIZATION, format!("Bearer {}", config.auth_token())),
        AuthScheme::Header(name) => {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                DomainError::configuration(format!("invalid auth header name '{name}'"))
            })?;
            (name, config.auth_token().to_string())
        }
    };

    let mut value = HeaderValue::from_str(&value).map_err(|_| {
        DomainError::configuration("auth token contains characters not allowed in an HTTP header")
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(name, value);
    Ok(headers)
}

fn error_for_status(status: StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| truncate(body.trim(), MAX_ERROR_BODY));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DomainError::authentication(format!("API returned {status}: {message}"))
        }
        _ => DomainError::remote_status(status.as_u16(), message),
    }
}

/// Pull `choices[0].message.content` out of a chat-completions body, untrimmed.
fn decode_content(body: &str) -> Result<String, DomainError> {
    let response: ApiResponse = serde_json::from_str(body).map_err(|e| {
        DomainError::remote(format!("OpenAiChatClient: failed to parse response: {e}"))
    })?;

    if let Some(usage) = &response.usage {
        debug!(
            "OpenAiChatClient: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::remote("OpenAiChatClient: response contained no choices"))?
        .message
        .content
        .ok_or_else(|| DomainError::remote("OpenAiChatClient: first choice has no message content"))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
