use std::fmt;
use std::time::Duration;

use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-1106-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const AUTH_TOKEN_VAR: &str = "API_AUTH_TOKEN";
pub const AUTH_HEADER_VAR: &str = "API_AUTH_HEADER";
pub const MODEL_VAR: &str = "API_MODEL";
pub const TIMEOUT_VAR: &str = "API_TIMEOUT_SECS";

/// How the token is attached to each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// A vendor-specific header carrying the raw token, e.g. `astra-api-token`.
    Header(String),
}

/// Everything needed to build an [`super::OpenAiChatClient`].
///
/// Construct once at startup and hand the resulting client to whoever needs it.
///
/// | Variable           | Default                     | Purpose                          |
/// |--------------------|-----------------------------|----------------------------------|
/// | `API_BASE_URL`     | `https://api.openai.com/v1` | Any OpenAI-compatible server     |
/// | `API_AUTH_TOKEN`   | required                    | Secret token                     |
/// | `API_AUTH_HEADER`  | unset (Bearer auth)         | Custom header for the raw token  |
/// | `API_MODEL`        | `gpt-4-1106-preview`        | Chat model                       |
/// | `API_TIMEOUT_SECS` | `30`                        | Per-request timeout              |
#[derive(Clone)]
pub struct ChatClientConfig {
    base_url: String,
    auth_token: String,
    auth_scheme: AuthScheme,
    model: String,
    timeout: Duration,
}

impl ChatClientConfig {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            auth_scheme: AuthScheme::Bearer,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var(AUTH_TOKEN_VAR).ok_or_else(|| {
            DomainError::configuration(format!(
                "required environment variable '{AUTH_TOKEN_VAR}' is not set"
            ))
        })?;
        let base_url = var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url, token);

        if let Some(header) = var(AUTH_HEADER_VAR) {
            config = config.with_auth_header(header);
        }
        if let Some(model) = var(MODEL_VAR) {
            config = config.with_model(model);
        }
        if let Some(raw) = var(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    DomainError::configuration(format!(
                        "'{TIMEOUT_VAR}' must be a positive whole number of seconds, got '{raw}'"
                    ))
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the token raw in `header` instead of as a bearer token.
    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        let header = header.into();
        self.auth_scheme = if header.eq_ignore_ascii_case("authorization") {
            AuthScheme::Bearer
        } else {
            AuthScheme::Header(header)
        };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn auth_scheme(&self) -> &AuthScheme {
        &self.auth_scheme
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Hand-written so the token never lands in logs.
impl fmt::Debug for ChatClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClientConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_token() {
        let config = ChatClientConfig::from_lookup(lookup(&[(AUTH_TOKEN_VAR, "secret")])).unwrap();

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.auth_token(), "secret");
        assert_eq!(config.auth_scheme(), &AuthScheme::Bearer);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let err = ChatClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "http://x")])).unwrap_err();
        assert!(err.is_configuration());

        let err = ChatClientConfig::from_lookup(lookup(&[(AUTH_TOKEN_VAR, "  ")])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_all_variables_are_read() {
        let config = ChatClientConfig::from_lookup(lookup(&[
            (AUTH_TOKEN_VAR, "AstraCS:abc"),
            (BASE_URL_VAR, "https://open-assistant-ai.astra.datastax.com/v1"),
            (AUTH_HEADER_VAR, "astra-api-token"),
            (MODEL_VAR, "gpt-3.5-turbo"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(
            config.base_url(),
            "https://open-assistant-ai.astra.datastax.com/v1"
        );
        assert_eq!(
            config.auth_scheme(),
            &AuthScheme::Header("astra-api-token".to_string())
        );
        assert_eq!(config.model(), "gpt-3.5-turbo");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_is_configuration_error() {
        let err = ChatClientConfig::from_lookup(lookup(&[
            (AUTH_TOKEN_VAR, "secret"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_timeout_is_configuration_error() {
        let err = ChatClientConfig::from_lookup(lookup(&[
            (AUTH_TOKEN_VAR, "secret"),
            (TIMEOUT_VAR, "0"),
        ]))
        .unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn test_authorization_header_name_means_bearer() {
        let config = ChatClientConfig::new("http://x", "t").with_auth_header("Authorization");
        assert_eq!(config.auth_scheme(), &AuthScheme::Bearer);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ChatClientConfig::new("http://x", "super-secret-token");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
