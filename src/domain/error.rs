use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote service error{}: {message}", status_suffix(status))]
    RemoteService {
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" (status {s})"))
        .unwrap_or_default()
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// A remote failure that carries an HTTP status.
    pub fn remote_status(status: u16, msg: impl Into<String>) -> Self {
        Self::RemoteService {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// A remote failure with no status, e.g. a 200 whose body could not be decoded.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteService {
            status: None,
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_remote_service(&self) -> bool {
        matches!(self, Self::RemoteService { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::Authentication(_) => 3,
            Self::Network(_) => 4,
            Self::RemoteService { .. } => 5,
            // EX_CONFIG from sysexits.h
            Self::Configuration(_) => 78,
        }
    }
}
