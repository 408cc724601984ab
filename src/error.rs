//! Error types shared by the gateway, configuration and upload control.
//!
//! A superseded result is not an error: it is reported as
//! [`crate::generation::Applied::Superseded`] and swallowed by the engine.

/// Coarse classification used for presentation and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected, timed out, or returned a failing status.
    NetworkFailure,
    /// The backend has no record for a valid id.
    NotFound,
    /// The response did not have the expected shape.
    Malformed,
}

/// Failure of a single data gateway request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("no record for point {id}")]
    NotFound { id: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GatewayError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::NetworkFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Malformed(_) => ErrorKind::Malformed,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Startup validation failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
    #[error("fit padding must be a finite non-negative ratio, got {0}")]
    InvalidPadding(String),
    #[error("focus zoom {0} is outside 0..=22")]
    InvalidZoom(u8),
    #[error("no presentation descriptor for category '{0}'")]
    MissingDescriptor(&'static str),
    #[error("category '{0}' has more than one presentation descriptor")]
    DuplicateDescriptor(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Upload control refused to start a new upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("an upload is already in progress")]
    Busy,
    #[error("the previous upload confirmation is still shown")]
    Confirming,
}
