//! Error types for the core API client

/// Errors that can occur when calling the Balerter core API
#[derive(Debug, thiserror::Error)]
pub enum CoreApiError {
    /// Transport failure, carrying the HTTP stack's message unchanged
    #[error("{0}")]
    Http(String),

    #[error("error decode response: {0}")]
    DecodeResponse(#[source] serde_json::Error),

    /// The server answered with `status == "error"`; holds its `error` field verbatim
    #[error("{0}")]
    Server(String),

    #[error("failed to call {target}: {source}")]
    Call {
        target: String,
        #[source]
        source: Box<CoreApiError>,
    },

    #[error("failed to unmarshal {what}: {source}")]
    Unmarshal {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to marshal request: {0}")]
    Marshal(#[source] serde_json::Error),

    #[error("failed to decode image: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreApiError {
    pub(crate) fn call(target: impl Into<String>, source: CoreApiError) -> Self {
        CoreApiError::Call {
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// Whether the failure was reported by the server through the response envelope,
    /// looking through any call wrapping.
    pub fn is_server_error(&self) -> bool {
        match self {
            CoreApiError::Server(_) => true,
            CoreApiError::Call { source, .. } => source.is_server_error(),
            _ => false,
        }
    }
}

/// Result type alias for core API operations
pub type Result<T> = std::result::Result<T, CoreApiError>;
