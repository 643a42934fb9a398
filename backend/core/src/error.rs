use thiserror::Error;

/// Top-level error type for the PokeLens relay.
#[derive(Debug, Error)]
pub enum PokeError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("upstream error ({provider}): {message}")]
    Upstream { provider: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PokeError {
    /// Wrap a provider/client failure, keeping the full context chain in the message.
    pub fn upstream(provider: impl Into<String>, err: &anyhow::Error) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: format!("{err:#}"),
        }
    }

    /// Whether the failure was caused by the caller rather than by us or upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::InvalidUpload(_) | Self::UnsupportedMediaType(_)
        )
    }
}
