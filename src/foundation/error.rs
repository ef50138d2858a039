/// Crate-wide result alias.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Errors surfaced by the glyph engine and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// Malformed glyph data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller misuse of a core operation (non-positive scale factor, non-finite coordinate).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Drawing-surface or frame-sink failure.
    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlyphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
