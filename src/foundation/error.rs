/// Convenience result type used across layoutpack.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Invalid user-provided data (sizes, names, selections).
    #[error("validation error: {0}")]
    Validation(String),

    /// A photo or template could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while drawing onto the output canvas.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding a composited frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors while assembling or writing the output archive.
    #[error("archive error: {0}")]
    Archive(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayoutError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`LayoutError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayoutError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`LayoutError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Build a [`LayoutError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
