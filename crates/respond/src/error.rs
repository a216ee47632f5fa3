//! Error types for response dispatch.

/// The selected [`Encoder`](crate::Encoder) could not write the response data.
///
/// Part of the body may already be in the sink when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The data could not be serialized (e.g. a map with non-string keys).
    #[error("failed to serialize response data: {0}")]
    Serialize(serde_json::Error),

    /// The sink rejected the encoded bytes.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Raised by user supplied encoders.
    #[error("{0}")]
    Custom(String),
}

impl EncodingError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Writer failures inside the serializer are reported as [`EncodingError::Io`].
impl From<serde_json::Error> for EncodingError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(err.into())
        } else {
            Self::Serialize(err)
        }
    }
}

