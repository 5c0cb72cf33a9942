use std::fmt::{self, Display};

/// Errors produced by envelope decoding and model validation routines.
#[derive(Debug)]
pub enum ModelError {
    /// The response object has no field named after the configured items key.
    MissingItemsKey(String),
    /// The response body exists but is not shaped like a feed page.
    UnexpectedShape(String),
    Decode(serde_json::Error),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingItemsKey(key) => {
                write!(f, "items key `{key}` missing from response")
            }
            ModelError::UnexpectedShape(msg) => {
                write!(f, "unexpected response shape: {msg}")
            }
            ModelError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Decode(err)
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
