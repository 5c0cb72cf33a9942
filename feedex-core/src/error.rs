use thiserror::Error;

use feedex_model::ModelError;

/// Errors surfaced by a page fetch.
///
/// Every variant is terminal for the current feed: the controller fails
/// closed and waits for a reset rather than retrying.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Malformed(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
