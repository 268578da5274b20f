use thiserror::Error;

pub type Result<T> = std::result::Result<T, XApiError>;

#[derive(Debug, Error)]
pub enum XApiError {
    /// Transport-level failure (connect, timeout, TLS, body decode).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("X API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The user lookup succeeded but returned no record.
    #[error("user not found: {0}")]
    UserNotFound(String),
}
