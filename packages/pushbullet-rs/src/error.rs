use thiserror::Error;

pub type Result<T> = std::result::Result<T, PushbulletError>;

#[derive(Debug, Error)]
pub enum PushbulletError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pushbullet answered with a non-2xx status.
    #[error("Pushbullet error (status {status}): {message}")]
    Api { status: u16, message: String },
}
