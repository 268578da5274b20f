use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single tweet from the user timeline endpoint.
///
/// The id is kept as a string: tweet ids are 64-bit snowflakes and common
/// JSON tooling mangles them as floats, so the API transmits them as text.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A user record from the username lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Wrapper for X API v2 responses. `data` is absent (not an empty array)
/// when a timeline query matches nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
}
