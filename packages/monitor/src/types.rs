use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Notification bodies are capped at this many characters.
const BODY_LIMIT: usize = 200;

/// A post identifier. Numeric in intent but transported as a string; ids can
/// exceed what a lossy float or 32-bit parse preserves, so ordering compares
/// the digit strings by magnitude instead of parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The significant digits, with leading zeros stripped.
    fn magnitude(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl Ord for PostId {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.magnitude();
        let b = other.magnitude();
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for PostId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PostId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PostId {}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A post as the monitor sees it, converted from the source's wire type.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// An outbound push built from a post. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub url: Option<String>,
}

impl Notification {
    /// Build the push for a new post: title names the account, body is the
    /// post text (truncated), URL deep-links to the post.
    pub fn from_post(post: &Post, username: &str) -> Self {
        Self {
            title: format!("New post from @{}", username),
            body: truncate_chars(&post.text, BODY_LIMIT),
            url: Some(format!(
                "https://twitter.com/{}/status/{}",
                username, post.id
            )),
        }
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
