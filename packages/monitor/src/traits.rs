// Trait definitions for dependency injection
//
// These are the two collaborator seams the polling cycle is written against.
// Tests drive the cycle with in-memory fakes; production binds them to the
// real HTTP clients in `adapters`.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Notification, Post, PostId};

/// Read-only source of posts for the monitored account.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch recent original posts. With `since_id`, only posts with a
    /// strictly greater id are returned. Order is NOT guaranteed; the
    /// caller must sort.
    async fn fetch_recent_posts(&self, since_id: Option<&PostId>) -> Result<Vec<Post>>;
}

/// Write-only sink delivering push notifications.
#[async_trait]
pub trait PushSink: Send + Sync {
    /// Deliver one notification. An error means the push was (probably)
    /// not delivered; the caller decides whether that matters.
    async fn notify(&self, notification: &Notification) -> Result<()>;
}
