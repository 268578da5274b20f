//! The poll-notify cycle.
//!
//! One cycle is fetch → diff against the watermark → notify → persist. The
//! monitor holds two pieces of state: the in-memory watermark and its durable
//! copy in the [`WatermarkStore`]. The watermark only ever moves forward.
//!
//! # Delivery policy
//!
//! A failed push is logged and the watermark still advances past that post
//! (at-least-once overall: a lost SAVE may re-notify after a restart, but a
//! failed SEND is never retried). See DESIGN.md.

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::state::WatermarkStore;
use crate::traits::{PostSource, PushSink};
use crate::types::{Notification, Post, PostId};

pub struct Monitor<S, K> {
    source: S,
    sink: K,
    store: WatermarkStore,
    username: String,
    watermark: Option<PostId>,
}

impl<S: PostSource, K: PushSink> Monitor<S, K> {
    /// Build a monitor, seeding the in-memory watermark from durable state.
    pub fn new(source: S, sink: K, store: WatermarkStore, username: String) -> Self {
        let watermark = store.load();
        match &watermark {
            Some(id) => info!(last_post_id = %id, "Loaded watermark from state file"),
            None => info!("No prior state, will establish a baseline"),
        }
        Self {
            source,
            sink,
            store,
            username,
            watermark,
        }
    }

    pub fn watermark(&self) -> Option<&PostId> {
        self.watermark.as_ref()
    }

    /// Run one fetch-diff-notify-persist round.
    ///
    /// Collaborator failures are handled here per the error taxonomy (fetch
    /// errors mean an empty batch, push errors are logged and skipped); only
    /// unclassified errors propagate to the loop boundary.
    pub async fn run_cycle(&mut self) -> Result<()> {
        let Some(watermark) = self.watermark.clone() else {
            return self.bootstrap().await;
        };

        let mut posts = match self.source.fetch_recent_posts(Some(&watermark)).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Fetch failed, treating as no new posts: {:#}", e);
                return Ok(());
            }
        };

        // The source's ordering is not trusted: sort ascending and drop
        // anything at or below the watermark.
        posts.sort_by(|a, b| a.id.cmp(&b.id));
        posts.retain(|p| p.id > watermark);

        if posts.is_empty() {
            debug!("No new posts");
            return Ok(());
        }

        info!(count = posts.len(), "Found new post(s)");
        for post in posts {
            self.notify_and_advance(post).await;
        }
        Ok(())
    }

    /// First run on a fresh deployment: record the newest existing post as
    /// the baseline without notifying for anything that predates us.
    async fn bootstrap(&mut self) -> Result<()> {
        let posts = match self.source.fetch_recent_posts(None).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Baseline fetch failed, will retry next cycle: {:#}", e);
                return Ok(());
            }
        };

        let Some(newest) = posts.into_iter().map(|p| p.id).max() else {
            debug!("Account has no posts yet, staying uninitialized");
            return Ok(());
        };

        info!(last_post_id = %newest, "Baseline established, monitoring from here forward");
        self.advance(newest);
        Ok(())
    }

    async fn notify_and_advance(&mut self, post: Post) {
        let notification = Notification::from_post(&post, &self.username);
        info!(post_id = %post.id, "Notifying for new post");

        if let Err(e) = self.sink.notify(&notification).await {
            // Accepted policy: the watermark advances anyway, so a dead
            // sink never replays the same post forever.
            error!(post_id = %post.id, "Failed to send notification: {:#}", e);
        }

        self.advance(post.id);
    }

    /// Move the watermark forward, in memory first. A failed save is logged
    /// and the cycle continues on in-memory state; a restart may then
    /// re-notify posts whose save was lost.
    fn advance(&mut self, id: PostId) {
        if let Err(e) = self.store.save(&id) {
            error!(post_id = %id, "Failed to persist watermark: {:#}", e);
        }
        self.watermark = Some(id);
    }
}
