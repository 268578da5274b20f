//! Production bindings of the collaborator seams to the real HTTP clients.

use anyhow::Result;
use async_trait::async_trait;

use pushbullet::PushbulletClient;
use x_client::{Tweet, XApiClient};

use crate::traits::{PostSource, PushSink};
use crate::types::{Notification, Post, PostId};

/// Posts fetched per cycle. The timeline endpoint requires 5..=100; this is
/// a polling monitor, not a backfill tool, so a small batch is enough.
const FETCH_BATCH_SIZE: u32 = 10;

impl From<Tweet> for Post {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: PostId::new(tweet.id),
            text: tweet.text,
            created_at: tweet.created_at,
        }
    }
}

/// [`PostSource`] backed by the X API v2 user-timeline endpoint.
pub struct XTimelineSource {
    client: XApiClient,
    user_id: String,
}

impl XTimelineSource {
    pub fn new(client: XApiClient, user_id: String) -> Self {
        Self { client, user_id }
    }
}

#[async_trait]
impl PostSource for XTimelineSource {
    async fn fetch_recent_posts(&self, since_id: Option<&PostId>) -> Result<Vec<Post>> {
        let tweets = self
            .client
            .get_user_tweets(
                &self.user_id,
                since_id.map(PostId::as_str),
                FETCH_BATCH_SIZE,
            )
            .await?;
        Ok(tweets.into_iter().map(Post::from).collect())
    }
}

/// [`PushSink`] backed by the Pushbullet push API.
pub struct PushbulletSink {
    client: PushbulletClient,
}

impl PushbulletSink {
    pub fn new(client: PushbulletClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PushSink for PushbulletSink {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        match &notification.url {
            Some(url) => {
                self.client
                    .push_link(&notification.title, &notification.body, url)
                    .await?
            }
            None => {
                self.client
                    .push_note(&notification.title, &notification.body)
                    .await?
            }
        }
        Ok(())
    }
}
