//! Minimal Pushbullet push API client.
//!
//! Supports sending note and link pushes via `POST /v2/pushes`.
//!
//! # Example
//!
//! ```rust,ignore
//! use pushbullet::PushbulletClient;
//!
//! let client = PushbulletClient::new("your-access-token".into())?;
//! client.push_link("New post", "post text", "https://example.org/p/1").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{PushbulletError, Result};
pub use types::Push;

use std::time::Duration;

const PUSHES_URL: &str = "https://api.pushbullet.com/v2/pushes";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PushbulletClient {
    client: reqwest::Client,
    access_token: String,
}

impl PushbulletClient {
    pub fn new(access_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            access_token,
        })
    }

    /// Send a plain note push.
    pub async fn push_note(&self, title: &str, body: &str) -> Result<()> {
        self.send(Push::note(title, body)).await
    }

    /// Send a link push with a tappable URL.
    pub async fn push_link(&self, title: &str, body: &str, url: &str) -> Result<()> {
        self.send(Push::link(title, body, url)).await
    }

    async fn send(&self, push: Push) -> Result<()> {
        let resp = self
            .client
            .post(PUSHES_URL)
            .header("Access-Token", &self.access_token)
            .json(&push)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PushbulletError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(title = %push.title, "Push delivered");
        Ok(())
    }
}
