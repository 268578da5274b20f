//! Minimal X (Twitter) API v2 REST client.
//!
//! Supports the two calls a timeline monitor needs: resolving a username to
//! a user id, and fetching a user's recent original posts with an optional
//! `since_id` lower bound.
//!
//! # Example
//!
//! ```rust,ignore
//! use x_client::XApiClient;
//!
//! let client = XApiClient::new("your-bearer-token".into())?;
//!
//! let user = client.get_user_by_username("PokemonDealsTCG").await?;
//! let tweets = client.get_user_tweets(&user.id, Some("1801234567890123456"), 10).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{Result, XApiError};
pub use types::{ApiResponse, Tweet, User};

use std::time::Duration;

const BASE_URL: &str = "https://api.twitter.com/2";

/// Request timeout. The API grants no implicit ceiling, and a hung
/// connection must not stall the caller indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct XApiClient {
    client: reqwest::Client,
    bearer_token: String,
}

impl XApiClient {
    pub fn new(bearer_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            bearer_token,
        })
    }

    /// Resolve a username (handle, without the `@`) to its user record.
    pub async fn get_user_by_username(&self, username: &str) -> Result<User> {
        let url = format!("{}/users/by/username/{}", BASE_URL, username);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(XApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<User> = resp.json().await?;
        api_resp
            .data
            .ok_or_else(|| XApiError::UserNotFound(username.to_string()))
    }

    /// Fetch a user's recent original posts, newest first. Replies and
    /// retweets are excluded server-side. `since_id` restricts the result
    /// to posts with a strictly greater id.
    pub async fn get_user_tweets(
        &self,
        user_id: &str,
        since_id: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<Tweet>> {
        let url = format!("{}/users/{}/tweets", BASE_URL, user_id);

        let mut params = vec![
            ("max_results", max_results.to_string()),
            ("exclude", "retweets,replies".to_string()),
            ("tweet.fields", "id,text,created_at".to_string()),
        ];
        if let Some(since_id) = since_id {
            params.push(("since_id", since_id.to_string()));
        }

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(XApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<Vec<Tweet>> = resp.json().await?;
        let tweets = api_resp.data.unwrap_or_default();
        tracing::debug!(user_id, count = tweets.len(), "Fetched user tweets");
        Ok(tweets)
    }
}
