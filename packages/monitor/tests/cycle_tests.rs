//! Poll-notify cycle tests, driven through the collaborator seams with
//! in-memory fakes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use monitor::cycle::Monitor;
use monitor::state::WatermarkStore;
use monitor::traits::{PostSource, PushSink};
use monitor::types::{Notification, Post, PostId};

// =============================================================================
// Fakes
// =============================================================================

/// Post source returning a scripted batch (or error) per fetch, capturing
/// the `since_id` of every call.
#[derive(Clone, Default)]
struct FakeSource {
    batches: Arc<Mutex<VecDeque<Result<Vec<Post>>>>>,
    since_calls: Arc<Mutex<Vec<Option<String>>>>,
}

impl FakeSource {
    fn new() -> Self {
        Self::default()
    }

    fn with_batch(self, posts: Vec<Post>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(posts));
        self
    }

    fn with_error(self, message: &str) -> Self {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(anyhow!("{}", message.to_owned())));
        self
    }

    fn since_calls(&self) -> Vec<Option<String>> {
        self.since_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostSource for FakeSource {
    async fn fetch_recent_posts(&self, since_id: Option<&PostId>) -> Result<Vec<Post>> {
        self.since_calls
            .lock()
            .unwrap()
            .push(since_id.map(|id| id.as_str().to_string()));
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Push sink recording every attempted notification; each call consumes the
/// next scripted outcome (default: success).
#[derive(Clone, Default)]
struct FakeSink {
    outcomes: Arc<Mutex<VecDeque<Result<()>>>>,
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl FakeSink {
    fn new() -> Self {
        Self::default()
    }

    fn with_failure(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(anyhow!("{}", message.to_owned())));
        self
    }

    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSink for FakeSink {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn post(id: &str, text: &str) -> Post {
    Post {
        id: PostId::new(id),
        text: text.to_string(),
        created_at: None,
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    state_path: std::path::PathBuf,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        Self {
            _dir: dir,
            state_path,
        }
    }

    fn store(&self) -> WatermarkStore {
        WatermarkStore::new(self.state_path.clone())
    }

    fn seed_watermark(&self, id: &str) {
        self.store().save(&PostId::new(id)).unwrap();
    }

    fn persisted_watermark(&self) -> Option<PostId> {
        self.store().load()
    }

    fn monitor(&self, source: FakeSource, sink: FakeSink) -> Monitor<FakeSource, FakeSink> {
        Monitor::new(source, sink, self.store(), "someuser".to_string())
    }
}

// =============================================================================
// Bootstrap
// =============================================================================

#[tokio::test]
async fn bootstrap_records_newest_without_notifying() {
    let harness = Harness::new();
    // Deliberately unsorted: bootstrap must pick the maximum id
    let source = FakeSource::new().with_batch(vec![
        post("102", "c"),
        post("104", "e"),
        post("100", "a"),
        post("103", "d"),
        post("101", "b"),
    ]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source.clone(), sink.clone());
    monitor.run_cycle().await.unwrap();

    assert!(sink.sent().is_empty());
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("104")));
    assert_eq!(source.since_calls(), vec![None]);
}

#[tokio::test]
async fn bootstrap_with_single_post_persists_its_id() {
    // Scenario A: no state, fetch returns one post with id 100
    let harness = Harness::new();
    let source = FakeSource::new().with_batch(vec![post("100", "first")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();

    assert!(sink.sent().is_empty());
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("100")));
}

#[tokio::test]
async fn bootstrap_with_no_posts_retries_next_cycle() {
    let harness = Harness::new();
    let source = FakeSource::new()
        .with_batch(vec![])
        .with_batch(vec![post("100", "first")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source.clone(), sink.clone());
    monitor.run_cycle().await.unwrap();
    assert_eq!(harness.persisted_watermark(), None);

    monitor.run_cycle().await.unwrap();
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("100")));
    assert!(sink.sent().is_empty());
    // Both cycles were bootstrap fetches with no lower bound
    assert_eq!(source.since_calls(), vec![None, None]);
}

#[tokio::test]
async fn corrupt_state_file_triggers_bootstrap() {
    // Scenario E: unparseable state is absent state, not a crash
    let harness = Harness::new();
    std::fs::write(&harness.state_path, "{definitely not json").unwrap();

    let source = FakeSource::new().with_batch(vec![post("100", "first")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source.clone(), sink.clone());
    monitor.run_cycle().await.unwrap();

    assert!(sink.sent().is_empty());
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("100")));
    assert_eq!(source.since_calls(), vec![None]);
}

// =============================================================================
// Tracking
// =============================================================================

#[tokio::test]
async fn new_posts_are_notified_oldest_first() {
    // Scenario B: collaborator returns newest-first, the cycle sorts
    let harness = Harness::new();
    harness.seed_watermark("100");

    let source = FakeSource::new().with_batch(vec![post("103", "newer"), post("101", "older")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source.clone(), sink.clone());
    monitor.run_cycle().await.unwrap();

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[0].url.as_deref(),
        Some("https://twitter.com/someuser/status/101")
    );
    assert_eq!(
        sent[1].url.as_deref(),
        Some("https://twitter.com/someuser/status/103")
    );
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("103")));
    assert_eq!(source.since_calls(), vec![Some("100".to_string())]);
}

#[tokio::test]
async fn empty_fetch_is_a_quiet_cycle() {
    // Scenario C
    let harness = Harness::new();
    harness.seed_watermark("103");

    let source = FakeSource::new().with_batch(vec![]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();

    assert!(sink.sent().is_empty());
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("103")));
}

#[tokio::test]
async fn sink_failure_still_advances_watermark() {
    // Scenario D: accepted policy is advance-regardless
    let harness = Harness::new();
    harness.seed_watermark("100");

    let source = FakeSource::new().with_batch(vec![post("101", "a"), post("103", "b")]);
    let sink = FakeSink::new().with_failure("503 from pushbullet");

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();

    // Both pushes were attempted, and the failed one did not stall anything
    assert_eq!(sink.sent().len(), 2);
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("103")));
}

#[tokio::test]
async fn fetch_error_is_treated_as_no_new_posts() {
    let harness = Harness::new();
    harness.seed_watermark("100");

    let source = FakeSource::new().with_error("rate limited");
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();

    assert!(sink.sent().is_empty());
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("100")));
}

#[tokio::test]
async fn replaying_the_same_batch_is_idempotent() {
    let harness = Harness::new();
    harness.seed_watermark("100");

    let batch = vec![post("101", "a"), post("103", "b")];
    let source = FakeSource::new()
        .with_batch(batch.clone())
        .with_batch(batch);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();
    monitor.run_cycle().await.unwrap();

    // The replay produced nothing new
    assert_eq!(sink.sent().len(), 2);
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("103")));
}

#[tokio::test]
async fn watermark_never_moves_backwards() {
    let harness = Harness::new();
    harness.seed_watermark("103");

    // A misbehaving source hands back posts at and below the watermark
    let source = FakeSource::new().with_batch(vec![post("101", "stale"), post("103", "seen")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();

    assert!(sink.sent().is_empty());
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("103")));
}

#[tokio::test]
async fn notifications_ascend_across_cycles() {
    let harness = Harness::new();
    harness.seed_watermark("100");

    let source = FakeSource::new()
        .with_batch(vec![post("102", "b"), post("101", "a")])
        .with_batch(vec![post("105", "d"), post("104", "c")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();
    monitor.run_cycle().await.unwrap();

    let ids: Vec<String> = sink
        .sent()
        .iter()
        .map(|n| n.url.as_deref().unwrap().rsplit('/').next().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["101", "102", "104", "105"]);
    assert_eq!(harness.persisted_watermark(), Some(PostId::new("105")));
}

#[tokio::test]
async fn notification_body_comes_from_post_text() {
    let harness = Harness::new();
    harness.seed_watermark("100");

    let source = FakeSource::new().with_batch(vec![post("101", "big restock at 3pm")]);
    let sink = FakeSink::new();

    let mut monitor = harness.monitor(source, sink.clone());
    monitor.run_cycle().await.unwrap();

    let sent = sink.sent();
    assert_eq!(sent[0].title, "New post from @someuser");
    assert_eq!(sent[0].body, "big restock at 3pm");
}
