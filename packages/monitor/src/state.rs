//! Durable watermark storage.
//!
//! The watermark (last notified post id) is the monitor's only persisted
//! state. It lives in a small human-inspectable JSON file; writes go through
//! a temp file plus rename so a crash leaves either the old or the new
//! record, never a truncated one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::types::PostId;

#[derive(Debug, Serialize, Deserialize)]
struct StateRecord {
    last_post_id: PostId,
}

pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted watermark. A missing or unreadable or corrupt
    /// file is "no prior state", never an error: the caller bootstraps.
    pub fn load(&self) -> Option<PostId> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), "Could not read state file: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<StateRecord>(&raw) {
            Ok(record) => Some(record.last_post_id),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    "State file is corrupt, treating as absent: {}",
                    e
                );
                None
            }
        }
    }

    /// Persist the watermark atomically (write temp file, rename over).
    pub fn save(&self, id: &PostId) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create state directory {}", parent.display())
                })?;
            }
        }

        let record = StateRecord {
            last_post_id: id.clone(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to rename {} into place", tmp.display()))?;
        Ok(())
    }
}
