use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{CacheError, VideoCache, VideoRecord, record_key};

struct Entry {
    download_url: String,
    /// `None` when the TTL runs past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self) -> bool {
        self.expires_at.is_none_or(|at| at > Instant::now())
    }
}

/// Process-local cache used when no Redis is configured, and in tests.
/// Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct InMemoryVideoCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryVideoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VideoCache for InMemoryVideoCache {
    async fn get(&self, job_id: &str) -> Result<Option<String>, CacheError> {
        let key = record_key(job_id);
        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                None => return Ok(None),
                Some(entry) if entry.is_live() => {
                    return Ok(Some(entry.download_url.clone()));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        // Re-check under the write lock; a writer may have refreshed it
        if let Some(entry) = entries.get(&key) {
            if entry.is_live() {
                return Ok(Some(entry.download_url.clone()));
            }
            entries.remove(&key);
        }
        Ok(None)
    }

    async fn put(&self, record: &VideoRecord, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            download_url: record.download_url().to_string(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.write().await.insert(record_key(record.job_id()), entry);
        Ok(())
    }
}
