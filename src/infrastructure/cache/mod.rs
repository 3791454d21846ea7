//! Job id → download URL cache.
//!
//! A miss is `Ok(None)`; `Err` is reserved for the backend failing.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::infrastructure::video::VideoJob;

pub mod memory;
pub mod redis;

pub use memory::InMemoryVideoCache;
pub use self::redis::RedisVideoCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// A resolved video. Only built from a job observed complete with a real URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    job_id: String,
    download_url: String,
}

impl VideoRecord {
    pub fn from_job(job: &VideoJob) -> Option<Self> {
        let url = job.ready_url()?;
        Self::completed(&job.id, url)
    }

    /// `None` unless both the id and the URL are non-blank.
    pub fn completed(job_id: &str, download_url: &str) -> Option<Self> {
        let job_id = job_id.trim();
        let download_url = download_url.trim();
        if job_id.is_empty() || download_url.is_empty() {
            return None;
        }

        Some(Self {
            job_id: job_id.to_string(),
            download_url: download_url.to_string(),
        })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    pub fn into_download_url(self) -> String {
        self.download_url
    }
}

pub fn record_key(job_id: &str) -> String {
    format!("video_record:{}", job_id)
}

#[async_trait]
pub trait VideoCache: Send + Sync {
    async fn get(&self, job_id: &str) -> Result<Option<String>, CacheError>;

    /// Stores `record`, replacing any previous value, for `ttl`.
    async fn put(&self, record: &VideoRecord, ttl: Duration) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_requires_complete_job() {
        let busy: VideoJob =
            serde_json::from_value(json!({ "id": "j", "status": "processing", "download": "https://cdn/v.mp4" }))
                .unwrap();
        assert!(VideoRecord::from_job(&busy).is_none());

        let done: VideoJob =
            serde_json::from_value(json!({ "id": "j", "status": "complete", "download": "https://cdn/v.mp4" }))
                .unwrap();
        let record = VideoRecord::from_job(&done).unwrap();
        assert_eq!(record.job_id(), "j");
        assert_eq!(record.download_url(), "https://cdn/v.mp4");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(VideoRecord::completed("", "https://cdn/v.mp4").is_none());
        assert!(VideoRecord::completed("j", " ").is_none());
    }

    #[test]
    fn key_is_namespaced() {
        assert_eq!(record_key("abc"), "video_record:abc");
    }
}
