use crate::infrastructure::video::{JobStatus, VideoJob};

pub const COMPLETED_EVENT: &str = "video.completed";
pub const COMPLETE_STATUS: &str = "complete";

/// Result of one status check. `Processing` is the normal state while polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoStatus {
    Ready(String),
    Processing,
    Failed,
}

impl VideoStatus {
    pub fn from_job(job: &VideoJob) -> Self {
        if let Some(url) = job.ready_url() {
            return VideoStatus::Ready(url.to_string());
        }

        match job.status {
            JobStatus::Failed => VideoStatus::Failed,
            _ => VideoStatus::Processing,
        }
    }
}
