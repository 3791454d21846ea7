//! Video-generation provider adapter.
//!
//! Only the three operations the service needs are exposed; transport and
//! authentication live behind [`VideoProvider`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::infrastructure::error::ProviderError;

pub mod synthesia;

pub use synthesia::SynthesiaClient;

#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Submits a render job and returns the provider-assigned id.
    async fn create_job(&self, payload: &CreateJobPayload) -> Result<String, ProviderError>;

    async fn get_job(&self, job_id: &str) -> Result<VideoJob, ProviderError>;

    /// Lists jobs, keeping only those that match `filter`.
    async fn list_jobs(&self, filter: &ListFilter) -> Result<Vec<VideoJob>, ProviderError>;
}

/// Lifecycle state owned by the provider. This service only observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    #[serde(alias = "in_progress")]
    Processing,
    Complete,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoJob {
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
    /// Every other provider field, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VideoJob {
    /// Download URL, but only once the job is complete and the URL is non-empty.
    pub fn ready_url(&self) -> Option<&str> {
        match (self.status, self.download.as_deref()) {
            (JobStatus::Complete, Some(url)) if !url.trim().is_empty() => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub limit: u32,
    pub offset: u32,
    pub callback_id: Option<String>,
    pub status: Option<JobStatus>,
}

impl ListFilter {
    pub fn matches(&self, job: &VideoJob) -> bool {
        let callback_ok = match &self.callback_id {
            Some(wanted) => job.callback_id.as_deref() == Some(wanted.as_str()),
            None => true,
        };
        let status_ok = self.status.is_none_or(|wanted| job.status == wanted);

        callback_ok && status_ok
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    pub test: bool,
    pub visibility: String,
    pub title: String,
    pub description: String,
    pub soundtrack: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<String>,
    pub input: Vec<SceneInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneInput {
    pub script_text: String,
    pub avatar: String,
    pub background: String,
    pub avatar_settings: AvatarSettings,
    pub background_settings: BackgroundSettings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarSettings {
    pub horizontal_align: String,
    pub scale: f32,
    pub style: String,
    pub seamless: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSettings {
    pub video_settings: BackgroundVideoSettings,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundVideoSettings {
    pub short_background_content_match_mode: String,
    pub long_background_content_match_mode: String,
}
