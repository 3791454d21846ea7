use tracing::{info, warn};
use validator::Validate;

use super::dto::{CallbackEvent, GenerationRequest, VideoList, describe_validation};
use super::model::{COMPLETE_STATUS, COMPLETED_EVENT, VideoStatus};
use crate::common::error::{AppError, AppResult};
use crate::infrastructure::cache::VideoRecord;
use crate::infrastructure::video::{
    AvatarSettings, BackgroundSettings, BackgroundVideoSettings, CreateJobPayload, JobStatus,
    ListFilter, SceneInput,
};
use crate::state::AppState;
use crate::workers::status_poller;

const AVATAR: &str = "anna_costume1_cameraA";
const BACKGROUND: &str = "green_screen";
const SOUNDTRACK: &str = "modern";
const VISIBILITY: &str = "public";

pub struct VideoService;

impl VideoService {
    pub fn build_prompt(req: &GenerationRequest) -> String {
        format!(
            "Write a 25 words advertisement monologue for explaining the company, product and why \
             they should be interested in learning more about the product. The product \"{}\" from \
             the company \"{}\" targeting \"{}\".",
            req.product_info.trim(),
            req.company_info.trim(),
            req.target_group.trim(),
        )
    }

    pub fn build_job_payload(req: &GenerationRequest, script: String) -> CreateJobPayload {
        let product = req.product_info.trim();
        let callback_id = req
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        CreateJobPayload {
            test: false,
            visibility: VISIBILITY.to_string(),
            title: product.to_string(),
            description: format!("{} advertisement", product),
            soundtrack: SOUNDTRACK.to_string(),
            callback_id,
            input: vec![SceneInput {
                script_text: script,
                avatar: AVATAR.to_string(),
                background: BACKGROUND.to_string(),
                avatar_settings: AvatarSettings {
                    horizontal_align: "center".to_string(),
                    scale: 1.0,
                    style: "rectangular".to_string(),
                    seamless: false,
                },
                background_settings: BackgroundSettings {
                    video_settings: BackgroundVideoSettings {
                        short_background_content_match_mode: "freeze".to_string(),
                        long_background_content_match_mode: "trim".to_string(),
                    },
                },
            }],
        }
    }

    /// Script generation followed by job submission. Either step failing fails the whole call.
    pub async fn generate(state: AppState, req: GenerationRequest) -> AppResult<String> {
        req.validate()
            .map_err(|errors| AppError::validation(describe_validation(&errors)))?;

        // 1. Script
        let prompt = Self::build_prompt(&req);
        let script = state.completions.complete(&prompt).await?;

        // 2. Render job
        let payload = Self::build_job_payload(&req, script);
        let job_id = state.videos.create_job(&payload).await?;

        info!(job_id = %job_id, product = %payload.title, "Video generation submitted");

        if state.config.poll_on_submit {
            status_poller::spawn_status_poller(state.clone(), job_id.clone(), status_poller::log_outcome);
        }

        Ok(job_id)
    }

    /// Cache first, then the provider. A completed job found on the provider is written back.
    pub async fn retrieve(state: AppState, job_id: &str) -> AppResult<VideoStatus> {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            return Err(AppError::validation("Missing videoId parameter"));
        }

        match state.cache.get(job_id).await {
            Ok(Some(url)) => return Ok(VideoStatus::Ready(url)),
            Ok(None) => {}
            Err(e) => warn!(job_id = %job_id, "Video cache lookup failed, asking provider: {}", e),
        }

        let job = state.videos.get_job(job_id).await.map_err(|e| {
            if e.is_not_found() {
                AppError::not_found("Video data not found")
            } else {
                AppError::from(e)
            }
        })?;

        if let Some(record) = VideoRecord::from_job(&job) {
            if let Err(e) = state.cache.put(&record, state.config.video_cache_ttl).await {
                warn!(job_id = %job_id, "Failed to cache video record: {}", e);
            }
            info!(job_id = %job_id, "Video ready");
            return Ok(VideoStatus::Ready(record.into_download_url()));
        }

        Ok(VideoStatus::from_job(&job))
    }

    pub async fn list(state: AppState, user_id: &str) -> AppResult<VideoList> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("Missing userId parameter"));
        }

        let filter = ListFilter {
            limit: state.config.video_list_limit,
            offset: 0,
            callback_id: Some(user_id.to_string()),
            status: Some(JobStatus::Complete),
        };
        let videos = state.videos.list_jobs(&filter).await?;

        Ok(VideoList {
            total: videos.len(),
            videos,
        })
    }

    /// Webhook path. Only completed jobs with a download URL reach the cache.
    pub async fn accept_callback(state: AppState, event: CallbackEvent) -> AppResult<()> {
        let invalid = || AppError::validation("Invalid event type or status");

        if event.event_type != COMPLETED_EVENT {
            return Err(invalid());
        }
        let data = event.data.ok_or_else(invalid)?;
        if data.status.as_deref() != Some(COMPLETE_STATUS) {
            return Err(invalid());
        }

        let record = VideoRecord::completed(
            data.id.as_deref().unwrap_or_default(),
            data.download.as_deref().unwrap_or_default(),
        )
        .ok_or_else(invalid)?;

        state.cache.put(&record, state.config.video_cache_ttl).await?;

        info!(job_id = %record.job_id(), "Video completion received via webhook");
        Ok(())
    }
}
