use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use super::dto::{
    AckResponse, CallbackEvent, GenerateVideoResponse, GenerationRequest, RetrieveVideoQuery,
    RetrieveVideoResponse, VideoListQuery, VideoListResponse,
};
use super::model::VideoStatus;
use super::service::VideoService;
use crate::common::error::AppError;
use crate::common::response::{ApiSuccess, ErrorBody};
use crate::state::AppState;

/// Generate an advertisement video
#[utoipa::path(
    post,
    path = "/api/generateVideo",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Render job submitted", body = GenerateVideoResponse),
        (status = 400, description = "Missing or blank input", body = ErrorBody),
        (status = 500, description = "Script or video provider failed", body = ErrorBody)
    ),
    tag = "Video"
)]
pub async fn generate_video(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(e) => return AppError::validation(e.body_text()).into_response(),
    };

    match VideoService::generate(state, req).await {
        Ok(video_id) => ApiSuccess(
            GenerateVideoResponse {
                success: true,
                video_id,
            },
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Check whether a video is ready
#[utoipa::path(
    get,
    path = "/api/retrieveVideo",
    params(RetrieveVideoQuery),
    responses(
        (status = 200, description = "Video ready", body = RetrieveVideoResponse),
        (status = 400, description = "Missing videoId parameter", body = ErrorBody),
        (status = 404, description = "Still processing, failed, or unknown", body = ErrorBody),
        (status = 500, description = "Video provider failed", body = ErrorBody)
    ),
    tag = "Video"
)]
pub async fn retrieve_video(
    State(state): State<AppState>,
    query: Result<Query<RetrieveVideoQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(e) => return AppError::validation(e.body_text()).into_response(),
    };
    let video_id = query.video_id.unwrap_or_default();

    match VideoService::retrieve(state, &video_id).await {
        Ok(VideoStatus::Ready(url)) => ApiSuccess(
            RetrieveVideoResponse {
                success: true,
                video_data: url,
            },
            StatusCode::OK,
        )
        .into_response(),
        Ok(VideoStatus::Processing) => AppError::NotReady.into_response(),
        Ok(VideoStatus::Failed) => AppError::Failed.into_response(),
        Err(e) => e.into_response(),
    }
}

/// List a user's finished videos
#[utoipa::path(
    get,
    path = "/api/getVideoList",
    params(VideoListQuery),
    responses(
        (status = 200, description = "Completed videos for the user", body = VideoListResponse),
        (status = 400, description = "Missing userId parameter", body = ErrorBody),
        (status = 500, description = "Video provider failed", body = ErrorBody)
    ),
    tag = "Video"
)]
pub async fn get_video_list(
    State(state): State<AppState>,
    query: Result<Query<VideoListQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(e) => return AppError::validation(e.body_text()).into_response(),
    };
    let user_id = query.user_id.unwrap_or_default();

    match VideoService::list(state, &user_id).await {
        Ok(data) => ApiSuccess(VideoListResponse { success: true, data }, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Video provider webhook
#[utoipa::path(
    post,
    path = "/api/videoCallback",
    request_body = CallbackEvent,
    responses(
        (status = 200, description = "Completion recorded", body = AckResponse),
        (status = 400, description = "Invalid event type or status", body = ErrorBody)
    ),
    tag = "Webhook"
)]
pub async fn video_callback(
    State(state): State<AppState>,
    payload: Result<Json<CallbackEvent>, JsonRejection>,
) -> impl IntoResponse {
    let Json(event) = match payload {
        Ok(json) => json,
        Err(e) => return AppError::validation(e.body_text()).into_response(),
    };

    match VideoService::accept_callback(state, event).await {
        Ok(()) => ApiSuccess(AckResponse { success: true }, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn method_not_allowed() -> impl IntoResponse {
    AppError::MethodNotAllowed
}
