use utoipa::OpenApi;

use crate::common::response::ErrorBody;
use crate::modules::video::dto::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::video::handler::generate_video,
        crate::modules::video::handler::retrieve_video,
        crate::modules::video::handler::get_video_list,
        crate::modules::video::handler::video_callback,
    ),
    components(
        schemas(
            GenerationRequest, GenerateVideoResponse, RetrieveVideoResponse,
            VideoList, VideoListResponse, CallbackEvent, CallbackData, AckResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "Video", description = "Ad script and video generation"),
        (name = "Webhook", description = "Video provider notifications")
    )
)]
pub struct ApiDoc;
