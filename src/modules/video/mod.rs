use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/generateVideo",
            post(handler::generate_video).fallback(handler::method_not_allowed),
        )
        .route(
            "/retrieveVideo",
            get(handler::retrieve_video).fallback(handler::method_not_allowed),
        )
        .route(
            "/getVideoList",
            get(handler::get_video_list).fallback(handler::method_not_allowed),
        )
        .route(
            "/videoCallback",
            post(handler::video_callback).fallback(handler::method_not_allowed),
        )
}
