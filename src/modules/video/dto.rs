use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::infrastructure::video::VideoJob;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[validate(custom(function = "not_blank", message = "companyInfo is required"))]
    pub company_info: String,
    #[validate(custom(function = "not_blank", message = "productInfo is required"))]
    pub product_info: String,
    #[validate(custom(function = "not_blank", message = "targetGroup is required"))]
    pub target_group: String,
    /// Correlation id forwarded to the provider as `callbackId`.
    #[serde(default)]
    pub user_id: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flattens validator output into one stable, human-readable line.
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(format!("{} is invalid", field)));
                (field.to_string(), message.into_owned())
            })
        })
        .collect();
    messages.sort();

    messages
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveVideoQuery {
    /// Job id returned by `generateVideo`
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    /// Correlation id the jobs were submitted with
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    pub success: bool,
    pub video_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveVideoResponse {
    pub success: bool,
    /// Download URL of the finished video
    pub video_data: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoList {
    #[schema(value_type = Vec<Object>)]
    pub videos: Vec<VideoJob>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoListResponse {
    pub success: bool,
    pub data: VideoList,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    pub success: bool,
}

/// Webhook notification from the video provider.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CallbackEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub data: Option<CallbackData>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CallbackData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
}
