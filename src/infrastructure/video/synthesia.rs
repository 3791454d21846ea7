use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::{CreateJobPayload, ListFilter, VideoJob, VideoProvider};
use crate::infrastructure::error::{ProviderError, read_json};

const PROVIDER: &str = "synthesia";

#[derive(Clone)]
pub struct SynthesiaClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CreatedVideo {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    #[serde(default)]
    videos: Vec<VideoJob>,
}

impl SynthesiaClient {
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::decode(PROVIDER, format!("bad endpoint {}: {}", path, e)))
    }
}

#[async_trait]
impl VideoProvider for SynthesiaClient {
    async fn create_job(&self, payload: &CreateJobPayload) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint("videos")?)
            .header(header::AUTHORIZATION, &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        let created: CreatedVideo = read_json(PROVIDER, response).await?;
        info!(job_id = %created.id, "Synthesia job created");
        Ok(created.id)
    }

    async fn get_job(&self, job_id: &str) -> Result<VideoJob, ProviderError> {
        let mut url = self.endpoint("videos")?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::decode(PROVIDER, "base URL cannot have path segments"))?
            .push(job_id);

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        let job: VideoJob = read_json(PROVIDER, response).await?;
        debug!(job_id = %job.id, status = ?job.status, "Synthesia job fetched");
        Ok(job)
    }

    async fn list_jobs(&self, filter: &ListFilter) -> Result<Vec<VideoJob>, ProviderError> {
        let response = self
            .client
            .get(self.endpoint("videos")?)
            .header(header::AUTHORIZATION, &self.api_key)
            .query(&[("limit", filter.limit), ("offset", filter.offset)])
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER, e))?;

        let page: VideoPage = read_json(PROVIDER, response).await?;
        let fetched = page.videos.len();
        let jobs: Vec<VideoJob> = page.videos.into_iter().filter(|job| filter.matches(job)).collect();

        debug!(fetched, kept = jobs.len(), "Synthesia jobs listed");
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::video::JobStatus;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SynthesiaClient {
        let base = Url::parse(&format!("{}/v2/", server.uri())).unwrap();
        SynthesiaClient::new(base, "test-key", Duration::from_secs(5)).unwrap()
    }

    fn payload() -> CreateJobPayload {
        CreateJobPayload {
            test: false,
            visibility: "public".into(),
            title: "Widget".into(),
            description: "Widget advertisement".into(),
            soundtrack: "modern".into(),
            callback_id: Some("user-1".into()),
            input: vec![],
        }
    }

    #[tokio::test]
    async fn create_job_posts_payload_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/videos"))
            .and(header("authorization", "test-key"))
            .and(body_partial_json(json!({ "title": "Widget", "callbackId": "user-1", "test": false })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "job-1", "status": "in_progress" })))
            .expect(1)
            .mount(&server)
            .await;

        let id = client_for(&server).create_job(&payload()).await.unwrap();
        assert_eq!(id, "job-1");
    }

    #[tokio::test]
    async fn provider_errors_pass_through_unmodified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/videos"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"context":"Unauthorized"}"#))
            .mount(&server)
            .await;

        let err = client_for(&server).create_job(&payload()).await.unwrap_err();
        match err {
            ProviderError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, r#"{"context":"Unauthorized"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_job_reads_status_and_download() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/videos/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-1",
                "status": "complete",
                "download": "https://cdn/video.mp4"
            })))
            .mount(&server)
            .await;

        let job = client_for(&server).get_job("job-1").await.unwrap();
        assert_eq!(job.status, JobStatus::Complete);
        assert_eq!(job.ready_url(), Some("https://cdn/video.mp4"));
    }

    #[tokio::test]
    async fn get_job_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/videos/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get_job("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_jobs_filters_by_callback_and_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/videos"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "videos": [
                    { "id": "a", "status": "complete", "callbackId": "user-1" },
                    { "id": "b", "status": "in_progress", "callbackId": "user-1" },
                    { "id": "c", "status": "complete", "callbackId": "user-2" }
                ]
            })))
            .mount(&server)
            .await;

        let filter = ListFilter {
            limit: 100,
            offset: 0,
            callback_id: Some("user-1".into()),
            status: Some(JobStatus::Complete),
        };
        let jobs = client_for(&server).list_jobs(&filter).await.unwrap();

        let ids: Vec<&str> = jobs.iter().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
