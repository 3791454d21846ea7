use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::settings::AppConfig;
use crate::infrastructure::cache::{InMemoryVideoCache, RedisVideoCache, VideoCache};
use crate::infrastructure::completion::{CompletionProvider, OpenAiClient};
use crate::infrastructure::video::{SynthesiaClient, VideoProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub videos: Arc<dyn VideoProvider>,
    pub completions: Arc<dyn CompletionProvider>,
    pub cache: Arc<dyn VideoCache>,
    /// Parent token of every background poller.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        videos: Arc<dyn VideoProvider>,
        completions: Arc<dyn CompletionProvider>,
        cache: Arc<dyn VideoCache>,
    ) -> Self {
        Self {
            config,
            videos,
            completions,
            cache,
            shutdown: CancellationToken::new(),
        }
    }

    /// Wires the real provider clients and picks the cache backend from config.
    pub async fn connect(config: AppConfig) -> Result<Self> {
        let videos = SynthesiaClient::new(
            config.synthesia_base_url.clone(),
            config.synthesia_api_key.clone(),
            config.http_timeout,
        )
        .context("Failed to build Synthesia client")?;

        let completions = OpenAiClient::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.http_timeout,
        )
        .context("Failed to build OpenAI client")?;

        let cache: Arc<dyn VideoCache> = match &config.redis_url {
            Some(url) => Arc::new(
                RedisVideoCache::connect(url)
                    .await
                    .context("Failed to connect to Redis")?,
            ),
            None => {
                warn!("REDIS_URL not set, video records are kept in memory");
                Arc::new(InMemoryVideoCache::new())
            }
        };

        if config.synthesia_api_key.is_empty() {
            warn!("SYNTHESIA_API_KEY is empty, video requests will be rejected upstream");
        }
        if config.openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is empty, script requests will be rejected upstream");
        }

        Ok(Self::new(config, Arc::new(videos), Arc::new(completions), cache))
    }
}
