use std::time::Duration;

use anyhow::{Context, Result, bail};
use url::Url;

use crate::config::env::{self, EnvKey};

// Trailing slashes keep `Url::join` from dropping the version segment.
pub const DEFAULT_SYNTHESIA_BASE_URL: &str = "https://api.synthesia.io/v2/";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// 7 days.
pub const DEFAULT_VIDEO_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;
/// 1 year.
pub const MAX_VIDEO_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub redis_url: Option<String>,
    pub synthesia_api_key: String,
    pub synthesia_base_url: Url,
    pub openai_api_key: String,
    pub openai_base_url: Url,
    pub openai_model: String,
    pub video_cache_ttl: Duration,
    pub video_list_limit: u32,
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
    pub poll_on_submit: bool,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        // Missing API keys degrade to empty credentials; the providers reject them.
        let synthesia_base_url = parse_base_url(
            EnvKey::SynthesiaBaseUrl,
            &env::get_or(EnvKey::SynthesiaBaseUrl, DEFAULT_SYNTHESIA_BASE_URL),
        )?;
        let openai_base_url = parse_base_url(
            EnvKey::OpenAiBaseUrl,
            &env::get_or(EnvKey::OpenAiBaseUrl, DEFAULT_OPENAI_BASE_URL),
        )?;

        let config = Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            redis_url: env::get_optional(EnvKey::RedisUrl),
            synthesia_api_key: env::get_or(EnvKey::SynthesiaApiKey, ""),
            synthesia_base_url,
            openai_api_key: env::get_or(EnvKey::OpenAiApiKey, ""),
            openai_base_url,
            openai_model: env::get_or(EnvKey::OpenAiModel, DEFAULT_OPENAI_MODEL),
            video_cache_ttl: Duration::from_secs(env::get_parsed(
                EnvKey::VideoCacheTtlSecs,
                DEFAULT_VIDEO_CACHE_TTL_SECS,
            )),
            video_list_limit: env::get_parsed(EnvKey::VideoListLimit, 100),
            poll_interval: Duration::from_secs(env::get_parsed(EnvKey::PollIntervalSecs, 30)),
            poll_max_attempts: env::get_parsed(EnvKey::PollMaxAttempts, 40),
            poll_on_submit: env::get_flag(EnvKey::PollOnSubmit, false),
            http_timeout: Duration::from_secs(env::get_parsed(EnvKey::HttpTimeoutSecs, 60)),
        };
        config.validate()?;

        Ok(config)
    }

    /// Rejects values the poller and cache backends cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            bail!("{} must be at least 1 second", EnvKey::PollIntervalSecs.as_str());
        }
        if self.video_cache_ttl.is_zero() || self.video_cache_ttl.as_secs() > MAX_VIDEO_CACHE_TTL_SECS {
            bail!(
                "{} must be between 1 and {} seconds",
                EnvKey::VideoCacheTtlSecs.as_str(),
                MAX_VIDEO_CACHE_TTL_SECS
            );
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            redis_url: None,
            synthesia_api_key: String::new(),
            synthesia_base_url: Url::parse(DEFAULT_SYNTHESIA_BASE_URL)
                .expect("default Synthesia base URL is valid"),
            openai_api_key: String::new(),
            openai_base_url: Url::parse(DEFAULT_OPENAI_BASE_URL)
                .expect("default OpenAI base URL is valid"),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            video_cache_ttl: Duration::from_secs(DEFAULT_VIDEO_CACHE_TTL_SECS),
            video_list_limit: 100,
            poll_interval: Duration::from_secs(30),
            poll_max_attempts: 40,
            poll_on_submit: false,
            http_timeout: Duration::from_secs(60),
        }
    }
}

fn parse_base_url(key: EnvKey, raw: &str) -> Result<Url> {
    // A trailing slash keeps `Url::join` from dropping the last path segment.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized).with_context(|| format!("{} is not a valid URL: {}", key.as_str(), raw))
}
