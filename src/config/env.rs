use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    RedisUrl,
    SynthesiaApiKey,
    SynthesiaBaseUrl,
    OpenAiApiKey,
    OpenAiBaseUrl,
    OpenAiModel,
    VideoCacheTtlSecs,
    VideoListLimit,
    PollIntervalSecs,
    PollMaxAttempts,
    PollOnSubmit,
    HttpTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::RedisUrl => "REDIS_URL",
            EnvKey::SynthesiaApiKey => "SYNTHESIA_API_KEY",
            EnvKey::SynthesiaBaseUrl => "SYNTHESIA_BASE_URL",
            EnvKey::OpenAiApiKey => "OPENAI_API_KEY",
            EnvKey::OpenAiBaseUrl => "OPENAI_BASE_URL",
            EnvKey::OpenAiModel => "OPENAI_MODEL",
            EnvKey::VideoCacheTtlSecs => "VIDEO_CACHE_TTL_SECS",
            EnvKey::VideoListLimit => "VIDEO_LIST_LIMIT",
            EnvKey::PollIntervalSecs => "POLL_INTERVAL_SECS",
            EnvKey::PollMaxAttempts => "POLL_MAX_ATTEMPTS",
            EnvKey::PollOnSubmit => "POLL_ON_SUBMIT",
            EnvKey::HttpTimeoutSecs => "HTTP_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

/// Unset and blank values are both treated as absent.
pub fn get_optional(key: EnvKey) -> Option<String> {
    get(key).ok().filter(|val| !val.trim().is_empty())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

pub fn get_flag(key: EnvKey, default: bool) -> bool {
    match get(key) {
        Ok(val) => matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
