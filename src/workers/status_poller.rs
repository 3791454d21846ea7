//! Server-side status polling for submitted jobs.
//!
//! Each poller checks a job on a fixed interval until it reaches a terminal
//! state, runs out of attempts, or is cancelled.

use std::future::Future;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::common::error::AppResult;
use crate::config::settings::AppConfig;
use crate::modules::video::model::VideoStatus;
use crate::modules::video::service::VideoService;
use crate::state::AppState;

/// `tokio::time::interval` panics on a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl From<&AppConfig> for PollSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.poll_max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready(String),
    Failed(String),
    Exhausted,
    Cancelled,
}

/// Runs `check` now and then once per interval.
///
/// Transient errors are logged and retried on the next tick; errors that can
/// never resolve (bad id, unknown job) end polling with `Failed`.
pub async fn poll_until_terminal<F, Fut>(
    settings: PollSettings,
    cancel: CancellationToken,
    mut check: F,
) -> PollOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<VideoStatus>>,
{
    let mut ticker = interval(settings.interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for attempt in 1..=settings.max_attempts {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            result = check() => result,
        };

        match result {
            Ok(VideoStatus::Ready(url)) => return PollOutcome::Ready(url),
            Ok(VideoStatus::Failed) => return PollOutcome::Failed("Video generation failed".to_string()),
            Ok(VideoStatus::Processing) => debug!(attempt, "Video still processing"),
            Err(e) if e.is_terminal() => return PollOutcome::Failed(e.to_string()),
            Err(e) => warn!(attempt, "Status check failed, retrying next tick: {}", e),
        }
    }

    PollOutcome::Exhausted
}

/// Spawns a poller for `job_id`. It stops with the app-wide shutdown token.
pub fn spawn_status_poller<F>(state: AppState, job_id: String, on_terminal: F) -> tokio::task::JoinHandle<PollOutcome>
where
    F: FnOnce(&str, &PollOutcome) + Send + 'static,
{
    let settings = PollSettings::from(&state.config);
    let cancel = state.shutdown.child_token();

    tokio::spawn(async move {
        info!(job_id = %job_id, interval = ?settings.interval, "🎥 Polling video status");

        let outcome = poll_until_terminal(settings, cancel, || {
            VideoService::retrieve(state.clone(), &job_id)
        })
        .await;

        on_terminal(&job_id, &outcome);
        outcome
    })
}

pub fn log_outcome(job_id: &str, outcome: &PollOutcome) {
    match outcome {
        PollOutcome::Ready(url) => info!(job_id = %job_id, url = %url, "✅ Video ready"),
        PollOutcome::Failed(reason) => error!(job_id = %job_id, "❌ Video polling stopped: {}", reason),
        PollOutcome::Exhausted => warn!(job_id = %job_id, "Video polling gave up after max attempts"),
        PollOutcome::Cancelled => debug!(job_id = %job_id, "Video polling cancelled"),
    }
}
