use std::sync::Arc;

use arbuz_core::{AttemptId, Submission, SubmissionHandle, TaskCatalog, Verdict};
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    BroadcastHooks, EventBroadcaster, EventStream, HttpBackend, JudgeBackend, PollContext,
    ResultFetcher, Result, StatusPoller, SubmissionClient, TrackerConfig, TrackerError,
    TrackerHooks,
};

/// How a tracked attempt ended without error.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    Judged(Verdict),
    /// Tracking was cancelled before the submission left the queue.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct TrackReport {
    pub attempt_id: AttemptId,
    pub handle: SubmissionHandle,
    pub submitted_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: TrackOutcome,
}

impl TrackReport {
    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.outcome {
            TrackOutcome::Judged(verdict) => Some(verdict),
            TrackOutcome::Cancelled => None,
        }
    }

    pub fn waited(&self) -> chrono::Duration {
        self.finished_at - self.submitted_at
    }
}

/// Drives one submission through submit, queue polling and result retrieval.
pub struct SubmissionTracker {
    config: Arc<TrackerConfig>,
    client: SubmissionClient,
    poller: StatusPoller,
    fetcher: ResultFetcher,
    event_broadcaster: Arc<EventBroadcaster>,
}

impl SubmissionTracker {
    pub fn new(config: TrackerConfig, backend: Arc<dyn JudgeBackend>) -> Self {
        info!(
            base_url = %config.base_url,
            poll_interval_ms = config.poll_interval_ms,
            "initializing submission tracker"
        );

        let event_broadcaster = Arc::new(EventBroadcaster::new(config.event_buffer_size));
        Self {
            client: SubmissionClient::new(backend.clone()),
            poller: StatusPoller::new(backend.clone(), config.poll_interval()),
            fetcher: ResultFetcher::new(backend),
            config: Arc::new(config),
            event_broadcaster,
        }
    }

    /// Builds an HTTP-backed tracker and obtains a backend session cookie.
    pub async fn connect(config: TrackerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|err| TrackerError::Config(err.to_string()))?;
        let backend = HttpBackend::new(&config)?;
        backend.open_session().await?;
        Ok(Self::new(config, Arc::new(backend)))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn subscribe_events(&self) -> EventStream {
        self.event_broadcaster.subscribe()
    }

    pub async fn task_catalog(&self) -> Result<TaskCatalog> {
        Ok(self.client.task_catalog().await?)
    }

    /// Tracks a submission and reports through the event bus.
    pub async fn track_broadcast(
        &self,
        submission: Submission,
        cancel: &CancellationToken,
    ) -> Result<TrackReport> {
        let attempt_id = AttemptId::new();
        let hooks = BroadcastHooks::new(attempt_id, self.event_broadcaster.clone());
        self.track_attempt(attempt_id, submission, &hooks, cancel)
            .await
    }

    /// Tracks a submission, reporting through `hooks`.
    ///
    /// Every error is also passed to `on_critical_failure` before it is
    /// returned, so the caller's waiting state always ends.
    pub async fn track(
        &self,
        submission: Submission,
        hooks: &dyn TrackerHooks,
        cancel: &CancellationToken,
    ) -> Result<TrackReport> {
        self.track_attempt(AttemptId::new(), submission, hooks, cancel)
            .await
    }

    #[tracing::instrument(skip_all, fields(attempt_id = %attempt_id))]
    async fn track_attempt(
        &self,
        attempt_id: AttemptId,
        submission: Submission,
        hooks: &dyn TrackerHooks,
        cancel: &CancellationToken,
    ) -> Result<TrackReport> {
        let task = submission.task().clone();
        let language = submission.language();
        let submitted_at = Utc::now();

        let handle = match self.client.submit(submission).await {
            Ok(handle) => handle,
            Err(err) => return Err(fail(hooks, err.into())),
        };

        let context = PollContext {
            handle: handle.clone(),
            task,
            language,
        };
        let terminal = self
            .poller
            .poll_until_terminal(&context, cancel, |position| {
                hooks.on_queue_update(position)
            })
            .await;

        let outcome = match terminal {
            None => {
                info!(handle = %handle, "tracking cancelled");
                TrackOutcome::Cancelled
            }
            Some(_) => match self.fetcher.fetch(&handle).await {
                Ok(verdict) => {
                    hooks.on_verdict(&verdict);
                    TrackOutcome::Judged(verdict)
                }
                Err(err) => return Err(fail(hooks, err.into())),
            },
        };

        Ok(TrackReport {
            attempt_id,
            handle,
            submitted_at,
            finished_at: Utc::now(),
            outcome,
        })
    }
}

fn fail(hooks: &dyn TrackerHooks, err: TrackerError) -> TrackerError {
    warn!(error = %err, "submission tracking failed");
    hooks.on_critical_failure(&err);
    err
}
