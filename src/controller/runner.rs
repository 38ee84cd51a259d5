//! Controller driving a conversion job from submission to terminal state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::api::models::{JobStatus, JobStatusSnapshot};
use crate::sink::UiSink;

use super::state::Phase;
use super::validation::{self, ConversionRequest};
use super::SubmitError;

/// Default cadence between status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Drives one conversion job at a time against the service
///
/// Construct one instance per session. All state lives in private fields;
/// the generation counter decides whether a poll tick (or an in-flight
/// response) still belongs to the current job; timer identity is never
/// consulted. Mutations are serialized behind a mutex so the at-most-one
/// active poll loop invariant holds on a multi-threaded runtime.
pub struct JobController<S: UiSink + 'static> {
    client: Arc<ApiClient>,
    sink: Arc<S>,
    poll_interval: Duration,
    generation: Arc<AtomicU64>,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    phase: Phase,
    poll_task: Option<JoinHandle<()>>,
}

impl<S: UiSink + 'static> JobController<S> {
    pub fn new(client: Arc<ApiClient>, sink: S, poll_interval: Duration) -> Self {
        Self {
            client,
            sink: Arc::new(sink),
            poll_interval,
            generation: Arc::new(AtomicU64::new(0)),
            inner: Arc::new(Mutex::new(Inner {
                phase: Phase::Idle,
                poll_task: None,
            })),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.inner.lock().expect("controller state poisoned").phase.clone()
    }

    /// Validate and submit a request; on success polling starts immediately
    ///
    /// Validation failures never issue a network call. Both validation and
    /// submission failures are reported once through the sink's error
    /// channel and return the controller to `Idle` with the input form
    /// restored, so a fresh submit is always possible afterward. Any loop
    /// still polling a previous job is superseded before the request goes
    /// out, so a failed resubmit does not leave it running.
    pub async fn submit(&self, request: ConversionRequest) -> Result<String, SubmitError> {
        if let Err(err) = validation::validate(&request) {
            self.set_phase(Phase::Idle);
            self.sink.show_error(&err.to_string()).await;
            self.sink.show_input_form().await;
            return Err(err.into());
        }

        self.cancel();

        match self.client.start_conversion(&request.to_wire()).await {
            Ok(job_id) => {
                debug!(job_id, "Job submitted, starting poll loop");
                self.start_polling(job_id.clone());
                Ok(job_id)
            }
            Err(err) => {
                self.set_phase(Phase::Idle);
                self.sink.show_error(&err.to_string()).await;
                self.sink.show_input_form().await;
                Err(err.into())
            }
        }
    }

    /// Start (or restart) polling for a job id
    ///
    /// Supersedes any poll loop already running for a previous job: the
    /// generation bump makes older loops observe a stale token and exit
    /// before their next fetch, so at most one loop is ever active.
    pub fn start_polling(&self, job_id: String) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Phase goes to Polling before the loop can observe anything, so a
        // terminal first tick is never overwritten by this write
        let mut inner = self.inner.lock().expect("controller state poisoned");
        inner.phase = Phase::Polling {
            job_id: job_id.clone(),
        };
        inner.poll_task = Some(tokio::spawn(poll_loop(
            Arc::clone(&self.client),
            Arc::clone(&self.sink),
            Arc::clone(&self.generation),
            Arc::clone(&self.inner),
            job_id,
            token,
            self.poll_interval,
        )));
    }

    /// Stop the active poll loop, if any
    ///
    /// Safe to call repeatedly; a job already terminal is unaffected. The
    /// in-flight request (if one is out) cannot be aborted; its response
    /// is discarded on arrival via the stale-token check.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let mut inner = self.inner.lock().expect("controller state poisoned");
        if matches!(inner.phase, Phase::Polling { .. }) {
            inner.phase = Phase::Idle;
        }
    }

    /// Wait for the active poll loop to reach a terminal state (or be
    /// cancelled), then return the resulting phase
    pub async fn wait(&self) -> Phase {
        let task = {
            let mut inner = self.inner.lock().expect("controller state poisoned");
            inner.poll_task.take()
        };
        if let Some(task) = task {
            // The loop never panics; a JoinError can only mean abort
            let _ = task.await;
        }
        self.phase()
    }

    /// Resolve the download target for a finished artifact
    pub fn download_url(&self, pdf_filename: &str) -> String {
        self.client.download_url(pdf_filename)
    }

    fn set_phase(&self, phase: Phase) {
        self.inner.lock().expect("controller state poisoned").phase = phase;
    }
}

async fn poll_loop<S: UiSink>(
    client: Arc<ApiClient>,
    sink: Arc<S>,
    generation: Arc<AtomicU64>,
    inner: Arc<Mutex<Inner>>,
    job_id: String,
    token: u64,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately: one status fetch right away,
        // then the fixed cadence
        ticker.tick().await;

        if generation.load(Ordering::SeqCst) != token {
            debug!(job_id, "Poll loop superseded before fetch, exiting");
            return;
        }

        let result = client.job_status(&job_id).await;

        // The fetch was in flight while a cancel or a new submit may have
        // happened; a stale result is discarded without touching the sink
        if generation.load(Ordering::SeqCst) != token {
            debug!(job_id, "Discarding stale poll response");
            return;
        }

        match result {
            Ok(snapshot) => {
                let terminal =
                    apply_snapshot(&sink, &inner, &job_id, &snapshot).await;
                if terminal {
                    return;
                }
            }
            Err(err) => {
                warn!(job_id, error = %err, "Status poll failed");
                set_phase(&inner, Phase::Failed);
                sink.show_error(&format!("Error checking job status: {err}"))
                    .await;
                return;
            }
        }
    }
}

/// Render one snapshot through the sink; returns true on a terminal status
async fn apply_snapshot<S: UiSink>(
    sink: &Arc<S>,
    inner: &Arc<Mutex<Inner>>,
    job_id: &str,
    snapshot: &JobStatusSnapshot,
) -> bool {
    if let Some(progress) = snapshot.progress {
        let clamped = if (0.0..=1.0).contains(&progress) {
            progress
        } else {
            warn!(job_id, progress, "Progress outside [0,1] in status response, clamping");
            progress.clamp(0.0, 1.0)
        };
        sink.set_progress((clamped * 100.0).round() as u8).await;
    }

    if snapshot.message.is_some() || snapshot.details.is_some() {
        sink.set_status_text(
            snapshot.message.as_deref().unwrap_or_default(),
            snapshot.details.as_deref(),
        )
        .await;
    }

    match snapshot.status {
        JobStatus::Completed => {
            set_phase(
                inner,
                Phase::Done {
                    job_id: job_id.to_string(),
                    pdf_filename: snapshot.pdf_filename.clone(),
                },
            );
            match snapshot.pdf_filename.as_deref() {
                Some(filename) => sink.show_download_ready(filename).await,
                None => warn!(job_id, "Completed without a pdf_filename"),
            }
            true
        }
        JobStatus::Failed => {
            set_phase(inner, Phase::Failed);
            sink.show_error(
                snapshot
                    .message
                    .as_deref()
                    .unwrap_or("Conversion failed. Please try again."),
            )
            .await;
            true
        }
        JobStatus::Pending | JobStatus::Running => false,
    }
}

fn set_phase(inner: &Arc<Mutex<Inner>>, phase: Phase) {
    inner.lock().expect("controller state poisoned").phase = phase;
}
