//! Job lifecycle controller
//!
//! Owns the client side of a conversion job: validates the request, submits
//! it, polls `/job_status` on a fixed cadence, and reports progress and the
//! terminal outcome through a [`crate::sink::UiSink`]. Exactly one terminal
//! transition occurs per job; once a job is `Done` or `Failed` no further
//! poll request is issued for it.

mod runner;
mod state;
pub mod validation;

pub use runner::{DEFAULT_POLL_INTERVAL, JobController};
pub use state::Phase;
pub use validation::{ConversionRequest, Mode, ValidationError};

use thiserror::Error;

use crate::api::ClientError;

/// Why a submission did not produce a job
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected client-side; no network call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure or server-reported rejection
    #[error("submission failed: {0}")]
    Submission(#[from] ClientError),
}
