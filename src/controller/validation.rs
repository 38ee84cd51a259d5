use thiserror::Error;

use crate::api::models::{StartConversionRequest, WireMode};
use crate::timestamps::TimestampSpec;

/// Minimum capture interval accepted by the service, in seconds
pub const MIN_INTERVAL_SECS: u32 = 5;

/// Capture mode selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interval,
    Custom,
}

/// A conversion request as assembled from user input
///
/// Immutable once submitted; a new attempt builds a new request.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub video_url: String,
    pub mode: Mode,
    /// Seconds between captures (interval mode)
    pub interval: Option<u32>,
    /// Raw timestamp document (custom mode)
    pub timestamps: Option<TimestampSpec>,
}

impl ConversionRequest {
    /// Build the wire payload for `POST /start_conversion`
    pub fn to_wire(&self) -> StartConversionRequest {
        StartConversionRequest {
            youtube_url: self.video_url.trim().to_string(),
            mode: match self.mode {
                Mode::Interval => WireMode::Interval,
                Mode::Custom => WireMode::Custom,
            },
            interval: match self.mode {
                Mode::Interval => self.interval,
                Mode::Custom => None,
            },
            timestamp_list: match self.mode {
                Mode::Custom => self.timestamps.as_ref().map(TimestampSpec::to_json_string),
                Mode::Interval => None,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("a YouTube URL is required")]
    EmptyUrl,

    #[error("'{0}' is not a YouTube URL")]
    NotYoutube(String),

    #[error("interval mode requires an interval")]
    MissingInterval,

    #[error("interval must be at least {MIN_INTERVAL_SECS} seconds, got {0}")]
    IntervalTooSmall(u32),

    #[error("custom mode requires timestamp data")]
    MissingTimestamps,
}

/// Validate a request client-side; failures never reach the network
///
/// Custom mode only requires that raw timestamp data is present; the
/// normalizer having produced at least one entry is not a submission
/// requirement.
pub fn validate(request: &ConversionRequest) -> Result<(), ValidationError> {
    let url = request.video_url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_youtube_url(url) {
        return Err(ValidationError::NotYoutube(url.to_string()));
    }

    match request.mode {
        Mode::Interval => {
            let interval = request.interval.ok_or(ValidationError::MissingInterval)?;
            if interval < MIN_INTERVAL_SECS {
                return Err(ValidationError::IntervalTooSmall(interval));
            }
        }
        Mode::Custom => {
            if request.timestamps.is_none() {
                return Err(ValidationError::MissingTimestamps);
            }
        }
    }

    Ok(())
}

/// Accepts youtube.com / youtu.be hosts (www. and m. variants), with or
/// without a scheme, as long as a path follows the host
fn is_youtube_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest
        .strip_prefix("www.")
        .or_else(|| rest.strip_prefix("m."))
        .unwrap_or(rest);

    ["youtube.com", "youtu.be"].iter().any(|host| {
        rest.strip_prefix(host)
            .and_then(|r| r.strip_prefix('/'))
            .is_some_and(|path| !path.is_empty())
    })
}
