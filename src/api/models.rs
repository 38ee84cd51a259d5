use serde::{Deserialize, Serialize};

/// Capture mode for a conversion job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    Interval,
    Custom,
}

/// Body of `POST /start_conversion`
///
/// `timestamp_list` is the raw user-supplied timestamp document,
/// JSON-encoded into a string; the service parses it again server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversionRequest {
    pub youtube_url: String,
    pub mode: WireMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_list: Option<String>,
}

/// Response of `POST /start_conversion`
///
/// Exactly one of the fields is populated; a body carrying `error` is a
/// rejected submission regardless of HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversionResponse {
    pub job_id: Option<String>,
    pub error: Option<String>,
}

/// Job lifecycle status as reported by `GET /job_status/{job_id}`
///
/// The aliases cover the service's raw internal phase names (`queued`,
/// `processing`, `generating_pdf`); both map onto the non-terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[serde(alias = "queued")]
    Pending,
    #[serde(alias = "processing", alias = "generating_pdf")]
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal statuses permit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One poll result; each snapshot fully replaces the previous one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusSnapshot {
    pub status: JobStatus,
    /// Fraction complete in [0,1]; out-of-range values are clamped by the
    /// controller before display
    pub progress: Option<f64>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub pdf_filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_deserializes_spec_names() {
        let s: JobStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(s, JobStatus::Pending);
        let s: JobStatus = serde_json::from_str(r#""running""#).unwrap();
        assert_eq!(s, JobStatus::Running);
        let s: JobStatus = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(s, JobStatus::Completed);
        let s: JobStatus = serde_json::from_str(r#""failed""#).unwrap();
        assert_eq!(s, JobStatus::Failed);
    }

    #[test]
    fn status_deserializes_raw_service_names() {
        let s: JobStatus = serde_json::from_str(r#""queued""#).unwrap();
        assert_eq!(s, JobStatus::Pending);
        let s: JobStatus = serde_json::from_str(r#""processing""#).unwrap();
        assert_eq!(s, JobStatus::Running);
        let s: JobStatus = serde_json::from_str(r#""generating_pdf""#).unwrap();
        assert_eq!(s, JobStatus::Running);
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        assert!(serde_json::from_str::<JobStatus>(r#""exploded""#).is_err());
    }

    #[test]
    fn terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn interval_request_omits_timestamp_list() {
        let request = StartConversionRequest {
            youtube_url: "https://youtube.com/watch?v=abc".to_string(),
            mode: WireMode::Interval,
            interval: Some(60),
            timestamp_list: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["mode"], "interval");
        assert_eq!(body["interval"], 60);
        assert!(body.get("timestamp_list").is_none());
    }

    #[test]
    fn snapshot_tolerates_missing_optional_fields() {
        let snapshot: JobStatusSnapshot =
            serde_json::from_str(r#"{"status": "running"}"#).unwrap();
        assert_eq!(snapshot.status, JobStatus::Running);
        assert!(snapshot.progress.is_none());
        assert!(snapshot.pdf_filename.is_none());
    }
}
