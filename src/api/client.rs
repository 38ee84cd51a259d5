//! HTTP client for the conversion service endpoints

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ClientError, Result};
use super::models::{JobStatusSnapshot, StartConversionRequest, StartConversionResponse};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("slidesnap/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client for the conversion service
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client against a service base URL
    pub fn new(base_url: &str, settings: HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(&settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a conversion job (`POST /start_conversion`)
    ///
    /// Returns the server-assigned job id. A body carrying an `error` field
    /// is a rejection with the server's message, whatever the HTTP status.
    pub async fn start_conversion(&self, request: &StartConversionRequest) -> Result<String> {
        let url = format!("{}/start_conversion", self.base_url);
        debug!(url, "Submitting conversion request");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<StartConversionResponse>(&body) {
            Ok(StartConversionResponse {
                error: Some(message),
                ..
            }) => {
                warn!(%status, error = %message, "Submission rejected by server");
                Err(ClientError::Server(message))
            }
            Ok(StartConversionResponse {
                job_id: Some(job_id),
                ..
            }) if status.is_success() => {
                debug!(job_id, "Conversion job accepted");
                Ok(job_id)
            }
            _ => Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }

    /// Fetch the current status snapshot (`GET /job_status/{job_id}`)
    ///
    /// The service reports an unknown job as a `failed` snapshot with a 404
    /// status, so the body is parsed before the status code is consulted.
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatusSnapshot> {
        let url = format!("{}/job_status/{}", self.base_url, job_id);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<JobStatusSnapshot>(&body) {
            Ok(snapshot) => Ok(snapshot),
            Err(_) => Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }

    /// Resolve the download target for a finished artifact
    pub fn download_url(&self, pdf_filename: &str) -> String {
        format!("{}/download/{}", self.base_url, pdf_filename)
    }

    /// Fetch a finished artifact (`GET /download/{pdf_filename}`)
    pub async fn download(&self, pdf_filename: &str) -> Result<Bytes> {
        let url = self.download_url(pdf_filename);
        debug!(url, "Downloading artifact");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!(url, size = bytes.len(), "Artifact downloaded");
        Ok(bytes)
    }
}
