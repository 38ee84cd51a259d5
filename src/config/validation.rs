use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrlScheme(String),

    #[error("server.base_url has no host")]
    MissingHost,

    #[error("polling.interval_ms must be at least {minimum}, got {actual}")]
    PollIntervalTooSmall { minimum: u64, actual: u64 },

    #[error("http timeout must be positive: {field}")]
    ZeroTimeout { field: &'static str },
}

/// Floor for the poll cadence; anything lower hammers the service
const MIN_POLL_INTERVAL_MS: u64 = 250;

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_base_url(config)?;
    validate_polling(config)?;
    validate_timeouts(config)?;
    Ok(())
}

fn validate_base_url(config: &Config) -> Result<(), ValidationError> {
    let base_url = config.server.base_url.trim();

    let host = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::InvalidBaseUrlScheme(base_url.to_string()))?;

    if host.trim_matches('/').is_empty() {
        return Err(ValidationError::MissingHost);
    }

    Ok(())
}

fn validate_polling(config: &Config) -> Result<(), ValidationError> {
    if config.polling.interval_ms < MIN_POLL_INTERVAL_MS {
        return Err(ValidationError::PollIntervalTooSmall {
            minimum: MIN_POLL_INTERVAL_MS,
            actual: config.polling.interval_ms,
        });
    }
    Ok(())
}

fn validate_timeouts(config: &Config) -> Result<(), ValidationError> {
    if config.http.connect_timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout {
            field: "http.connect_timeout_secs",
        });
    }
    if config.http.request_timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout {
            field: "http.request_timeout_secs",
        });
    }
    Ok(())
}
