//! Timestamp offset parsing and formatting utilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    #[error("Invalid number in timestamp: {0}")]
    InvalidNumber(String),
}

/// Offset into the source video, in seconds, with human-readable parsing
///
/// Accepts plain seconds (`"90"`, `"90.5"`), `MM:SS` (`"1:30"`) and
/// `HH:MM:SS` (`"1:02:05"`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Offset(pub f64);

impl Offset {
    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }

    /// Format as unbounded `minutes:seconds` with zero-padded seconds
    ///
    /// Minutes are not wrapped at the hour: 3725 seconds renders as
    /// `"62:05"`, not `"1:02:05"`.
    pub fn to_display_time(&self) -> String {
        let total = self.0.floor() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OffsetVisitor;

        impl<'de> serde::de::Visitor<'de> for OffsetVisitor {
            type Value = Offset;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an offset as seconds or a \"MM:SS\"/\"HH:MM:SS\" string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Offset(v as f64))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Offset(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse::<Offset>().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_any(OffsetVisitor)
    }
}

impl FromStr for Offset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ParseError::InvalidFormat(s.to_string()));
        }

        // Plain seconds, possibly fractional
        if !s.contains(':') {
            let secs: f64 = s
                .parse()
                .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;
            if secs < 0.0 || !secs.is_finite() {
                return Err(ParseError::InvalidNumber(s.to_string()));
            }
            return Ok(Offset(secs));
        }

        // Colon-separated: MM:SS or HH:MM:SS (last field may be fractional)
        let parts: Vec<&str> = s.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [m, sec] => (0u64, parse_field(m)?, parse_seconds(sec)?),
            [h, m, sec] => (parse_field(h)?, parse_field(m)?, parse_seconds(sec)?),
            _ => return Err(ParseError::InvalidFormat(s.to_string())),
        };

        Ok(Offset(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds))
    }
}

fn parse_field(s: &str) -> Result<u64, ParseError> {
    s.parse()
        .map_err(|_| ParseError::InvalidNumber(s.to_string()))
}

fn parse_seconds(s: &str) -> Result<f64, ParseError> {
    let secs: f64 = s
        .parse()
        .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;
    if secs < 0.0 || !secs.is_finite() {
        return Err(ParseError::InvalidNumber(s.to_string()));
    }
    Ok(secs)
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_time())
    }
}
