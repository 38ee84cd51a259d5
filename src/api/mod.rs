//! HTTP contract with the conversion service
//!
//! The service exposes three endpoints:
//! - `POST /start_conversion`: submit a job, returns `{ "job_id": ... }`
//!   or `{ "error": ... }`
//! - `GET /job_status/{job_id}`: current [`models::JobStatusSnapshot`]
//! - `GET /download/{pdf_filename}`: the finished PDF artifact

mod client;
mod error;
pub mod models;

pub use client::{ApiClient, HttpSettings};
pub use error::ClientError;
