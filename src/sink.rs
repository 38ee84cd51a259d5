//! Presentation-layer seam consumed by the controller

use async_trait::async_trait;

/// Capability interface for whatever renders job state to the user
///
/// The controller only ever calls in; it never reads presentation state.
/// Implementations decide what "showing" means; tests substitute a
/// recorder.
#[async_trait]
pub trait UiSink: Send + Sync {
    /// Report an error to the user
    async fn show_error(&self, message: &str);

    /// Update the progress display, percent in 0..=100
    async fn set_progress(&self, percent: u8);

    /// Update the status line, with optional secondary detail
    async fn set_status_text(&self, message: &str, details: Option<&str>);

    /// The artifact is ready for download
    async fn show_download_ready(&self, pdf_filename: &str);

    /// Return the user to the input form (after a failed submission)
    async fn show_input_form(&self);
}

/// Terminal rendering of job state for the CLI
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl UiSink for ConsoleSink {
    async fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    async fn set_progress(&self, percent: u8) {
        println!("[{percent:>3}%]");
    }

    async fn set_status_text(&self, message: &str, details: Option<&str>) {
        match details {
            Some(details) if !message.is_empty() => println!("{message} - {details}"),
            Some(details) => println!("{details}"),
            None => println!("{message}"),
        }
    }

    async fn show_download_ready(&self, pdf_filename: &str) {
        println!("done: {pdf_filename}");
    }

    async fn show_input_form(&self) {
        // Nothing to restore in a one-shot CLI invocation
    }
}
