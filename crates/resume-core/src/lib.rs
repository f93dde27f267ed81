use thiserror::Error;

pub mod client;
pub mod config_file;
pub mod display;
pub mod document;
pub mod mock;
pub mod result;
pub mod session;

// Re-export for convenience
pub use client::{DEFAULT_ENDPOINT, HttpParseApi, ParseApi};
pub use document::{DocumentKind, IntakeError, SelectedFile, clean_dropped_path};
pub use result::ParseResult;
pub use session::{SubmissionState, SubmitTicket, UploadSession};

/// Everything that can go wrong between pressing submit and getting a
/// [`ParseResult`].
///
/// The `Display` text is the message shown to the user in the error alert.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Non-2xx response carrying a `detail` message.
    #[error("{detail}")]
    Server { status: u16, detail: String },
    /// Non-2xx response without a usable `detail`.
    #[error("Request failed with status code {0}")]
    Status(u16),
    /// No response was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A 2xx response whose body is not JSON.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// The selected file could not be read.
    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
    /// The submission task died or never started.
    #[error("Submission aborted: {0}")]
    Aborted(String),
}

impl SubmitError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}
