//! Client for the remote resume-parsing endpoint.

use std::future::Future;
use std::pin::Pin;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::SubmitError;
use crate::document::SelectedFile;
use crate::result::ParseResult;

/// Where the parsing backend listens unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/parse";

/// Multipart field the backend reads the upload from.
pub const FILE_FIELD: &str = "file";

/// Something that can turn a resume file into a [`ParseResult`].
pub trait ParseApi: Send + Sync {
    /// The URL submissions are sent to (for display and logging).
    fn endpoint(&self) -> &str;

    /// Upload `file` and return the parsed result. One attempt, no retries.
    fn parse<'a>(
        &'a self,
        file: &'a SelectedFile,
    ) -> Pin<Box<dyn Future<Output = Result<ParseResult, SubmitError>> + Send + 'a>>;
}

/// [`ParseApi`] over HTTP: a single multipart POST per submission.
pub struct HttpParseApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpParseApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ParseApi for HttpParseApi {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse<'a>(
        &'a self,
        file: &'a SelectedFile,
    ) -> Pin<Box<dyn Future<Output = Result<ParseResult, SubmitError>> + Send + 'a>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&file.path).await?;
            tracing::debug!(
                file = %file.name,
                size = bytes.len(),
                mime = file.kind.mime_type(),
                endpoint = %self.endpoint,
                "uploading resume"
            );

            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(file.kind.mime_type())?;
            let form = Form::new().part(FILE_FIELD, part);

            let resp = self
                .client
                .post(&self.endpoint)
                .multipart(form)
                .send()
                .await?;

            let status = resp.status();
            let body = resp.bytes().await?;

            if !status.is_success() {
                return Err(error_from_body(status.as_u16(), &body));
            }

            let value: Value =
                serde_json::from_slice(&body).map_err(|e| SubmitError::Decode(e.to_string()))?;
            Ok(ParseResult::from_envelope(&value))
        })
    }
}

/// Build the error for a non-2xx response, preferring the server's `detail`
/// string over the bare status description.
pub fn error_from_body(status: u16, body: &[u8]) -> SubmitError {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .filter(|d| !d.trim().is_empty());

    match detail {
        Some(detail) => SubmitError::Server { status, detail },
        None => SubmitError::Status(status),
    }
}
