//! Mock parse backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::SubmitError;
use crate::client::ParseApi;
use crate::document::SelectedFile;
use crate::result::ParseResult;

/// A configurable mock response for [`MockParseApi`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Simulate a successful parse.
    Parsed(ParseResult),
    /// Simulate a non-2xx response with a `detail` message.
    Detail { status: u16, detail: String },
    /// Simulate a non-2xx response with no usable body.
    Status(u16),
    /// Simulate a 2xx response that is not JSON.
    Malformed(String),
}

/// A hand-rolled mock implementing [`ParseApi`] for tests.
///
/// Supports:
/// - A fixed response (used for every call), **or**
/// - A sequence of responses (one per call, repeating the last if exhausted).
/// - Optional per-call latency.
/// - Call counting and the names of uploaded files.
pub struct MockParseApi {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    uploaded: Mutex<Vec<String>>,
}

impl MockParseApi {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so we can pop() from the front cheaply.
        responses.reverse();
        let fallback = responses[0].clone();
        Self {
            responses: Mutex::new(responses),
            ..Self::new(fallback)
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `parse()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Names of the files passed to `parse()`, in call order.
    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        match self.responses.lock() {
            Ok(mut seq) => seq.pop().unwrap_or_else(|| self.fallback.clone()),
            Err(_) => self.fallback.clone(),
        }
    }
}

impl ParseApi for MockParseApi {
    fn endpoint(&self) -> &str {
        "mock://parse"
    }

    fn parse<'a>(
        &'a self,
        file: &'a SelectedFile,
    ) -> Pin<Box<dyn Future<Output = Result<ParseResult, SubmitError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut names) = self.uploaded.lock() {
            names.push(file.name.clone());
        }
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Parsed(result) => Ok(result),
                MockResponse::Detail { status, detail } => {
                    Err(SubmitError::Server { status, detail })
                }
                MockResponse::Status(status) => Err(SubmitError::Status(status)),
                MockResponse::Malformed(msg) => Err(SubmitError::Decode(msg)),
            }
        })
    }
}
