// HTTP client for the analysis backend.
//
// One request type: POST `{base}/analyze` with `{ "url": <identifier> }`.
// A spawned lookup task runs exactly one request and reports the outcome as
// a `FetchEvent` over an mpsc channel, tagged with the generation assigned
// at spawn time so the app can discard superseded completions.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::AnalysisResult;
use crate::protocol::{FetchEvent, FetchKind};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a usable response (connect, DNS, body
    /// decode). Collapses to the flow's fallback message for the user.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `detail` carries the
    /// error body's `detail` string when one was present.
    #[error("backend returned status {status}")]
    Backend {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl FetchError {
    /// The backend-provided message, when there is one.
    pub fn detail(&self) -> Option<String> {
        match self {
            FetchError::Backend { detail, .. } => detail.clone(),
            FetchError::Transport(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalyzeClient
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    url: &'a str,
}

/// Client for the backend's single `/analyze` endpoint.
pub struct AnalyzeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalyzeClient {
    /// Create a client for the given backend origin.
    pub fn new(base_url: &str) -> Self {
        AnalyzeClient {
            http: reqwest::Client::new(),
            endpoint: format!("{}/analyze", base_url.trim_end_matches('/')),
        }
    }

    /// Build a client from the application config.
    pub fn from_config(config: &Config) -> Self {
        AnalyzeClient::new(&config.backend.url)
    }

    /// The resolved endpoint URL (origin + `/analyze`).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one analysis lookup.
    ///
    /// The identifier may be a full URL, a bare name, or a platform ID;
    /// interpretation is entirely backend-defined. No retry, no explicit
    /// timeout, no cancellation.
    pub async fn analyze(&self, identifier: &str) -> Result<AnalysisResult, FetchError> {
        debug!(identifier, endpoint = %self.endpoint, "issuing analyze request");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AnalyzeRequest { url: identifier })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<AnalysisResult>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(FetchError::Backend {
                status,
                detail: extract_detail(&body),
            })
        }
    }

    /// Run one lookup and report the outcome over `tx`.
    ///
    /// This is the body of a spawned lookup task: it always sends exactly
    /// one `FetchEvent` (unless the receiver is gone, in which case the
    /// outcome is dropped with the rest of the session).
    pub async fn lookup(
        &self,
        kind: FetchKind,
        identifier: String,
        tx: mpsc::Sender<FetchEvent>,
        generation: u64,
    ) {
        match self.analyze(&identifier).await {
            Ok(result) => {
                let _ = tx
                    .send(FetchEvent::Completed {
                        kind,
                        generation,
                        result: Box::new(result),
                    })
                    .await;
            }
            Err(err) => {
                warn!(?kind, generation, error = %err, "analyze lookup failed");
                let _ = tx
                    .send(FetchEvent::Failed {
                        kind,
                        generation,
                        detail: err.detail(),
                    })
                    .await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Error body parsing
// ---------------------------------------------------------------------------

/// Extract the `detail` string from an error response body.
///
/// Expected shape: `{ "detail": "..." }`. Anything else (non-JSON bodies,
/// missing or non-string `detail`) yields `None`.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("detail")?.as_str().map(|s| s.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
