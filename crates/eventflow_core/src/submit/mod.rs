//! Outbound contact submission boundary.
//!
//! # Responsibility
//! - Define the transport contract the wizard submits through.
//! - Provide the HTTP implementation: one fire-and-forget JSON POST.
//!
//! # Invariants
//! - Any 2xx status is success; everything else, including transport
//!   failure, is a recoverable [`SubmitError`].
//! - Requests carry a client timeout so an unresponsive endpoint cannot
//!   strand the wizard in its submitting state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default endpoint path served by the site's contact API route.
pub const DEFAULT_CONTACT_ENDPOINT: &str = "/api/contact";

/// Default request timeout in milliseconds.
///
/// The source behavior has no timeout; without one a hung request never
/// resolves. Ten seconds bounds the submitting window while staying well
/// above normal endpoint latency.
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 10_000;

/// Submission transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Network-level failure: connect, timeout, malformed endpoint.
    Transport(String),
    /// Endpoint answered with a non-2xx status.
    Status(u16),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "submission transport failed: {details}"),
            Self::Status(code) => write!(f, "submission rejected with status {code}"),
        }
    }
}

impl Error for SubmitError {}

/// Endpoint and timeout for the outbound contact POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Target URL. Defaults to the site-relative API path; embedders with a
    /// separate origin supply the absolute URL.
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
        }
    }
}

/// Transport contract for submitting the accumulated form payload.
///
/// `payload` is the flattened JSON object of every accumulated field value.
pub trait ContactSubmitter {
    fn submit(&self, payload: &serde_json::Value) -> Result<(), SubmitError>;
}

/// Blocking HTTP transport: `POST <endpoint>` with a JSON body.
pub struct HttpContactSubmitter {
    config: SubmitConfig,
    client: reqwest::blocking::Client,
}

impl HttpContactSubmitter {
    pub fn new(config: SubmitConfig) -> Result<Self, SubmitError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl ContactSubmitter for HttpContactSubmitter {
    fn submit(&self, payload: &serde_json::Value) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(payload)
            .send()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}
