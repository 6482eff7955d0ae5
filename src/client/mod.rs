//! Clients for the execution-tracing service.
//!
//! [`HttpTracer`] submits code to a running service; [`RecordedTracer`]
//! replays a response saved to disk. Both hand back the raw step list.

pub mod types;

use crate::config::{DEFAULT_REQUEST_TIMEOUT, EXECUTE_PATH};
use crate::errors::LoadError;
use crate::trace::ExecutionStep;
use log::{debug, info};
use reqwest::blocking::Client;
use std::fs;
use std::path::PathBuf;
use types::{ExecuteRequest, ExecuteResponse};

/// Something that turns source code into execution steps
pub trait TracerClient: Send + Sync {
    fn trace(&self, code: &str) -> Result<Vec<ExecutionStep>, LoadError>;
}

/// Decode a service response body
pub fn parse_response(body: &str) -> Result<Vec<ExecutionStep>, LoadError> {
    let response: ExecuteResponse = serde_json::from_str(body)
        .map_err(|e| LoadError::Transport(format!("invalid response: {}", e)))?;
    response.into_steps()
}

/// Tracer reached over HTTP
pub struct HttpTracer {
    client: Client,
    endpoint: String,
}

impl HttpTracer {
    pub fn new(server_url: &str) -> Result<Self, LoadError> {
        let client = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: execute_endpoint(server_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TracerClient for HttpTracer {
    fn trace(&self, code: &str) -> Result<Vec<ExecutionStep>, LoadError> {
        info!("Submitting {} bytes to {}", code.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExecuteRequest { code })
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!("HTTP {} ({} bytes)", status, body.len());

        match parse_response(&body) {
            // Request rejections come back as 4xx with an error body
            Err(LoadError::Transport(_)) if !status.is_success() => {
                Err(LoadError::Transport(format!("HTTP {}", status)))
            }
            other => other,
        }
    }
}

/// Tracer that reads a saved service response
pub struct RecordedTracer {
    path: PathBuf,
}

impl RecordedTracer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TracerClient for RecordedTracer {
    fn trace(&self, _code: &str) -> Result<Vec<ExecutionStep>, LoadError> {
        info!("Reading recorded trace from {}", self.path.display());
        let body = fs::read_to_string(&self.path).map_err(|e| {
            LoadError::Transport(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        parse_response(&body)
    }
}

/// Join the server URL and the execute path
fn execute_endpoint(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), EXECUTE_PATH)
}
