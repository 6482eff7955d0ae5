//! Wire types exchanged with the tracing service.

use crate::errors::LoadError;
use crate::trace::ExecutionStep;
use serde::{Deserialize, Serialize};

/// Body of `POST /execute`
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteRequest<'a> {
    pub code: &'a str,
}

/// Error object reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// The traced program failed (`{"type": ..., "message": ...}`)
    Detailed {
        #[serde(rename = "type")]
        kind: String,
        message: String,
    },
    /// The request itself was rejected (`"Code too long..."`)
    Plain(String),
}

/// Response of `POST /execute`
///
/// Fields the service sends besides these (`final_variables`, `output`, ...)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExecuteResponse {
    Failure { error: ErrorBody },
    Success { execution_steps: Vec<ExecutionStep> },
}

impl ExecuteResponse {
    /// Steps on success. An empty list is returned as-is; the session decides
    /// that it is an empty result.
    pub fn into_steps(self) -> Result<Vec<ExecutionStep>, LoadError> {
        match self {
            ExecuteResponse::Success { execution_steps } => Ok(execution_steps),
            ExecuteResponse::Failure {
                error: ErrorBody::Detailed { kind, message },
            } => Err(LoadError::Execution { kind, message }),
            ExecuteResponse::Failure {
                error: ErrorBody::Plain(message),
            } => Err(LoadError::Execution {
                kind: "RequestError".to_string(),
                message,
            }),
        }
    }
}
