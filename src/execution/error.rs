//! Errors raised by pipeline lifecycle operations

use crate::client::ServiceError;
use crate::core::{ExecutionStatus, PipelineError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Raised locally, no start request is sent
    #[error("Pipeline '{name}' does not exist on the workflow service. Call create() before start()")]
    PipelineNotFound { name: String },

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid pipeline definition: {0}")]
    Definition(#[from] PipelineError),

    #[error("Execution {arn} did not reach a terminal state after {attempts} attempts")]
    WaitTimeout { arn: String, attempts: u32 },

    #[error("Execution {arn} ended with status {status}: {reason}")]
    ExecutionFailed {
        arn: String,
        status: ExecutionStatus,
        reason: String,
    },
}

impl WorkflowError {
    /// The underlying service failure, if any
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            WorkflowError::Service(e) => Some(e),
            _ => None,
        }
    }
}
