//! Service response and error types

use crate::core::{ExecutionStatus, StepStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code the service uses for invalid requests
pub const VALIDATION_EXCEPTION: &str = "ValidationException";

/// Message fragment reported when creating a pipeline whose name is taken
pub const NAME_COLLISION_MESSAGE: &str = "Pipeline names must be unique within";

/// Structured failure reported by the workflow service
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
#[serde(rename_all = "PascalCase")]
pub struct ServiceError {
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// A create was rejected because the pipeline already exists
    pub fn is_name_collision(&self) -> bool {
        self.code == VALIDATION_EXCEPTION && self.message.contains(NAME_COLLISION_MESSAGE)
    }
}

/// Response of CreatePipeline / UpdatePipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineArnResponse {
    pub pipeline_arn: String,
}

/// Response of DescribePipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineDescription {
    pub pipeline_arn: String,
    pub pipeline_name: String,
    #[serde(default)]
    pub pipeline_definition: Option<String>,
    #[serde(default)]
    pub pipeline_description: Option<String>,
    #[serde(default)]
    pub role_arn: Option<String>,
    #[serde(default)]
    pub pipeline_status: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_time: Option<DateTime<Utc>>,
}

/// Response of StartPipelineExecution / StopPipelineExecution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionArnResponse {
    pub pipeline_execution_arn: String,
}

/// Response of DescribePipelineExecution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionDescription {
    pub pipeline_execution_arn: String,
    pub pipeline_execution_status: ExecutionStatus,
    #[serde(default)]
    pub pipeline_arn: Option<String>,
    #[serde(default)]
    pub pipeline_execution_description: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_time: Option<DateTime<Utc>>,
}

/// One record of ListPipelineExecutionSteps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StepExecution {
    pub step_name: String,
    pub step_status: StepStatus,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}
