//! Workflow service client interface

pub mod request;
pub mod response;

use async_trait::async_trait;
pub use request::{
    format_start_parameters, CreateOptions, ParameterOverride, PipelineRequest,
    StartExecutionRequest, Tag, WaitConfig,
};
pub use response::{
    ExecutionDescription, PipelineArnResponse, PipelineDescription, ServiceError,
    ExecutionArnResponse, StepExecution,
};

/// Remote workflow service operations
///
/// Each method is a single request/response call. Implementations report
/// failures as [`ServiceError`] and do not retry.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    async fn create_pipeline(
        &self,
        request: &PipelineRequest,
    ) -> Result<PipelineArnResponse, ServiceError>;

    async fn update_pipeline(
        &self,
        request: &PipelineRequest,
    ) -> Result<PipelineArnResponse, ServiceError>;

    async fn describe_pipeline(&self, pipeline_name: &str)
        -> Result<PipelineDescription, ServiceError>;

    async fn delete_pipeline(&self, pipeline_name: &str) -> Result<PipelineArnResponse, ServiceError>;

    async fn start_pipeline_execution(
        &self,
        request: &StartExecutionRequest,
    ) -> Result<ExecutionArnResponse, ServiceError>;

    async fn stop_pipeline_execution(
        &self,
        execution_arn: &str,
    ) -> Result<ExecutionArnResponse, ServiceError>;

    async fn describe_pipeline_execution(
        &self,
        execution_arn: &str,
    ) -> Result<ExecutionDescription, ServiceError>;

    async fn list_pipeline_execution_steps(
        &self,
        execution_arn: &str,
    ) -> Result<Vec<StepExecution>, ServiceError>;
}
