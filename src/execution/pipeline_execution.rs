//! Handle on a started pipeline execution

use crate::{
    client::{ExecutionArnResponse, ExecutionDescription, StepExecution, WaitConfig, WorkflowClient},
    core::ExecutionStatus,
    execution::error::WorkflowError,
};
use std::sync::Arc;
use tracing::{debug, info};

/// A single execution, identified by the ARN the service returned on start
pub struct PipelineExecution<C> {
    arn: String,
    client: Arc<C>,
}

impl<C> Clone for PipelineExecution<C> {
    fn clone(&self) -> Self {
        Self {
            arn: self.arn.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C> std::fmt::Debug for PipelineExecution<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineExecution").field("arn", &self.arn).finish()
    }
}

impl<C: WorkflowClient> PipelineExecution<C> {
    pub fn new(arn: impl Into<String>, client: Arc<C>) -> Self {
        Self {
            arn: arn.into(),
            client,
        }
    }

    pub fn arn(&self) -> &str {
        &self.arn
    }

    pub async fn stop(&self) -> Result<ExecutionArnResponse, WorkflowError> {
        info!("Stopping execution {}", self.arn);
        Ok(self.client.stop_pipeline_execution(&self.arn).await?)
    }

    pub async fn describe(&self) -> Result<ExecutionDescription, WorkflowError> {
        Ok(self.client.describe_pipeline_execution(&self.arn).await?)
    }

    /// Step records of this execution, in the order the service lists them
    pub async fn list_steps(&self) -> Result<Vec<StepExecution>, WorkflowError> {
        Ok(self.client.list_pipeline_execution_steps(&self.arn).await?)
    }

    /// Poll until the execution succeeds, fails or the attempts run out
    ///
    /// Polls at most `config.max_attempts` times, sleeping `config.delay`
    /// between two polls. `Failed` and `Stopped` end the wait with
    /// [`WorkflowError::ExecutionFailed`]; running out of attempts with
    /// [`WorkflowError::WaitTimeout`]. Service errors are returned as-is.
    pub async fn wait(&self, config: WaitConfig) -> Result<ExecutionDescription, WorkflowError> {
        for attempt in 1..=config.max_attempts {
            let description = self.describe().await?;
            let status = description.pipeline_execution_status;
            debug!(
                "Execution {} is {} (attempt {}/{})",
                self.arn, status, attempt, config.max_attempts
            );

            match status {
                ExecutionStatus::Succeeded => {
                    info!("Execution {} succeeded", self.arn);
                    return Ok(description);
                }
                ExecutionStatus::Failed | ExecutionStatus::Stopped => {
                    return Err(WorkflowError::ExecutionFailed {
                        arn: self.arn.clone(),
                        status,
                        reason: description
                            .failure_reason
                            .unwrap_or_else(|| "no failure reason reported".to_string()),
                    });
                }
                ExecutionStatus::Executing | ExecutionStatus::Stopping => {}
            }

            if attempt < config.max_attempts {
                tokio::time::sleep(config.delay).await;
            }
        }

        Err(WorkflowError::WaitTimeout {
            arn: self.arn.clone(),
            attempts: config.max_attempts,
        })
    }
}
