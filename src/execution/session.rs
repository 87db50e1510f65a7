//! Pipeline lifecycle operations against the workflow service

use crate::{
    client::{
        format_start_parameters, CreateOptions, PipelineArnResponse, PipelineDescription,
        PipelineRequest, StartExecutionRequest, WorkflowClient,
    },
    core::Pipeline,
    execution::{error::WorkflowError, pipeline_execution::PipelineExecution},
};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Creates, updates and starts pipelines through a [`WorkflowClient`]
///
/// Every operation issues exactly one service call, except `upsert` (create,
/// then update on a name collision) and `start` (describe, then start).
pub struct WorkflowSession<C> {
    client: Arc<C>,
}

impl<C> Clone for WorkflowSession<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: WorkflowClient> WorkflowSession<C> {
    pub fn new(client: C) -> Self {
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn pipeline_request(
        pipeline: &Pipeline,
        role_arn: &str,
        description: Option<&str>,
    ) -> Result<PipelineRequest, WorkflowError> {
        Ok(PipelineRequest {
            pipeline_name: pipeline.name.clone(),
            pipeline_definition: pipeline.definition()?,
            role_arn: role_arn.to_string(),
            pipeline_description: description.map(str::to_string),
            experiment_name: None,
            tags: None,
        })
    }

    /// Create the pipeline on the service
    pub async fn create(
        &self,
        pipeline: &Pipeline,
        options: &CreateOptions,
    ) -> Result<PipelineArnResponse, WorkflowError> {
        let mut request =
            Self::pipeline_request(pipeline, &options.role_arn, options.description.as_deref())?;
        request.experiment_name = options.experiment_name.clone();
        request.tags = options.tags.clone();

        debug!("Creating pipeline {}", pipeline.name);
        let response = self.client.create_pipeline(&request).await?;
        info!("Created pipeline {} ({})", pipeline.name, response.pipeline_arn);
        Ok(response)
    }

    /// Replace the definition of an existing pipeline
    pub async fn update(
        &self,
        pipeline: &Pipeline,
        role_arn: &str,
        description: Option<&str>,
    ) -> Result<PipelineArnResponse, WorkflowError> {
        let request = Self::pipeline_request(pipeline, role_arn, description)?;

        debug!("Updating pipeline {}", pipeline.name);
        let response = self.client.update_pipeline(&request).await?;
        info!("Updated pipeline {} ({})", pipeline.name, response.pipeline_arn);
        Ok(response)
    }

    /// Create the pipeline, or update it if the name is already taken
    ///
    /// Any other failure of the create call is returned unchanged.
    pub async fn upsert(
        &self,
        pipeline: &Pipeline,
        options: &CreateOptions,
    ) -> Result<PipelineArnResponse, WorkflowError> {
        match self.create(pipeline, options).await {
            Err(WorkflowError::Service(e)) if e.is_name_collision() => {
                info!("Pipeline {} already exists, updating", pipeline.name);
                self.update(pipeline, &options.role_arn, options.description.as_deref())
                    .await
            }
            other => other,
        }
    }

    pub async fn describe(&self, pipeline: &Pipeline) -> Result<PipelineDescription, WorkflowError> {
        Ok(self.client.describe_pipeline(&pipeline.name).await?)
    }

    pub async fn delete(&self, pipeline: &Pipeline) -> Result<PipelineArnResponse, WorkflowError> {
        let response = self.client.delete_pipeline(&pipeline.name).await?;
        info!("Deleted pipeline {}", pipeline.name);
        Ok(response)
    }

    /// Start an execution of a pipeline that already exists on the service
    ///
    /// `parameters` override parameter values for this execution only; they
    /// are sent in iteration order, each value converted to a string.
    pub async fn start(
        &self,
        pipeline: &Pipeline,
        parameters: Option<&IndexMap<String, Value>>,
        description: Option<&str>,
    ) -> Result<PipelineExecution<C>, WorkflowError> {
        if let Err(e) = self.client.describe_pipeline(&pipeline.name).await {
            warn!("Cannot start pipeline {}: {}", pipeline.name, e);
            return Err(WorkflowError::PipelineNotFound {
                name: pipeline.name.clone(),
            });
        }

        let request = StartExecutionRequest {
            pipeline_name: pipeline.name.clone(),
            pipeline_parameters: parameters.map(format_start_parameters),
            pipeline_execution_description: description.map(str::to_string),
        };

        let response = self.client.start_pipeline_execution(&request).await?;
        info!(
            "Started execution {} of pipeline {}",
            response.pipeline_execution_arn, pipeline.name
        );
        Ok(PipelineExecution::new(
            response.pipeline_execution_arn,
            Arc::clone(&self.client),
        ))
    }
}
