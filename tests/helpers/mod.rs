//! Test utilities: a scripted in-memory workflow service

#![allow(dead_code)]

use async_trait::async_trait;
use pipeline_workflow::client::{
    ExecutionArnResponse, ExecutionDescription, PipelineArnResponse, PipelineDescription,
    PipelineRequest, ServiceError, StartExecutionRequest, StepExecution, WorkflowClient,
};
use pipeline_workflow::core::{
    ExecutionStatus, Parameter, Pipeline, RequestValue, Step, StepStatus, StepType,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const ROLE_ARN: &str = "arn:aws:iam::000000000000:role/DummyRole";

/// One float parameter, one training step reading it
pub fn sample_pipeline(name: &str) -> Pipeline {
    let threshold = Parameter::float("Threshold").unwrap();
    let train = Step::new(
        "Train",
        StepType::Training,
        RequestValue::from_pairs([("Rate", RequestValue::from(&threshold))]),
    );
    Pipeline::new(name)
        .unwrap()
        .with_parameter(threshold)
        .unwrap()
        .with_step(train)
}

/// Mock workflow service that records every call
///
/// Pipelines live in memory. Execution status polls are answered from a
/// script; once the script is exhausted the last status repeats (or
/// `Executing` if no script was given).
#[derive(Default)]
pub struct MockClient {
    pipelines: Mutex<HashMap<String, PipelineRequest>>,
    calls: Mutex<Vec<String>>,
    create_failure: Mutex<Option<ServiceError>>,
    statuses: Mutex<VecDeque<ExecutionStatus>>,
    last_status: Mutex<Option<ExecutionStatus>>,
    started: Mutex<Vec<StartExecutionRequest>>,
    updates: Mutex<Vec<PipelineRequest>>,
    creates: Mutex<Vec<PipelineRequest>>,
    execution_counter: AtomicUsize,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service that already knows a pipeline with this name
    pub fn with_existing_pipeline(self, name: &str) -> Self {
        self.pipelines.lock().unwrap().insert(
            name.to_string(),
            PipelineRequest {
                pipeline_name: name.to_string(),
                pipeline_definition: "{}".to_string(),
                role_arn: ROLE_ARN.to_string(),
                pipeline_description: None,
                experiment_name: None,
                tags: None,
            },
        );
        self
    }

    /// Make every create call fail with this error
    pub fn with_create_failure(self, error: ServiceError) -> Self {
        *self.create_failure.lock().unwrap() = Some(error);
        self
    }

    /// Statuses returned by successive DescribePipelineExecution calls
    pub fn with_statuses(self, statuses: Vec<ExecutionStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Number of calls made to an operation, e.g. "create_pipeline"
    pub fn calls(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    /// All operations called, in order
    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<StartExecutionRequest> {
        self.started.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<PipelineRequest> {
        self.creates.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<PipelineRequest> {
        self.updates.lock().unwrap().clone()
    }

    pub fn stored_definition(&self, name: &str) -> Option<String> {
        self.pipelines
            .lock()
            .unwrap()
            .get(name)
            .map(|p| p.pipeline_definition.clone())
    }

    fn record(&self, operation: &str) {
        self.calls.lock().unwrap().push(operation.to_string());
    }

    fn pipeline_arn(name: &str) -> String {
        format!("arn:aws:sagemaker:us-west-2:000000000000:pipeline/{}", name.to_lowercase())
    }

    fn not_found(name: &str) -> ServiceError {
        ServiceError::new("ResourceNotFound", format!("Pipeline '{}' does not exist.", name))
    }
}

#[async_trait]
impl WorkflowClient for MockClient {
    async fn create_pipeline(
        &self,
        request: &PipelineRequest,
    ) -> Result<PipelineArnResponse, ServiceError> {
        self.record("create_pipeline");
        self.creates.lock().unwrap().push(request.clone());

        if let Some(error) = self.create_failure.lock().unwrap().clone() {
            return Err(error);
        }

        let mut pipelines = self.pipelines.lock().unwrap();
        if pipelines.contains_key(&request.pipeline_name) {
            return Err(ServiceError::new(
                "ValidationException",
                "Pipeline names must be unique within an AWS account and region",
            ));
        }
        pipelines.insert(request.pipeline_name.clone(), request.clone());
        Ok(PipelineArnResponse {
            pipeline_arn: Self::pipeline_arn(&request.pipeline_name),
        })
    }

    async fn update_pipeline(
        &self,
        request: &PipelineRequest,
    ) -> Result<PipelineArnResponse, ServiceError> {
        self.record("update_pipeline");
        self.updates.lock().unwrap().push(request.clone());

        let mut pipelines = self.pipelines.lock().unwrap();
        if !pipelines.contains_key(&request.pipeline_name) {
            return Err(Self::not_found(&request.pipeline_name));
        }
        pipelines.insert(request.pipeline_name.clone(), request.clone());
        Ok(PipelineArnResponse {
            pipeline_arn: Self::pipeline_arn(&request.pipeline_name),
        })
    }

    async fn describe_pipeline(
        &self,
        pipeline_name: &str,
    ) -> Result<PipelineDescription, ServiceError> {
        self.record("describe_pipeline");

        let pipelines = self.pipelines.lock().unwrap();
        let stored = pipelines
            .get(pipeline_name)
            .ok_or_else(|| Self::not_found(pipeline_name))?;
        Ok(PipelineDescription {
            pipeline_arn: Self::pipeline_arn(pipeline_name),
            pipeline_name: pipeline_name.to_string(),
            pipeline_definition: Some(stored.pipeline_definition.clone()),
            pipeline_description: stored.pipeline_description.clone(),
            role_arn: Some(stored.role_arn.clone()),
            pipeline_status: Some("Active".to_string()),
            creation_time: None,
            last_modified_time: None,
        })
    }

    async fn delete_pipeline(&self, pipeline_name: &str) -> Result<PipelineArnResponse, ServiceError> {
        self.record("delete_pipeline");

        match self.pipelines.lock().unwrap().remove(pipeline_name) {
            Some(_) => Ok(PipelineArnResponse {
                pipeline_arn: Self::pipeline_arn(pipeline_name),
            }),
            None => Err(Self::not_found(pipeline_name)),
        }
    }

    async fn start_pipeline_execution(
        &self,
        request: &StartExecutionRequest,
    ) -> Result<ExecutionArnResponse, ServiceError> {
        self.record("start_pipeline_execution");
        self.started.lock().unwrap().push(request.clone());

        let id = self.execution_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ExecutionArnResponse {
            pipeline_execution_arn: format!(
                "{}/execution/{}",
                Self::pipeline_arn(&request.pipeline_name),
                id
            ),
        })
    }

    async fn stop_pipeline_execution(
        &self,
        execution_arn: &str,
    ) -> Result<ExecutionArnResponse, ServiceError> {
        self.record("stop_pipeline_execution");
        Ok(ExecutionArnResponse {
            pipeline_execution_arn: execution_arn.to_string(),
        })
    }

    async fn describe_pipeline_execution(
        &self,
        execution_arn: &str,
    ) -> Result<ExecutionDescription, ServiceError> {
        self.record("describe_pipeline_execution");

        let mut last = self.last_status.lock().unwrap();
        let status = match self.statuses.lock().unwrap().pop_front() {
            Some(status) => {
                *last = Some(status);
                status
            }
            None => last.unwrap_or(ExecutionStatus::Executing),
        };

        Ok(ExecutionDescription {
            pipeline_execution_arn: execution_arn.to_string(),
            pipeline_execution_status: status,
            pipeline_arn: None,
            pipeline_execution_description: None,
            failure_reason: (status == ExecutionStatus::Failed)
                .then(|| "Step Train failed".to_string()),
            creation_time: None,
            last_modified_time: None,
        })
    }

    async fn list_pipeline_execution_steps(
        &self,
        _execution_arn: &str,
    ) -> Result<Vec<StepExecution>, ServiceError> {
        self.record("list_pipeline_execution_steps");
        Ok(vec![
            StepExecution {
                step_name: "Train".to_string(),
                step_status: StepStatus::Succeeded,
                start_time: None,
                end_time: None,
                failure_reason: None,
            },
            StepExecution {
                step_name: "Register".to_string(),
                step_status: StepStatus::Executing,
                start_time: None,
                end_time: None,
                failure_reason: None,
            },
        ])
    }
}
