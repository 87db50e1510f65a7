//! pipeline-workflow - define, serialize and run pipelines on a managed workflow service

pub mod cli;
pub mod client;
pub mod core;
pub mod execution;

// Re-export commonly used types
pub use client::{CreateOptions, ServiceError, WaitConfig, WorkflowClient};
pub use crate::core::{
    interpolate, Condition, ConditionStep, DeferredValue, Expressible, Expression, Parameter,
    ParameterType, Pipeline, PipelineError, PipelineStep, Properties, RegisterModel,
    RequestValue, Step, StepCollection, StepType,
};
pub use execution::{PipelineExecution, WorkflowError, WorkflowSession};
