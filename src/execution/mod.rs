//! Pipeline lifecycle on the workflow service

pub mod error;
pub mod pipeline_execution;
pub mod session;

pub use error::WorkflowError;
pub use pipeline_execution::PipelineExecution;
pub use session::WorkflowSession;
