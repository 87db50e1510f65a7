//! Execution state models reported by the workflow service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Execution is running
    Executing,
    /// A stop was requested and is in progress
    Stopping,
    /// Execution was stopped
    Stopped,
    /// Execution failed
    Failed,
    /// Execution completed successfully
    Succeeded,
}

impl ExecutionStatus {
    /// Check if the execution will not change state any more
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Stopped | ExecutionStatus::Failed | ExecutionStatus::Succeeded
        )
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Status of a single step within an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Starting,
    Executing,
    Stopping,
    Stopped,
    Failed,
    Succeeded,
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepStatus::Stopped | StepStatus::Failed | StepStatus::Succeeded
        )
    }
}
