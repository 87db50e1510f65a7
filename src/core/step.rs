//! Step domain model

use crate::core::{
    entities::RequestValue,
    properties::Properties,
    step_collections::StepCollection,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Operation family of a step, as named by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepType {
    Training,
    Processing,
    Transform,
    CreateModel,
    RegisterModel,
    Condition,
}

impl StepType {
    pub fn wire_name(&self) -> &'static str {
        match self {
            StepType::Training => "Training",
            StepType::Processing => "Processing",
            StepType::Transform => "Transform",
            StepType::CreateModel => "CreateModel",
            StepType::RegisterModel => "RegisterModel",
            StepType::Condition => "Condition",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Training" => Ok(StepType::Training),
            "Processing" => Ok(StepType::Processing),
            "Transform" => Ok(StepType::Transform),
            "CreateModel" => Ok(StepType::CreateModel),
            "RegisterModel" => Ok(StepType::RegisterModel),
            "Condition" => Ok(StepType::Condition),
            other => Err(format!("Unknown step type: {}", other)),
        }
    }
}

/// A single unit of work executed by the service
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Step name, unique within a pipeline
    pub name: String,

    /// Operation family
    pub step_type: StepType,

    /// Request arguments; may contain deferred values
    pub arguments: RequestValue,
}

impl Step {
    pub fn new(name: impl Into<String>, step_type: StepType, arguments: RequestValue) -> Self {
        Self {
            name: name.into(),
            step_type,
            arguments,
        }
    }

    /// Root of this step's output properties (`Steps.<name>`)
    pub fn properties(&self) -> Properties {
        Properties::for_step(&self.name)
    }

    /// Request fragment `{"Name", "Type", "Arguments"}`, arguments not interpolated
    pub fn to_request(&self) -> RequestValue {
        RequestValue::from_pairs([
            ("Name", RequestValue::from(self.name.as_str())),
            ("Type", RequestValue::from(self.step_type.wire_name())),
            ("Arguments", self.arguments.clone()),
        ])
    }
}

/// Entry of a pipeline's (or collection's) step list
///
/// Steps are held behind an `Arc` so the same step can be listed in several
/// collections without being copied.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStep {
    Step(Arc<Step>),
    Collection(StepCollection),
}

impl PipelineStep {
    /// Request fragments for this entry, flattened in declared order
    pub fn request_dicts(&self) -> Vec<RequestValue> {
        match self {
            PipelineStep::Step(step) => vec![step.to_request()],
            PipelineStep::Collection(collection) => collection.request_dicts(),
        }
    }

    /// Primitive steps under this entry, flattened in declared order
    pub fn steps(&self) -> Vec<Arc<Step>> {
        match self {
            PipelineStep::Step(step) => vec![Arc::clone(step)],
            PipelineStep::Collection(collection) => collection.steps(),
        }
    }
}

impl From<Step> for PipelineStep {
    fn from(step: Step) -> Self {
        PipelineStep::Step(Arc::new(step))
    }
}

impl From<Arc<Step>> for PipelineStep {
    fn from(step: Arc<Step>) -> Self {
        PipelineStep::Step(step)
    }
}

impl From<StepCollection> for PipelineStep {
    fn from(collection: StepCollection) -> Self {
        PipelineStep::Collection(collection)
    }
}

/// Flatten a list of entries into request fragments
pub fn list_to_request(entries: &[PipelineStep]) -> Vec<RequestValue> {
    entries.iter().flat_map(PipelineStep::request_dicts).collect()
}
