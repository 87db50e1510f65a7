//! Step collections: named groups of steps that act as one logical unit

use crate::core::{
    entities::RequestValue,
    step::{PipelineStep, Step, StepType},
};
use std::sync::Arc;

/// An ordered group of steps and nested collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepCollection {
    pub name: Option<String>,
    pub steps: Vec<PipelineStep>,
}

impl StepCollection {
    pub fn new(steps: Vec<PipelineStep>) -> Self {
        Self { name: None, steps }
    }

    pub fn named(name: impl Into<String>, steps: Vec<PipelineStep>) -> Self {
        Self {
            name: Some(name.into()),
            steps,
        }
    }

    /// Request fragments of every contained step, nested collections flattened
    pub fn request_dicts(&self) -> Vec<RequestValue> {
        self.steps.iter().flat_map(PipelineStep::request_dicts).collect()
    }

    /// Every primitive step, nested collections flattened
    pub fn steps(&self) -> Vec<Arc<Step>> {
        self.steps.iter().flat_map(PipelineStep::steps).collect()
    }
}

/// Register a trained model as a model package
#[derive(Debug, Clone)]
pub struct RegisterModel {
    pub name: String,
    pub image_uri: String,
    /// Model artifact location; usually a training step property
    pub model_data: RequestValue,
    pub content_types: Vec<String>,
    pub response_types: Vec<String>,
    pub inference_instances: Vec<String>,
    pub transform_instances: Vec<String>,
    pub model_package_group_name: Option<RequestValue>,
    pub approval_status: Option<RequestValue>,
}

impl RegisterModel {
    pub fn new(
        name: impl Into<String>,
        image_uri: impl Into<String>,
        model_data: impl Into<RequestValue>,
    ) -> Self {
        Self {
            name: name.into(),
            image_uri: image_uri.into(),
            model_data: model_data.into(),
            content_types: Vec::new(),
            response_types: Vec::new(),
            inference_instances: Vec::new(),
            transform_instances: Vec::new(),
            model_package_group_name: None,
            approval_status: None,
        }
    }

    pub fn with_content_types(mut self, types: Vec<String>) -> Self {
        self.content_types = types;
        self
    }

    pub fn with_response_types(mut self, types: Vec<String>) -> Self {
        self.response_types = types;
        self
    }

    pub fn with_inference_instances(mut self, instances: Vec<String>) -> Self {
        self.inference_instances = instances;
        self
    }

    pub fn with_transform_instances(mut self, instances: Vec<String>) -> Self {
        self.transform_instances = instances;
        self
    }

    pub fn with_model_package_group(mut self, group: impl Into<RequestValue>) -> Self {
        self.model_package_group_name = Some(group.into());
        self
    }

    pub fn with_approval_status(mut self, status: impl Into<RequestValue>) -> Self {
        self.approval_status = Some(status.into());
        self
    }

    fn arguments(&self) -> RequestValue {
        let container = RequestValue::from_pairs([
            ("Image", RequestValue::from(self.image_uri.as_str())),
            ("ModelDataUrl", self.model_data.clone()),
        ]);
        let inference_specification = RequestValue::from_pairs([
            ("Containers", RequestValue::list(vec![container])),
            ("SupportedContentTypes", self.content_types.clone().into()),
            ("SupportedRealtimeInferenceInstanceTypes", self.inference_instances.clone().into()),
            ("SupportedResponseMIMETypes", self.response_types.clone().into()),
            ("SupportedTransformInstanceTypes", self.transform_instances.clone().into()),
        ]);

        let mut arguments = vec![("InferenceSpecification", inference_specification)];
        if let Some(group) = &self.model_package_group_name {
            arguments.push(("ModelPackageGroupName", group.clone()));
        }
        if let Some(status) = &self.approval_status {
            arguments.push(("ModelApprovalStatus", status.clone()));
        }
        RequestValue::from_pairs(arguments)
    }

    /// Build the collection of primitive steps for this registration
    pub fn build(&self) -> StepCollection {
        let step = Step::new(self.name.clone(), StepType::RegisterModel, self.arguments());
        StepCollection::named(self.name.clone(), vec![step.into()])
    }
}

impl From<RegisterModel> for PipelineStep {
    fn from(register: RegisterModel) -> Self {
        PipelineStep::Collection(register.build())
    }
}
