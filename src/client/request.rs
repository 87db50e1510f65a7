//! Service request types and client-side options

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Arguments of CreatePipeline and UpdatePipeline
///
/// Optional fields are left out of the request when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineRequest {
    pub pipeline_name: String,
    pub pipeline_definition: String,
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// `{"Name", "Value"}` parameter override for an execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterOverride {
    pub name: String,
    pub value: String,
}

/// Arguments of StartPipelineExecution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartExecutionRequest {
    pub pipeline_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_parameters: Option<Vec<ParameterOverride>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_execution_description: Option<String>,
}

/// Convert execution-time overrides to `{"Name", "Value"}` pairs, in order
///
/// Strings are sent as-is, every other value as its JSON text.
pub fn format_start_parameters<'a, I>(parameters: I) -> Vec<ParameterOverride>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    parameters
        .into_iter()
        .map(|(name, value)| ParameterOverride {
            name: name.clone(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

/// Options for creating a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Role assumed by the service to run the steps
    pub role_arn: String,
    pub description: Option<String>,
    pub experiment_name: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl CreateOptions {
    pub fn new(role_arn: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_experiment_name(mut self, experiment_name: impl Into<String>) -> Self {
        self.experiment_name = Some(experiment_name.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Polling settings for waiting on an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Delay between two polls
    pub delay: Duration,

    /// Maximum number of polls
    pub max_attempts: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(30),
            max_attempts: 60,
        }
    }
}

impl WaitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}
