//! Pipeline configuration from YAML

use crate::core::{
    entities::{ExecutionVariable, RequestValue},
    parameters::{Parameter, ParameterType},
    pipeline::Pipeline,
    properties::Properties,
    step::{PipelineStep, Step, StepType},
};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// A string made of a single `{{ Root.path }}` reference
const PLACEHOLDER_PATTERN: &str = r"^\{\{\s*(Parameters|Steps|Execution)\.([^\s{}]+)\s*\}\}$";

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Pipeline description (optional, sent on create/update)
    #[serde(default)]
    pub description: Option<String>,

    /// Metadata record copied verbatim into the definition
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,

    /// Execution parameters
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,

    /// Pipeline steps
    pub steps: Vec<StepConfig>,
}

/// Parameter configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub parameter_type: ParameterType,

    #[serde(default)]
    pub default: Option<Value>,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Unique step name
    pub name: String,

    /// Step type, e.g. "Training"
    #[serde(rename = "type")]
    pub step_type: String,

    /// Step arguments; `{{ ... }}` strings become references
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(serde_json::Map::new())
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    ///
    /// Steps referenced from a condition branch and also listed at the top
    /// level are accepted; the service is the one that rejects them.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Pipeline name must not be empty");
        }

        let mut seen_parameters = HashSet::new();
        for parameter in &self.parameters {
            if !seen_parameters.insert(&parameter.name) {
                anyhow::bail!("Duplicate parameter name: {}", parameter.name);
            }
        }

        let mut seen_steps = HashSet::new();
        for step in &self.steps {
            if !seen_steps.insert(&step.name) {
                anyhow::bail!("Duplicate step name: {}", step.name);
            }
            if let Err(e) = step.step_type.parse::<StepType>() {
                anyhow::bail!("Step '{}': {}", step.name, e);
            }
        }

        // Parameter defaults and references are checked while building
        self.to_pipeline()?;

        Ok(())
    }

    /// Convert config to a Pipeline domain model
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        let mut parameters = Vec::with_capacity(self.parameters.len());
        for config in &self.parameters {
            let mut parameter = Parameter::new(config.name.clone(), config.parameter_type)?;
            if let Some(default) = &config.default {
                parameter = parameter.with_default(default.clone())?;
            }
            parameters.push(parameter);
        }

        let resolver = ReferenceResolver::new(&parameters)?;
        let mut steps: Vec<PipelineStep> = Vec::with_capacity(self.steps.len());
        for config in &self.steps {
            let step_type = config
                .step_type
                .parse::<StepType>()
                .map_err(anyhow::Error::msg)?;
            let arguments = resolver
                .resolve(&config.arguments)
                .with_context(|| format!("Invalid arguments for step '{}'", config.name))?;
            debug!("Loaded step {} ({})", config.name, step_type);
            steps.push(Step::new(config.name.clone(), step_type, arguments).into());
        }

        let metadata = self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), RequestValue::from(v.clone())))
            .collect();

        Ok(Pipeline::new(self.name.clone())?
            .with_parameters(parameters)?
            .with_steps(steps)
            .with_metadata(metadata))
    }
}

/// Turns `{{ ... }}` placeholders into deferred values
struct ReferenceResolver<'a> {
    parameters: &'a [Parameter],
    placeholder: Regex,
}

impl<'a> ReferenceResolver<'a> {
    fn new(parameters: &'a [Parameter]) -> Result<Self> {
        Ok(Self {
            parameters,
            placeholder: Regex::new(PLACEHOLDER_PATTERN)?,
        })
    }

    fn resolve(&self, value: &Value) -> Result<RequestValue> {
        let resolved = match value {
            Value::String(s) => self.resolve_string(s)?,
            Value::Array(items) => RequestValue::list(
                items
                    .iter()
                    .map(|item| self.resolve(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key.clone(), self.resolve(value)?);
                }
                RequestValue::Object(object)
            }
            other => RequestValue::from(other.clone()),
        };
        Ok(resolved)
    }

    fn resolve_string(&self, s: &str) -> Result<RequestValue> {
        let Some(captures) = self.placeholder.captures(s) else {
            return Ok(RequestValue::from(s));
        };
        let path = &captures[2];

        match &captures[1] {
            "Parameters" => match self.parameters.iter().find(|p| p.name() == path) {
                Some(parameter) => Ok(parameter.into()),
                None => anyhow::bail!("Reference to undeclared parameter '{}'", path),
            },
            "Steps" => Ok(Properties::new(format!("Steps.{}", path)).into()),
            _ => match ExecutionVariable::from_name(path) {
                Some(variable) => Ok(variable.into()),
                None => anyhow::bail!("Unknown execution variable '{}'", path),
            },
        }
    }
}
