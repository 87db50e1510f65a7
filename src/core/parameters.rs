//! Pipeline parameters

use crate::core::entities::{Expressible, Expression, RequestValue};
use crate::core::error::PipelineError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Data type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    Integer,
    Float,
}

impl ParameterType {
    /// Name used by the service
    pub fn wire_name(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
            ParameterType::Integer => "Integer",
            ParameterType::Float => "Float",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParameterType::String => value.is_string(),
            ParameterType::Integer => value.is_i64() || value.is_u64(),
            // integers are valid floats
            ParameterType::Float => value.is_number(),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A named, typed value supplied when an execution starts
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    parameter_type: ParameterType,
    default_value: Option<Value>,
}

impl Parameter {
    /// Create a parameter with no default value
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Result<Self, PipelineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PipelineError::EmptyParameterName);
        }
        Ok(Self {
            name,
            parameter_type,
            default_value: None,
        })
    }

    pub fn string(name: impl Into<String>) -> Result<Self, PipelineError> {
        Self::new(name, ParameterType::String)
    }

    pub fn integer(name: impl Into<String>) -> Result<Self, PipelineError> {
        Self::new(name, ParameterType::Integer)
    }

    pub fn float(name: impl Into<String>) -> Result<Self, PipelineError> {
        Self::new(name, ParameterType::Float)
    }

    /// Attach a default value; it must match the parameter type
    pub fn with_default(mut self, value: impl Into<Value>) -> Result<Self, PipelineError> {
        let value = value.into();
        if !self.parameter_type.accepts(&value) {
            return Err(PipelineError::InvalidDefault {
                name: self.name,
                expected: self.parameter_type.to_string(),
                actual: value.to_string(),
            });
        }
        self.default_value = Some(value);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Wire fragment: `{"Name", "Type", "DefaultValue"?}`
    pub fn to_request(&self) -> RequestValue {
        let mut fragment = vec![
            ("Name", RequestValue::from(self.name.as_str())),
            ("Type", RequestValue::from(self.parameter_type.wire_name())),
        ];
        if let Some(default) = &self.default_value {
            fragment.push(("DefaultValue", default.clone().into()));
        }
        RequestValue::from_pairs(fragment)
    }
}

impl Expressible for Parameter {
    fn expr(&self) -> Expression {
        Expression::get(format!("Parameters.{}", self.name))
    }
}
