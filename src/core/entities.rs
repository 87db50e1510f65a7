//! Request document model and deferred values
//!
//! A pipeline request is built as a [`RequestValue`] tree. Most nodes are plain
//! JSON data, but a node may also hold a [`DeferredValue`]: something whose
//! concrete value is only known once the workflow service runs the pipeline.
//! Deferred values are written to the wire as symbolic [`Expression`]s.

use crate::core::{parameters::Parameter, properties::Properties};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Key used by the service for property lookups
pub const GET_KEY: &str = "Get";

/// Ordered mapping used for request objects
pub type RequestMap = IndexMap<String, RequestValue>;

/// Anything that can be reduced to a workflow expression
pub trait Expressible {
    /// The symbolic wire form of this value
    fn expr(&self) -> Expression;
}

/// Terminal symbolic form of a deferred value, e.g. `{"Get": "Parameters.Rate"}`
#[derive(Debug, Clone, PartialEq)]
pub struct Expression(Value);

impl Expression {
    /// `{"Get": <path>}` reference
    pub fn get(path: impl Into<String>) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(GET_KEY.to_string(), Value::String(path.into()));
        Expression(Value::Object(map))
    }

    /// Wrap an arbitrary JSON document that the service understands as an expression
    pub fn from_json(value: Value) -> Self {
        Expression(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

impl Expressible for Expression {
    fn expr(&self) -> Expression {
        self.clone()
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Built-in execution variables resolved by the service at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionVariable {
    StartDateTime,
    CurrentDateTime,
    PipelineName,
    PipelineArn,
    PipelineExecutionId,
    PipelineExecutionArn,
}

impl ExecutionVariable {
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionVariable::StartDateTime => "StartDateTime",
            ExecutionVariable::CurrentDateTime => "CurrentDateTime",
            ExecutionVariable::PipelineName => "PipelineName",
            ExecutionVariable::PipelineArn => "PipelineArn",
            ExecutionVariable::PipelineExecutionId => "PipelineExecutionId",
            ExecutionVariable::PipelineExecutionArn => "PipelineExecutionArn",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let variable = match name {
            "StartDateTime" => ExecutionVariable::StartDateTime,
            "CurrentDateTime" => ExecutionVariable::CurrentDateTime,
            "PipelineName" => ExecutionVariable::PipelineName,
            "PipelineArn" => ExecutionVariable::PipelineArn,
            "PipelineExecutionId" => ExecutionVariable::PipelineExecutionId,
            "PipelineExecutionArn" => ExecutionVariable::PipelineExecutionArn,
            _ => return None,
        };
        Some(variable)
    }
}

impl Expressible for ExecutionVariable {
    fn expr(&self) -> Expression {
        Expression::get(format!("Execution.{}", self.name()))
    }
}

/// A value that is not known until the service resolves it
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredValue {
    Parameter(Parameter),
    Property(Properties),
    Expression(Expression),
}

impl Expressible for DeferredValue {
    fn expr(&self) -> Expression {
        match self {
            DeferredValue::Parameter(parameter) => parameter.expr(),
            DeferredValue::Property(properties) => properties.expr(),
            DeferredValue::Expression(expression) => expression.expr(),
        }
    }
}

/// Flavour of a sequence node; all of them serialize as JSON arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Ordered, growable list
    List,
    /// Ordered, fixed-size tuple
    Tuple,
    /// Unordered collection without duplicates
    Set,
}

/// A node of a request document
#[derive(Debug, Clone, PartialEq)]
pub enum RequestValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(SequenceKind, Vec<RequestValue>),
    Object(RequestMap),
    Deferred(DeferredValue),
}

impl RequestValue {
    pub fn list(items: Vec<RequestValue>) -> Self {
        RequestValue::Sequence(SequenceKind::List, items)
    }

    pub fn tuple(items: Vec<RequestValue>) -> Self {
        RequestValue::Sequence(SequenceKind::Tuple, items)
    }

    /// Build a set, dropping structurally equal duplicates (first occurrence wins)
    pub fn set(items: Vec<RequestValue>) -> Self {
        let mut unique: Vec<RequestValue> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        RequestValue::Sequence(SequenceKind::Set, unique)
    }

    pub fn object() -> Self {
        RequestValue::Object(RequestMap::new())
    }

    /// Build an object from key/value pairs, keeping their order
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RequestValue)>,
    {
        RequestValue::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_object(&self) -> Option<&RequestMap> {
        match self {
            RequestValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut RequestMap> {
        match self {
            RequestValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RequestValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key when this node is an object
    pub fn get(&self, key: &str) -> Option<&RequestValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, RequestValue::Deferred(_))
    }

    /// True when no deferred value appears anywhere below this node
    pub fn is_resolved(&self) -> bool {
        match self {
            RequestValue::Deferred(_) => false,
            RequestValue::Sequence(_, items) => items.iter().all(RequestValue::is_resolved),
            RequestValue::Object(map) => map.values().all(RequestValue::is_resolved),
            _ => true,
        }
    }
}

impl Serialize for RequestValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequestValue::Null => serializer.serialize_unit(),
            RequestValue::Bool(b) => serializer.serialize_bool(*b),
            RequestValue::Number(n) => n.serialize(serializer),
            RequestValue::String(s) => serializer.serialize_str(s),
            RequestValue::Sequence(_, items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RequestValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            RequestValue::Deferred(deferred) => deferred.expr().serialize(serializer),
        }
    }
}

impl From<Value> for RequestValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RequestValue::Null,
            Value::Bool(b) => RequestValue::Bool(b),
            Value::Number(n) => RequestValue::Number(n),
            Value::String(s) => RequestValue::String(s),
            Value::Array(items) => RequestValue::list(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                RequestValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<Expression> for RequestValue {
    fn from(expression: Expression) -> Self {
        RequestValue::Deferred(DeferredValue::Expression(expression))
    }
}

impl From<Parameter> for RequestValue {
    fn from(parameter: Parameter) -> Self {
        RequestValue::Deferred(DeferredValue::Parameter(parameter))
    }
}

impl From<&Parameter> for RequestValue {
    fn from(parameter: &Parameter) -> Self {
        RequestValue::Deferred(DeferredValue::Parameter(parameter.clone()))
    }
}

impl From<Properties> for RequestValue {
    fn from(properties: Properties) -> Self {
        RequestValue::Deferred(DeferredValue::Property(properties))
    }
}

impl From<ExecutionVariable> for RequestValue {
    fn from(variable: ExecutionVariable) -> Self {
        variable.expr().into()
    }
}

impl From<&str> for RequestValue {
    fn from(s: &str) -> Self {
        RequestValue::String(s.to_string())
    }
}

impl From<String> for RequestValue {
    fn from(s: String) -> Self {
        RequestValue::String(s)
    }
}

impl From<bool> for RequestValue {
    fn from(b: bool) -> Self {
        RequestValue::Bool(b)
    }
}

impl From<i64> for RequestValue {
    fn from(n: i64) -> Self {
        RequestValue::Number(n.into())
    }
}

impl From<f64> for RequestValue {
    /// Non-finite floats have no JSON form and become `null`
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(RequestValue::Null, RequestValue::Number)
    }
}

impl<T: Into<RequestValue>> From<Vec<T>> for RequestValue {
    fn from(items: Vec<T>) -> Self {
        RequestValue::list(items.into_iter().map(Into::into).collect())
    }
}
