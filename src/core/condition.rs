//! Condition steps and the conditions they evaluate

use crate::core::{
    entities::RequestValue,
    properties::Properties,
    step::{list_to_request, PipelineStep, Step, StepType},
};

/// Boolean test evaluated by the service when a condition step runs
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals(RequestValue, RequestValue),
    GreaterThan(RequestValue, RequestValue),
    GreaterThanOrEqualTo(RequestValue, RequestValue),
    LessThan(RequestValue, RequestValue),
    LessThanOrEqualTo(RequestValue, RequestValue),
    /// `query` is one of `values`
    In {
        query: RequestValue,
        values: Vec<RequestValue>,
    },
    Not(Box<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn equals(left: impl Into<RequestValue>, right: impl Into<RequestValue>) -> Self {
        Condition::Equals(left.into(), right.into())
    }

    pub fn greater_than(left: impl Into<RequestValue>, right: impl Into<RequestValue>) -> Self {
        Condition::GreaterThan(left.into(), right.into())
    }

    pub fn greater_than_or_equal_to(
        left: impl Into<RequestValue>,
        right: impl Into<RequestValue>,
    ) -> Self {
        Condition::GreaterThanOrEqualTo(left.into(), right.into())
    }

    pub fn less_than(left: impl Into<RequestValue>, right: impl Into<RequestValue>) -> Self {
        Condition::LessThan(left.into(), right.into())
    }

    pub fn less_than_or_equal_to(
        left: impl Into<RequestValue>,
        right: impl Into<RequestValue>,
    ) -> Self {
        Condition::LessThanOrEqualTo(left.into(), right.into())
    }

    pub fn is_in(query: impl Into<RequestValue>, values: Vec<RequestValue>) -> Self {
        Condition::In {
            query: query.into(),
            values,
        }
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(conditions)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Condition::Equals(..) => "Equals",
            Condition::GreaterThan(..) => "GreaterThan",
            Condition::GreaterThanOrEqualTo(..) => "GreaterThanOrEqualTo",
            Condition::LessThan(..) => "LessThan",
            Condition::LessThanOrEqualTo(..) => "LessThanOrEqualTo",
            Condition::In { .. } => "In",
            Condition::Not(_) => "Not",
            Condition::Or(_) => "Or",
        }
    }

    pub fn to_request(&self) -> RequestValue {
        let type_entry = ("Type", RequestValue::from(self.type_name()));
        match self {
            Condition::Equals(left, right)
            | Condition::GreaterThan(left, right)
            | Condition::GreaterThanOrEqualTo(left, right)
            | Condition::LessThan(left, right)
            | Condition::LessThanOrEqualTo(left, right) => RequestValue::from_pairs([
                type_entry,
                ("LeftValue", left.clone()),
                ("RightValue", right.clone()),
            ]),
            Condition::In { query, values } => RequestValue::from_pairs([
                type_entry,
                ("QueryValue", query.clone()),
                ("Values", RequestValue::list(values.clone())),
            ]),
            Condition::Not(inner) => {
                RequestValue::from_pairs([type_entry, ("Expression", inner.to_request())])
            }
            Condition::Or(conditions) => RequestValue::from_pairs([
                type_entry,
                (
                    "Conditions",
                    RequestValue::list(conditions.iter().map(Condition::to_request).collect()),
                ),
            ]),
        }
    }
}

/// Branch the pipeline on a set of conditions (all must hold)
///
/// Steps listed in `if_steps` / `else_steps` must not also be listed at the
/// top level of the pipeline. The service rejects such definitions; nothing
/// checks for it here.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionStep {
    pub name: String,
    pub conditions: Vec<Condition>,
    pub if_steps: Vec<PipelineStep>,
    pub else_steps: Vec<PipelineStep>,
}

impl ConditionStep {
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            conditions,
            if_steps: Vec::new(),
            else_steps: Vec::new(),
        }
    }

    pub fn with_if_steps(mut self, steps: Vec<PipelineStep>) -> Self {
        self.if_steps = steps;
        self
    }

    pub fn with_else_steps(mut self, steps: Vec<PipelineStep>) -> Self {
        self.else_steps = steps;
        self
    }

    /// `Steps.<name>.Outcome`, the boolean result of the evaluation
    pub fn outcome(&self) -> Properties {
        Properties::for_step(&self.name).get("Outcome")
    }

    /// Lower to a primitive `Condition` step
    pub fn build(&self) -> Step {
        let arguments = RequestValue::from_pairs([
            (
                "Conditions",
                RequestValue::list(self.conditions.iter().map(Condition::to_request).collect()),
            ),
            ("IfSteps", RequestValue::list(list_to_request(&self.if_steps))),
            ("ElseSteps", RequestValue::list(list_to_request(&self.else_steps))),
        ]);
        Step::new(self.name.clone(), StepType::Condition, arguments)
    }
}

impl From<ConditionStep> for PipelineStep {
    fn from(condition: ConditionStep) -> Self {
        condition.build().into()
    }
}
