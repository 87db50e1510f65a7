//! Pipeline domain model

use crate::core::{
    entities::{RequestMap, RequestValue},
    error::PipelineError,
    interpolate::interpolate,
    parameters::Parameter,
    step::{list_to_request, PipelineStep, Step},
};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Arc;

/// Schema version of the pipeline definition format
pub const PIPELINE_SCHEMA_VERSION: &str = "2020-12-01";

/// A named, parameterized list of steps submitted to the workflow service
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    /// Pipeline name, unique on the service
    pub name: String,

    /// Execution parameters, names unique
    parameters: Vec<Parameter>,

    /// Top-level steps and step collections
    pub steps: Vec<PipelineStep>,

    /// Free-form metadata record, empty unless set
    pub metadata: RequestMap,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(name: impl Into<String>) -> Result<Self, PipelineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PipelineError::EmptyPipelineName);
        }
        Ok(Self {
            name,
            parameters: Vec::new(),
            steps: Vec::new(),
            metadata: RequestMap::new(),
        })
    }

    /// Add a parameter; its name must not already be declared
    pub fn with_parameter(mut self, parameter: Parameter) -> Result<Self, PipelineError> {
        self.add_parameter(parameter)?;
        Ok(self)
    }

    pub fn add_parameter(&mut self, parameter: Parameter) -> Result<(), PipelineError> {
        if self.parameter(parameter.name()).is_some() {
            return Err(PipelineError::DuplicateParameter(parameter.name().to_string()));
        }
        self.parameters.push(parameter);
        Ok(())
    }

    /// Replace all parameters, rejecting duplicate names
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Result<Self, PipelineError> {
        let mut seen = HashSet::new();
        for parameter in &parameters {
            if !seen.insert(parameter.name()) {
                return Err(PipelineError::DuplicateParameter(parameter.name().to_string()));
            }
        }
        self.parameters = parameters;
        Ok(self)
    }

    pub fn with_step(mut self, step: impl Into<PipelineStep>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn with_steps(mut self, steps: Vec<PipelineStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_metadata(mut self, metadata: RequestMap) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Get a parameter by name
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// All top-level primitive steps, collections flattened
    pub fn flattened_steps(&self) -> Vec<Arc<Step>> {
        self.steps.iter().flat_map(PipelineStep::steps).collect()
    }

    /// Raw request document; step arguments are not interpolated
    pub fn to_request(&self) -> RequestValue {
        RequestValue::from_pairs([
            ("Version", RequestValue::from(PIPELINE_SCHEMA_VERSION)),
            ("Metadata", RequestValue::Object(self.metadata.clone())),
            (
                "Parameters",
                RequestValue::list(self.parameters.iter().map(Parameter::to_request).collect()),
            ),
            ("Steps", RequestValue::list(list_to_request(&self.steps))),
        ])
    }

    /// Request document with every deferred value in `Steps` resolved
    pub fn resolved_request(&self) -> RequestValue {
        let mut request = self.to_request();
        if let Some(map) = request.as_object_mut() {
            if let Some(steps) = map.get_mut("Steps") {
                *steps = interpolate(steps);
            }
        }
        request
    }

    /// Serialized definition sent to the service
    ///
    /// Keys keep insertion order. The same string identifies the current
    /// definition, so two pipelines with equal definitions are interchangeable
    /// on the service.
    pub fn definition(&self) -> Result<String, PipelineError> {
        to_wire_string(&self.resolved_request())
    }
}

/// JSON layout used for definitions: `", "` between items, `": "` after keys
struct WireFormatter;

impl Formatter for WireFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    /// Everything outside printable ASCII goes out as `\uXXXX` (UTF-16 units)
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            if c <= '~' {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }
}

/// Shortest round-trip float text: positional for exponents in `-4..16`,
/// otherwise scientific with a signed, two-digit exponent (`1e-05`, `1.5e+16`)
fn float_repr(value: f64) -> String {
    // `{:e}` gives the shortest digits, e.g. "-1.2345e-7"
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    if !(-4..16).contains(&exponent) {
        let fraction = &digits[1..];
        let sign_char = if exponent < 0 { '-' } else { '+' };
        return if fraction.is_empty() {
            format!("{}{}e{}{:02}", sign, &digits[..1], sign_char, exponent.abs())
        } else {
            format!("{}{}.{}e{}{:02}", sign, &digits[..1], fraction, sign_char, exponent.abs())
        };
    }

    let positional = if exponent < 0 {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    } else {
        let integer_len = exponent as usize + 1;
        if digits.len() <= integer_len {
            format!("{}{}.0", digits, "0".repeat(integer_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..integer_len], &digits[integer_len..])
        }
    };
    format!("{}{}", sign, positional)
}

/// Serialize a value in the definition layout
pub fn to_wire_string<T: Serialize + ?Sized>(value: &T) -> Result<String, PipelineError> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, WireFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}
