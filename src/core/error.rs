//! Errors raised while building or serializing a pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Parameter name must not be empty")]
    EmptyParameterName,

    #[error("Parameter '{name}' expects a {expected} default value, got {actual}")]
    InvalidDefault {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error("Pipeline name must not be empty")]
    EmptyPipelineName,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Definition is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
