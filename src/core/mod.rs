//! Core domain models for Pipeline
//!
//! This module defines the data structures that describe a pipeline
//! (parameters, steps, step collections, conditions) and turns them into
//! the request document the workflow service expects.

pub mod condition;
pub mod config;
pub mod entities;
pub mod error;
pub mod interpolate;
pub mod parameters;
pub mod pipeline;
pub mod properties;
pub mod state;
pub mod step;
pub mod step_collections;

pub use condition::{Condition, ConditionStep};
pub use entities::*;
pub use error::PipelineError;
pub use interpolate::interpolate;
pub use parameters::{Parameter, ParameterType};
pub use pipeline::*;
pub use properties::Properties;
pub use state::*;
pub use step::*;
pub use step_collections::{RegisterModel, StepCollection};
