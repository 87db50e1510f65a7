//! Property references into a step's future output

use crate::core::entities::{Expressible, Expression};

/// Symbolic path to a value a step will produce, e.g.
/// `Steps.Train.ModelArtifacts.S3ModelArtifacts`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    path: String,
}

impl Properties {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Root of the property tree for a step
    pub fn for_step(step_name: &str) -> Self {
        Self::new(format!("Steps.{}", step_name))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Nested attribute: `<path>.<field>`
    pub fn get(&self, field: &str) -> Properties {
        Properties::new(format!("{}.{}", self.path, field))
    }

    /// List element: `<path>[<index>]`
    pub fn index(&self, index: usize) -> Properties {
        Properties::new(format!("{}[{}]", self.path, index))
    }

    /// Map entry: `<path>['<key>']`
    pub fn key(&self, key: &str) -> Properties {
        Properties::new(format!("{}['{}']", self.path, key))
    }
}

impl Expressible for Properties {
    fn expr(&self) -> Expression {
        Expression::get(self.path.clone())
    }
}
