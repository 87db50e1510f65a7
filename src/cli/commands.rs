//! CLI command definitions

use clap::Args;

/// Print the definition sent to the workflow service
#[derive(Debug, Args, Clone)]
pub struct DefinitionCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Pretty-print instead of the exact wire string
    #[arg(long)]
    pub pretty: bool,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Also print the resolved request document as JSON
    #[arg(long)]
    pub json: bool,
}
