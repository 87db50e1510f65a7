//! CLI output formatting

use crate::core::{Parameter, Step};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// One-line summary of a parameter
pub fn format_parameter(parameter: &Parameter) -> String {
    let default = match parameter.default_value() {
        Some(value) => format!(" = {}", value),
        None => String::new(),
    };
    format!(
        "{} ({}){}",
        style(parameter.name()).cyan(),
        parameter.parameter_type(),
        style(default).dim()
    )
}

/// One-line summary of a step
pub fn format_step(step: &Step) -> String {
    let state = if step.arguments.is_resolved() {
        style("literal").dim().to_string()
    } else {
        style("deferred").yellow().to_string()
    };
    format!("{} [{}] {}", style(&step.name).bold(), step.step_type, state)
}
