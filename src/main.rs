use anyhow::{Context, Result};
use pipeline_workflow::cli::commands::{DefinitionCommand, ValidateCommand};
use pipeline_workflow::cli::output::*;
use pipeline_workflow::cli::{Cli, Command};
use pipeline_workflow::core::config::PipelineConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Definition(cmd) => print_definition(cmd)?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
    }

    Ok(())
}

fn print_definition(cmd: &DefinitionCommand) -> Result<()> {
    let config = PipelineConfig::from_file(&cmd.file).context("Failed to load pipeline config")?;
    let pipeline = config.to_pipeline()?;

    if cmd.pretty {
        let json = serde_json::to_string_pretty(&pipeline.resolved_request())?;
        println!("{}", json);
    } else {
        // exact wire string, stdout only so it can be piped
        println!("{}", pipeline.definition()?);
    }

    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let result = PipelineConfig::from_file(&cmd.file).and_then(|config| config.to_pipeline());

    match result {
        Ok(pipeline) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&pipeline.name).bold());
            println!("  Parameters: {}", style(pipeline.parameters().len()).cyan());
            for parameter in pipeline.parameters() {
                println!("    {}", format_parameter(parameter));
            }
            let steps = pipeline.flattened_steps();
            println!("  Steps: {}", style(steps.len()).cyan());
            for step in &steps {
                println!("    {}", format_step(step));
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&pipeline.resolved_request())?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
