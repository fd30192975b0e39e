mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::Workflow;

fn main() -> Result<()> {
    ara_finder::logging::initialize();
    let cli = parse_cli();

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_surface(&cli, &resolved)
}

/// Drive the requested surface and print its report in the chosen format.
fn run_surface(cli: &CliArgs, settings: &ResolvedConfig) -> Result<()> {
    let workflow = Workflow::from_config(settings)?;
    let report = workflow.run(&cli.command);

    match settings.output {
        OutputFormat::Plain => print_plain(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}
