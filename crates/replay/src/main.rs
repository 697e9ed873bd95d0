//! Replays a scripted quest and reports the outcome.
//!
//! Loads a scenario and an action script from a content data directory,
//! plays the script through the rules engine, and prints every emitted event
//! together with the final quest status and state root.
//!
//! ```bash
//! cargo run -p quest-replay -- --scenario first-trial
//! RUST_LOG=quest_core=debug cargo run -p quest-replay -- -s first-trial --format json
//! ```

mod replay;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use quest_content::{ConfigLoader, ContentFactory};
use quest_core::create_game_state;

use crate::replay::{ReplayReport, StepOutcome, replay};

/// Replay an action script against a scenario
#[derive(Parser)]
#[command(name = "quest-replay")]
#[command(about = "Replay a scripted quest", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario name, read from `scenarios/<NAME>.ron`
    #[arg(short, long, value_name = "NAME")]
    scenario: String,

    /// Action script name, read from `scripts/<NAME>.ron` (defaults to the scenario name)
    #[arg(short, long, value_name = "NAME")]
    actions: Option<String>,

    /// Content data directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Rule configuration file (defaults to `config.toml` in the data directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip rejected actions instead of stopping at the first one
    #[arg(long)]
    keep_going: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per action and event
    Summary,
    /// Full JSON report
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let factory = match &cli.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let scenario = factory.load_scenario(&cli.scenario)?;
    let script = factory.load_script(cli.actions.as_deref().unwrap_or(&cli.scenario))?;

    tracing::info!(
        scenario = %scenario.name,
        actions = script.len(),
        "replaying script"
    );

    let state = create_game_state(scenario.setup, &config);
    let report = replay(state, &script, cli.keep_going);

    match cli.format {
        OutputFormat::Summary => print_summary(&report),
        OutputFormat::Json => print_json(&scenario.name, &report)?,
    }

    if report.rejected() > 0 && !cli.keep_going {
        anyhow::bail!("replay stopped after {} of {} actions", report.steps.len(), script.len());
    }
    Ok(())
}

fn print_summary(report: &ReplayReport) {
    for step in &report.steps {
        let actor = step
            .action
            .actor()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_owned());
        match &step.outcome {
            StepOutcome::Applied { events } => {
                println!("#{:<3} {} by {}", step.index, step.action.kind(), actor);
                for event in events {
                    let name: &'static str = event.into();
                    println!("       {name}");
                }
            }
            StepOutcome::Rejected { code, message } => {
                println!(
                    "#{:<3} {} by {} rejected: {code}: {message}",
                    step.index,
                    step.action.kind(),
                    actor
                );
            }
        }
    }
    println!();
    println!("Status:       {}", report.status());
    println!("Rejected:     {}", report.rejected());
    println!("State root:   {}", report.state_root());
    println!("Actions root: {}", report.actions_root());
}

fn print_json(scenario: &str, report: &ReplayReport) -> Result<()> {
    let json = serde_json::json!({
        "scenario": scenario,
        "status": report.status(),
        "steps": report.steps,
        "stateRoot": report.state_root(),
        "actionsRoot": report.actions_root(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
