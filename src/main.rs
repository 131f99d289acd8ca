use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use tellus::{nature::OrganismSummary, ScenarioLoader};

#[derive(Debug, Parser)]
#[command(author, version, about = "tellus world simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/small_archipelago.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final world summary as JSON instead of text
    #[arg(long)]
    summary_json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    scenario: String,
    year: u64,
    land_cells: usize,
    snapshots: usize,
    organisms: Vec<OrganismSummary>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    let mut sim = scenario.build_simulation()?;
    let ticks = scenario.ticks(cli.ticks);

    for _ in 0..ticks {
        sim.advance();
    }

    let summary = RunSummary {
        scenario: scenario.name.clone(),
        year: sim.current_year(),
        land_cells: sim.terrain().land_count(),
        snapshots: sim.history().len(),
        organisms: sim.organisms(),
    };

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Scenario '{}' completed at year {}. {} land cells, {} snapshots, {} organisms alive.",
            summary.scenario,
            summary.year,
            summary.land_cells,
            summary.snapshots,
            summary.organisms.len()
        );
        for organism in &summary.organisms {
            println!(
                "  {} ({}) - stage {}, age {}/{}, produce: {}",
                organism.name,
                organism.kind,
                organism.stage,
                organism.age,
                organism.lifespan,
                organism.produce
            );
        }
    }
    Ok(())
}
