use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use evoflock::simulation::params::Params;
use evoflock::simulation::predator::PredatorType;
use evoflock::simulation::prey::CreatureType;
use evoflock::simulation::selection::SelectionMethod;
use evoflock::simulation::world::World;

#[derive(Parser, Debug)]
#[command(name = "evoflock")]
#[command(about = "Headless predator/prey evolution run")]
struct Cli {
    /// JSON params file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 10_000)]
    steps: u64,
    /// Fixed seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    num_creatures: Option<usize>,
    /// random, rank or tournament
    #[arg(long)]
    selection: Option<String>,
    /// Reflective walls instead of a torus
    #[arg(long, default_value_t = false)]
    bounded: bool,
    #[arg(long, default_value_t = false)]
    advanced_predator: bool,
    #[arg(long, default_value_t = false)]
    extended_creatures: bool,
    #[arg(long, default_value_t = 1000)]
    report_every: u64,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    steps: u64,
    reproductions: u64,
    avg_capture_lifespan: f64,
    longest_lifespan: u64,
    predator_total_caught: u64,
    predator_mutations: usize,
    predator_speed: f32,
    predator_size: f32,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("evoflock=info")),
        )
        .try_init();
}

fn build_params(cli: &Cli) -> Result<Params> {
    let mut params = match &cli.config {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("failed to load params from {}", path.display()))?,
        None => Params::default(),
    };
    if let Some(n) = cli.num_creatures {
        params.num_creatures = n;
    }
    if let Some(method) = &cli.selection {
        params.selection_method = method.parse::<SelectionMethod>()?;
    }
    if cli.bounded {
        params.bounded = true;
    }
    if cli.advanced_predator {
        params.predator_type = PredatorType::Advanced;
    }
    if cli.extended_creatures {
        params.creature_type = CreatureType::Extended;
    }
    Ok(params)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let params = build_params(&cli)?;

    let mut world = match cli.seed {
        Some(seed) => World::with_seed(params, seed),
        None => World::new(params),
    }
    .context("invalid simulation parameters")?;

    info!(
        creatures = world.params().num_creatures,
        selection = %world.params().selection_method,
        bounded = world.params().bounded,
        "starting run"
    );

    for _ in 0..cli.steps {
        world.advance_step();
        if cli.report_every > 0 && world.timesteps() % cli.report_every == 0 {
            info!(
                timesteps = world.timesteps(),
                reproductions = world.reproductions(),
                avg_capture_lifespan = world.stats().avg_capture_lifespan(),
                "progress"
            );
        }
    }

    let predator = world.predator();
    let summary = RunSummary {
        steps: world.timesteps(),
        reproductions: world.reproductions(),
        avg_capture_lifespan: world.stats().avg_capture_lifespan(),
        longest_lifespan: world.stats().longest_lifespan,
        predator_total_caught: predator.total_caught,
        predator_mutations: predator.mutation_log.len(),
        predator_speed: predator.agent.speed,
        predator_size: predator.agent.size,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to serialize run summary")?
    );
    Ok(())
}
