//! evosim - CLI Entry Point
//!
//! Habitat evolution simulator.

use clap::{Parser, Subcommand};
use evosim::shell::{print_wildlife_totals, Shell};
use evosim::stats::StatsHistory;
use evosim::{Config, Ecosystem};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "evosim")]
#[command(version)]
#[command(about = "Evolution simulator: organisms breed, mutate and migrate between habitats")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "evosim.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a fixed number of generations and print a summary
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "evosim.yaml")]
        config: PathBuf,

        /// Number of generations to simulate
        #[arg(short, long, default_value = "20")]
        generations: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write the stats history as JSON
        #[arg(long)]
        stats_out: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "evosim.yaml")]
        output: PathBuf,

        /// Seed every habitat with a founding pair
        #[arg(long)]
        all_founders: bool,
    },

    /// Print a stats history written by `run --stats-out`
    Report {
        /// Stats history file (JSON)
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Shell {
        config: PathBuf::from("evosim.yaml"),
        seed: None,
    }) {
        Commands::Shell { config, seed } => run_shell(&config, seed),
        Commands::Run {
            config,
            generations,
            seed,
            stats_out,
            quiet,
        } => run_batch(&config, generations, seed, stats_out, quiet),
        Commands::Init {
            output,
            all_founders,
        } => generate_config(output, all_founders),
        Commands::Report { input } => show_report(&input),
    }
}

/// Load the config file if present, otherwise the default world, then start logging
fn load_config(path: &Path, seed: Option<u64>) -> Result<Config, Box<dyn std::error::Error>> {
    let (mut config, loaded) = if path.exists() {
        (Config::from_file(path)?, true)
    } else {
        (Config::default(), false)
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    if loaded {
        log::info!("Loaded config from {:?}", path);
    } else {
        log::info!("Using default configuration");
    }
    if seed.is_some() {
        config.simulation.seed = seed;
    }
    Ok(config)
}

fn run_shell(config_path: &Path, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, seed)?;
    let mut ecosystem = Ecosystem::new(config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(stdin.lock(), stdout.lock()).run(&mut ecosystem)?;
    Ok(())
}

fn run_batch(
    config_path: &Path,
    generations: u64,
    seed: Option<u64>,
    stats_out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, seed)?;
    let mut ecosystem = Ecosystem::new(config);

    println!("Starting simulation");
    println!("  Habitats: {}", ecosystem.habitats.len());
    println!("  Initial population: {}", ecosystem.population());
    println!("  Seed: {}", ecosystem.seed());
    println!("  Generations: {}", generations);
    println!();

    let start = Instant::now();
    for _ in 0..generations {
        let stats = ecosystem.step();
        if !quiet {
            println!("{}", stats.summary());
        }
        if ecosystem.is_extinct() {
            println!("\nPopulation extinct at generation {}", ecosystem.generation);
            break;
        }
    }
    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    println!("Generations: {}", ecosystem.generation);
    println!("Final population: {}", ecosystem.population());
    println!("Deepest lineage: {}", ecosystem.stats.lineage_depth);
    println!(
        "Newborns lost to failed migration: {}",
        ecosystem.stats.total_dropped
    );
    print_wildlife_totals(&ecosystem, &mut std::io::stdout())?;

    if let Some(path) = stats_out {
        ecosystem.stats_history.save(&path.to_string_lossy())?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn generate_config(output: PathBuf, all_founders: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = if all_founders {
        Config::with_all_founders()
    } else {
        Config::default()
    };
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn show_report(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let history = StatsHistory::load(&input.to_string_lossy())?;

    println!("Stats history: {:?}", input);
    println!("  Interval: {} generations", history.interval);
    println!("  Snapshots: {}", history.snapshots.len());
    println!();
    for stats in &history.snapshots {
        println!("{}", stats.summary());
    }

    if let Some(last) = history.latest() {
        println!();
        println!("Final population: {}", last.population);
        println!("Newborns lost to failed migration: {}", last.total_dropped);
        for habitat in &last.habitats {
            println!("{}:  {}", habitat.name, habitat.population);
        }
    }
    Ok(())
}
