//! WA-TOR - CLI Entry Point
//!
//! Drives the simulation from the terminal: paces ticks, prints stats and
//! optionally draws the grid.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use wator::grid::CellKind;
use wator::stats::StatsHistory;
use wator::{benchmark, rng, Config, Wator};

#[derive(Parser)]
#[command(name = "wator")]
#[command(version)]
#[command(about = "Wa-Tor predator-prey simulation on a toroidal grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "wator.yaml")]
        config: PathBuf,

        /// Number of chronons to simulate
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Delay between ticks in milliseconds
        #[arg(short, long, default_value = "0")]
        interval_ms: u64,

        /// Draw the grid at every stats interval
        #[arg(short, long)]
        render: bool,

        /// Write the stats history (JSON) here when done
        #[arg(long)]
        history: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of chronons
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Grid width
        #[arg(long, default_value = "160")]
        width: usize,

        /// Grid height
        #[arg(long, default_value = "120")]
        height: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "wator.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            interval_ms,
            render,
            history,
            quiet,
        } => run_simulation(config, steps, seed, interval_ms, render, history, quiet),

        Commands::Benchmark {
            steps,
            width,
            height,
            seed,
        } => {
            init_logging("info");
            run_benchmark(steps, width, height, seed)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn run_simulation(
    config_path: PathBuf,
    steps: u64,
    seed: Option<u64>,
    interval_ms: u64,
    render: bool,
    history_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        let config = Config::from_file(&config_path)?;
        init_logging(&config.logging.log_level);
        log::info!("Loaded config from {:?}", config_path);
        config
    } else {
        let config = Config::default();
        init_logging(&config.logging.log_level);
        log::info!("Using default configuration");
        config
    };

    let (mut rng, seed) = match seed {
        Some(s) => (rng::seeded(s), s),
        None => rng::from_entropy(),
    };
    log::info!("Using seed: {}", seed);

    let mut world = Wator::from_config(&config)?;
    world.initialize(
        config.population.initial_prey,
        config.population.initial_predators,
        &mut rng,
    );

    println!("Starting simulation");
    println!("  Grid: {}x{}", world.width(), world.height());
    println!("  Neighbourhood: {}", world.rules().neighbourhood);
    println!("  Prey: {}  Predators: {}", world.prey_count(), world.predator_count());
    println!("  Chronons: {}", steps);
    println!();

    let mut history = StatsHistory::new(config.logging.stats_interval, config.logging.history_window);
    history.record(world.stats());

    let pace = Duration::from_millis(interval_ms);
    let start = Instant::now();

    for _ in 0..steps {
        world.update(&mut rng);

        let stats = world.stats();
        if history.observe(stats.clone()) && !quiet {
            println!("{}", stats.summary());
            if render {
                println!("{}", draw(&world));
            }
        }

        if world.is_extinct() {
            log::info!("Both species extinct at chronon {}", world.chronon());
            break;
        }

        if !pace.is_zero() {
            std::thread::sleep(pace);
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Chronons: {}", world.chronon());
    println!(
        "Speed: {:.1} chronons/s",
        world.chronon() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("Prey: {} (total {})", world.prey_count(), world.total_prey_count());
    println!(
        "Predators: {} (total {})",
        world.predator_count(),
        world.total_predator_count()
    );
    println!("Kills: {}", world.kills());

    if let Some(path) = history_path {
        history.save(&path)?;
        log::info!("Stats history saved to {:?}", path);
    }

    Ok(())
}

/// One character per cell, one line per row
fn draw(world: &Wator) -> String {
    let mut frame = String::with_capacity((world.width() + 1) * world.height());
    world.for_each_cell(|at, cell| {
        frame.push(match cell.kind() {
            CellKind::Empty => '.',
            CellKind::Prey => 'o',
            CellKind::Predator => 'X',
        });
        if at.x + 1 == world.width() {
            frame.push('\n');
        }
    });
    frame
}

fn run_benchmark(steps: u64, width: usize, height: usize, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== WA-TOR Benchmark ===");
    println!("Chronons: {}", steps);
    println!("Grid: {}x{}", width, height);
    println!();

    let result = benchmark(steps, width, height, seed)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
