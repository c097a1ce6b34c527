//! # WA-TOR
//!
//! Predator-prey population dynamics on a toroidal grid.
//!
//! Prey and predators live one per cell. Every chronon each agent ages, moves
//! to a random free neighbour, and breeds once old enough; predators
//! additionally hunt adjacent prey and starve if they go too long without a
//! kill.
//!
//! ## Features
//!
//! - **Single pass**: each tick rewrites the grid in place, no double buffer
//! - **Registry driven**: only live agents are visited, not every cell
//! - **Reproducible**: all randomness comes from a caller-supplied RNG
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use wator::{rng, Wator};
//!
//! let mut rng = rng::seeded(42);
//! let mut world = Wator::new(80, 60).unwrap();
//! world.set_prey_reproduction_age(10);
//! world.set_predator_reproduction_age(25);
//! world.set_predator_starvation_age(10);
//!
//! world.initialize(1000, 200, &mut rng);
//! for _ in 0..100 {
//!     world.update(&mut rng);
//! }
//!
//! assert_eq!(world.chronon(), 100);
//! assert_eq!(world.prey_count(), world.census().prey);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use wator::{Config, Neighbourhood, Wator};
//!
//! let mut config = Config::default();
//! config.world.width = 64;
//! config.world.height = 48;
//! config.rules.neighbourhood = Neighbourhood::Moore;
//!
//! let world = Wator::from_config(&config).unwrap();
//! assert_eq!(world.width(), 64);
//! ```

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod neighbourhood;
pub mod registry;
pub mod rng;
pub mod stats;
pub mod world;

// Re-export main types
pub use agent::{AgentState, Species};
pub use config::Config;
pub use error::ConfigError;
pub use grid::{CellKind, Coord, Occupancy};
pub use neighbourhood::Neighbourhood;
pub use world::{Rules, Wator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time `steps` ticks on a world populated the way the default config does it
pub fn benchmark(steps: u64, width: usize, height: usize, seed: u64) -> Result<BenchmarkResult, ConfigError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.world.width = width;
    config.world.height = height;

    let mut world = Wator::from_config(&config)?;
    let mut rng = rng::seeded(seed);

    // Same prey/predator density as the default 160x120 setup.
    let cells = width * height;
    let n_prey = cells * config.population.initial_prey / (160 * 120);
    let n_predators = cells * config.population.initial_predators / (160 * 120);
    world.initialize(n_prey, n_predators, &mut rng);

    let start = Instant::now();
    for _ in 0..steps {
        world.update(&mut rng);
    }
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        steps,
        width,
        height,
        final_prey: world.prey_count(),
        final_predators: world.predator_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub width: usize,
    pub height: usize,
    pub final_prey: usize,
    pub final_predators: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Grid: {}x{}", self.width, self.height)?;
        writeln!(f, "Chronons: {}", self.steps)?;
        writeln!(f, "Final prey: {}", self.final_prey)?;
        writeln!(f, "Final predators: {}", self.final_predators)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} chronons/s", self.steps_per_second)?;
        Ok(())
    }
}
