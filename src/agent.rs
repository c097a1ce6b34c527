//! Agent state and species.

use crate::rng::jitter;
use crate::world::Rules;
use rand::Rng;

/// The two kinds of agent living on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Prey,
    Predator,
}

/// Per-agent counters.
///
/// `age` and `starvation` are signed: freshly spawned agents receive a random
/// offset that may be negative, and count up through zero from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgentState {
    /// Ticks since birth or last reproduction
    pub age: i64,
    /// Ticks since last kill (predators only, always 0 for prey)
    pub starvation: i64,
    /// Set once the agent has acted in the current tick
    pub moved: bool,
}

impl AgentState {
    /// State with explicit counters, not yet moved this tick
    pub fn new(age: i64, starvation: i64) -> Self {
        Self {
            age,
            starvation,
            moved: false,
        }
    }

    /// Spawn a new agent with jittered counters.
    ///
    /// The age offset is drawn against the species' reproduction age; predators
    /// additionally get a starvation offset against the starvation threshold.
    pub fn spawn<R: Rng + ?Sized>(species: Species, rules: &Rules, variance: f64, rng: &mut R) -> Self {
        match species {
            Species::Prey => Self::new(jitter(rng, variance, rules.prey_reproduction_age), 0),
            Species::Predator => {
                let age = jitter(rng, variance, rules.predator_reproduction_age);
                let starvation = jitter(rng, variance, rules.predator_starvation_age);
                Self::new(age, starvation)
            }
        }
    }
}
