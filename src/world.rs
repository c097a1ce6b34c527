//! Simulation facade - owns the grid, the registries and the counters.
//!
//! The per-tick state transition lives in [`crate::engine`]; this module covers
//! construction, configuration, initial placement and the read model.

use crate::agent::{AgentState, Species};
use crate::config::Config;
use crate::error::ConfigError;
use crate::grid::{Census, Coord, Grid, Occupancy};
use crate::neighbourhood::Neighbourhood;
use crate::registry::Registry;
use crate::stats::Stats;
use rand::Rng;

/// Variance applied to agents placed by [`Wator::initialize`]
pub const INITIAL_AGE_VARIANCE: f64 = 1.0;

/// Breeding, starvation and movement rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    /// Age at which prey reproduce
    pub prey_reproduction_age: u32,
    /// Age at which predators reproduce
    pub predator_reproduction_age: u32,
    /// Predators die once their starvation counter exceeds this
    pub predator_starvation_age: u32,
    /// Jitter fraction (0.0 - 1.0) applied to offspring counters
    pub age_variance: f64,
    /// Adjacency used for moving and hunting
    pub neighbourhood: Neighbourhood,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            prey_reproduction_age: 1000,
            predator_reproduction_age: 110,
            predator_starvation_age: 100,
            age_variance: 0.1,
            neighbourhood: Neighbourhood::VonNeumann,
        }
    }
}

impl Rules {
    /// Reproduction threshold for the given species
    #[inline]
    pub fn reproduction_age(&self, species: Species) -> u32 {
        match species {
            Species::Prey => self.prey_reproduction_age,
            Species::Predator => self.predator_reproduction_age,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_age_variance(self.age_variance)
    }
}

fn validate_age_variance(variance: f64) -> Result<(), ConfigError> {
    if variance.is_finite() && (0.0..=1.0).contains(&variance) {
        Ok(())
    } else {
        Err(ConfigError::InvalidAgeVariance(variance))
    }
}

/// The Wa-Tor world
#[derive(Debug, Clone, PartialEq)]
pub struct Wator {
    pub(crate) grid: Grid,
    pub(crate) prey: Registry,
    pub(crate) predators: Registry,
    pub(crate) rules: Rules,

    pub(crate) chronon: u64,
    pub(crate) prey_count: usize,
    pub(crate) predator_count: usize,
    pub(crate) total_prey_count: u64,
    pub(crate) total_predator_count: u64,
    pub(crate) score: u64,
}

impl Wator {
    /// Create an empty world with default rules
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        width
            .checked_mul(height)
            .ok_or_else(|| ConfigError::Invalid(format!("grid {}x{} is too large", width, height)))?;

        Ok(Self {
            grid: Grid::new(width, height),
            prey: Registry::new(width, height),
            predators: Registry::new(width, height),
            rules: Rules::default(),
            chronon: 0,
            prey_count: 0,
            predator_count: 0,
            total_prey_count: 0,
            total_predator_count: 0,
            score: 0,
        })
    }

    /// Create an empty world sized and configured from `config`
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::new(config.world.width, config.world.height)?;
        world.set_rules(config.rules.to_rules())?;
        Ok(world)
    }

    // --- configuration -----------------------------------------------------

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Replace all rules at once
    pub fn set_rules(&mut self, rules: Rules) -> Result<(), ConfigError> {
        rules.validate()?;
        if rules.neighbourhood != self.rules.neighbourhood {
            self.warn_topology_change(rules.neighbourhood);
        }
        self.rules = rules;
        Ok(())
    }

    pub fn set_prey_reproduction_age(&mut self, age: u32) {
        self.rules.prey_reproduction_age = age;
    }

    pub fn set_predator_reproduction_age(&mut self, age: u32) {
        self.rules.predator_reproduction_age = age;
    }

    pub fn set_predator_starvation_age(&mut self, age: u32) {
        self.rules.predator_starvation_age = age;
    }

    pub fn set_age_variance(&mut self, variance: f64) -> Result<(), ConfigError> {
        validate_age_variance(variance)?;
        self.rules.age_variance = variance;
        Ok(())
    }

    /// Select the topology. Meant to be called before [`Wator::initialize`];
    /// switching mid-run is allowed but takes effect from the next tick.
    pub fn set_neighbourhood(&mut self, neighbourhood: Neighbourhood) {
        if neighbourhood != self.rules.neighbourhood {
            self.warn_topology_change(neighbourhood);
        }
        self.rules.neighbourhood = neighbourhood;
    }

    /// Select the topology by name (`"neumann"` or `"moore"`)
    pub fn set_neighbourhood_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.set_neighbourhood(name.parse()?);
        Ok(())
    }

    fn warn_topology_change(&self, to: Neighbourhood) {
        if self.chronon > 0 {
            log::warn!(
                "Neighbourhood changed mid-run at chronon {}: {} -> {}",
                self.chronon,
                self.rules.neighbourhood,
                to
            );
        }
    }

    // --- lifecycle ---------------------------------------------------------

    /// Reset the world and scatter prey and predators onto random empty cells.
    ///
    /// Requested populations are clamped to the grid capacity; predators only
    /// get whatever cells the prey left free.
    pub fn initialize<R: Rng + ?Sized>(&mut self, n_prey: usize, n_predators: usize, rng: &mut R) {
        self.grid.clear();
        self.prey.clear();
        self.predators.clear();
        self.chronon = 0;
        self.prey_count = 0;
        self.predator_count = 0;
        self.total_prey_count = 0;
        self.total_predator_count = 0;
        self.score = 0;

        let capacity = self.grid.capacity();
        let prey_target = n_prey.min(capacity);
        let predator_target = n_predators.min(capacity - prey_target);
        if prey_target < n_prey || predator_target < n_predators {
            log::debug!(
                "Initial population clamped to capacity {}: prey {} -> {}, predators {} -> {}",
                capacity,
                n_prey,
                prey_target,
                n_predators,
                predator_target
            );
        }

        self.scatter(Species::Prey, prey_target, rng);
        self.scatter(Species::Predator, predator_target, rng);

        log::debug!(
            "Initialized {}x{} world: prey={}, predators={}",
            self.grid.width(),
            self.grid.height(),
            self.prey_count,
            self.predator_count
        );
    }

    /// Rejection-sample `count` empty cells for new agents of `species`
    fn scatter<R: Rng + ?Sized>(&mut self, species: Species, count: usize, rng: &mut R) {
        let (width, height) = (self.grid.width(), self.grid.height());
        let mut placed = 0;
        while placed < count {
            let at = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if self.grid.get(at).is_empty() {
                let state = AgentState::spawn(species, &self.rules, INITIAL_AGE_VARIANCE, rng);
                self.insert(at, species, state);
                placed += 1;
            }
        }
    }

    /// Put a specific agent onto an empty cell.
    ///
    /// Returns false without changing anything if the cell is occupied or
    /// `occupant` is [`Occupancy::Empty`]. Panics if `at` is outside the grid.
    pub fn place(&mut self, at: Coord, occupant: Occupancy) -> bool {
        if !self.grid.get(at).is_empty() {
            return false;
        }
        match occupant {
            Occupancy::Empty => false,
            Occupancy::Prey(state) => {
                self.insert(at, Species::Prey, state);
                true
            }
            Occupancy::Predator(state) => {
                self.insert(at, Species::Predator, state);
                true
            }
        }
    }

    fn insert(&mut self, at: Coord, species: Species, state: AgentState) {
        self.grid.set(at, Occupancy::agent(species, state));
        self.registry_mut(species).add(at);
        self.record_birth(species);
    }

    pub(crate) fn record_birth(&mut self, species: Species) {
        match species {
            Species::Prey => {
                self.prey_count += 1;
                self.total_prey_count += 1;
            }
            Species::Predator => {
                self.predator_count += 1;
                self.total_predator_count += 1;
            }
        }
    }

    pub(crate) fn registry_mut(&mut self, species: Species) -> &mut Registry {
        match species {
            Species::Prey => &mut self.prey,
            Species::Predator => &mut self.predators,
        }
    }

    // --- read model --------------------------------------------------------

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Occupancy of a single (in-range) cell
    pub fn get(&self, at: Coord) -> Occupancy {
        self.grid.get(at)
    }

    /// Visit every cell in row-major order, for renderers
    pub fn for_each_cell<F>(&self, f: F)
    where
        F: FnMut(Coord, &Occupancy),
    {
        self.grid.for_each_cell(f);
    }

    /// Count grid cells by kind
    pub fn census(&self) -> Census {
        self.grid.census()
    }

    /// Registered positions of live prey
    pub fn prey_positions(&self) -> &[Coord] {
        self.prey.positions()
    }

    /// Registered positions of live predators
    pub fn predator_positions(&self) -> &[Coord] {
        self.predators.positions()
    }

    // --- telemetry ---------------------------------------------------------

    pub fn chronon(&self) -> u64 {
        self.chronon
    }

    pub fn prey_count(&self) -> usize {
        self.prey_count
    }

    pub fn predator_count(&self) -> usize {
        self.predator_count
    }

    pub fn total_prey_count(&self) -> u64 {
        self.total_prey_count
    }

    pub fn total_predator_count(&self) -> u64 {
        self.total_predator_count
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Prey lost so far; prey only ever die by predation
    pub fn kills(&self) -> u64 {
        self.total_prey_count - self.prey_count as u64
    }

    /// Both species gone
    pub fn is_extinct(&self) -> bool {
        self.prey_count == 0 && self.predator_count == 0
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> Stats {
        Stats {
            chronon: self.chronon,
            prey: self.prey_count,
            predators: self.predator_count,
            total_prey: self.total_prey_count,
            total_predators: self.total_predator_count,
            kills: self.kills(),
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Wator::new(0, 10),
            Err(ConfigError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Wator::new(10, 0).is_err());
        assert!(Wator::new(1, 1).is_ok());
    }

    #[test]
    fn test_initialize_places_requested_counts() {
        let mut world = Wator::new(20, 10).unwrap();
        world.initialize(50, 20, &mut seeded(1));

        assert_eq!(world.prey_count(), 50);
        assert_eq!(world.predator_count(), 20);
        assert_eq!(world.total_prey_count(), 50);
        assert_eq!(world.total_predator_count(), 20);
        assert_eq!(world.chronon(), 0);

        let census = world.census();
        assert_eq!(census.prey, 50);
        assert_eq!(census.predators, 20);
        assert_eq!(world.prey_positions().len(), 50);
    }

    #[test]
    fn test_initialize_clamps_to_capacity() {
        let mut world = Wator::new(4, 4).unwrap();
        world.initialize(10, 100, &mut seeded(2));

        assert_eq!(world.prey_count(), 10);
        assert_eq!(world.predator_count(), 6);
        assert_eq!(world.census().empty, 0);

        world.initialize(100, 5, &mut seeded(2));
        assert_eq!(world.prey_count(), 16);
        assert_eq!(world.predator_count(), 0);
    }

    #[test]
    fn test_initialize_resets_counters() {
        let mut world = Wator::new(10, 10).unwrap();
        let mut rng = seeded(3);
        world.initialize(30, 10, &mut rng);
        for _ in 0..5 {
            world.update(&mut rng);
        }
        world.initialize(5, 2, &mut rng);

        assert_eq!(world.chronon(), 0);
        assert_eq!(world.score(), 0);
        assert_eq!(world.total_prey_count(), 5);
        assert_eq!(world.total_predator_count(), 2);
    }

    #[test]
    fn test_initial_jitter_uses_full_variance() {
        let mut world = Wator::new(30, 30).unwrap();
        world.set_prey_reproduction_age(10);
        world.set_age_variance(0.0).unwrap();
        world.initialize(300, 0, &mut seeded(4));

        let mut ages = Vec::new();
        world.for_each_cell(|_, cell| {
            if let Occupancy::Prey(state) = cell {
                ages.push(state.age);
            }
        });
        assert!(ages.iter().all(|a| (-10..10).contains(a)));
        assert!(ages.iter().any(|&a| a != 0));
    }

    #[test]
    fn test_place_rejects_occupied_and_empty() {
        let mut world = Wator::new(5, 5).unwrap();
        let at = Coord::new(2, 2);

        assert!(!world.place(at, Occupancy::Empty));
        assert!(world.place(at, Occupancy::Prey(AgentState::default())));
        assert!(!world.place(at, Occupancy::Predator(AgentState::default())));
        assert_eq!(world.prey_count(), 1);
        assert_eq!(world.predator_count(), 0);
    }

    #[test]
    fn test_setters_validate() {
        let mut world = Wator::new(5, 5).unwrap();
        assert!(world.set_age_variance(0.5).is_ok());
        assert!(matches!(
            world.set_age_variance(1.5),
            Err(ConfigError::InvalidAgeVariance(_))
        ));
        assert!(world.set_age_variance(f64::NAN).is_err());
        assert_eq!(world.rules().age_variance, 0.5);

        assert!(world.set_neighbourhood_name("moore").is_ok());
        assert_eq!(world.rules().neighbourhood, Neighbourhood::Moore);
        assert!(world.set_neighbourhood_name("triangle").is_err());
        assert_eq!(world.rules().neighbourhood, Neighbourhood::Moore);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.world.width = 12;
        config.world.height = 7;
        config.rules.neighbourhood = Neighbourhood::Moore;

        let world = Wator::from_config(&config).unwrap();
        assert_eq!(world.width(), 12);
        assert_eq!(world.height(), 7);
        assert_eq!(world.rules().neighbourhood, Neighbourhood::Moore);
        assert_eq!(world.rules().prey_reproduction_age, config.rules.prey_reproduction_age);
    }
}
