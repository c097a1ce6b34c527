//! Per-tick update.
//!
//! One tick runs two phases, predators first and prey second, so a predator can
//! catch prey before that prey gets its own turn to flee. Each phase walks its
//! species' registry in shuffled order and rewrites the grid in place; the
//! per-agent `moved` flag keeps an agent from acting twice, which lets a single
//! sweep stand in for a simultaneous update of every agent.

use crate::agent::{AgentState, Species};
use crate::grid::{Coord, Occupancy};
use crate::world::Wator;
use rand::seq::SliceRandom;
use rand::Rng;

/// What an acting agent does after choosing a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Move(Coord),
    Kill(Coord),
}

impl Target {
    #[inline]
    fn coord(self) -> Coord {
        match self {
            Self::Move(at) | Self::Kill(at) => at,
        }
    }
}

impl Wator {
    /// Advance the world by one chronon.
    ///
    /// Never fails: agents without a legal target idle, starving predators die,
    /// and a full grid simply produces a tick in which nobody relocates.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.chronon += 1;
        if self.predator_count > 0 {
            self.score += 1;
        }

        self.grid.for_each_cell_mut(|_, cell| {
            if let Some(state) = cell.state_mut() {
                state.moved = false;
            }
        });

        self.run_phase(Species::Predator, rng);
        self.run_phase(Species::Prey, rng);

        log::trace!(
            "chronon={} prey={} predators={} total_prey={} total_predators={}",
            self.chronon,
            self.prey_count,
            self.predator_count,
            self.total_prey_count,
            self.total_predator_count
        );
    }

    /// Let every live agent of `species` act once, then swap in the registry of
    /// survivors, movers and newborns.
    fn run_phase<R: Rng + ?Sized>(&mut self, species: Species, rng: &mut R) {
        let order = self.registry_mut(species).drain_shuffled(rng);
        // The drained registry keeps its vacated cell index; build into it.
        let mut next = std::mem::take(self.registry_mut(species));
        next.reserve(order.len());

        for at in order {
            let cell = self.grid.get(at);
            let mut state = match cell.state() {
                Some(state) if cell.species() == Some(species) && !state.moved => *state,
                // Stale entry or already acted this tick.
                _ => continue,
            };

            state.age += 1;
            if species == Species::Predator {
                state.starvation += 1;
            }
            state.moved = true;

            if species == Species::Predator
                && state.starvation > i64::from(self.rules.predator_starvation_age)
            {
                self.grid.set(at, Occupancy::Empty);
                self.predator_count -= 1;
                continue;
            }

            let target = match self.choose_target(species, at, rng) {
                Some(target) => target,
                None => {
                    self.grid.set(at, Occupancy::agent(species, state));
                    next.add(at);
                    continue;
                }
            };

            if let Target::Kill(victim) = target {
                state.starvation = 0;
                self.prey.remove(victim);
                self.prey_count -= 1;
            }

            if state.age >= i64::from(self.rules.reproduction_age(species)) {
                state.age = 0;
                let mut offspring =
                    AgentState::spawn(species, &self.rules, self.rules.age_variance, rng);
                // Newborns first act next tick.
                offspring.moved = true;
                self.grid.set(at, Occupancy::agent(species, offspring));
                next.add(at);
                self.record_birth(species);
            } else {
                self.grid.set(at, Occupancy::Empty);
            }

            let dest = target.coord();
            self.grid.set(dest, Occupancy::agent(species, state));
            next.add(dest);
        }

        self.registry_mut(species).replace(next);
    }

    /// Pick a random empty neighbour to move into; predators override that
    /// with a random adjacent prey when one exists.
    fn choose_target<R: Rng + ?Sized>(
        &self,
        species: Species,
        at: Coord,
        rng: &mut R,
    ) -> Option<Target> {
        let topology = self.rules.neighbourhood;

        let mut target = topology
            .empty_neighbours(&self.grid, at)
            .choose(rng)
            .copied()
            .map(Target::Move);

        if species == Species::Predator {
            if let Some(&victim) = topology.prey_neighbours(&self.grid, at).choose(rng) {
                target = Some(Target::Kill(victim));
            }
        }

        target
    }
}
