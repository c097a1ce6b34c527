//! Per-species index of live agent positions.
//!
//! The grid holds the agents themselves; a registry only records where the
//! live agents of one species are, so a tick can visit them without scanning
//! empty cells.

use crate::grid::Coord;
use rand::seq::SliceRandom;
use rand::Rng;

/// Marks a cell with no registered agent
const VACANT: usize = usize::MAX;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    positions: Vec<Coord>,
    /// Row-major cell index -> slot in `positions`, or `VACANT`
    slots: Vec<usize>,
    width: usize,
}

impl Registry {
    /// Empty registry able to index every cell of a `width` x `height` grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            positions: Vec::new(),
            slots: vec![VACANT; width * height],
            width,
        }
    }

    #[inline]
    fn cell(&self, at: Coord) -> usize {
        at.y * self.width + at.x
    }

    #[inline]
    pub fn add(&mut self, at: Coord) {
        let cell = self.cell(at);
        debug_assert_eq!(self.slots[cell], VACANT, "coordinate {} registered twice", at);
        self.slots[cell] = self.positions.len();
        self.positions.push(at);
    }

    /// Remove the entry for `at` in constant time. Returns false if no agent
    /// was registered there.
    pub fn remove(&mut self, at: Coord) -> bool {
        let cell = self.cell(at);
        let slot = match self.slots.get(cell) {
            Some(&slot) if slot != VACANT => slot,
            _ => return false,
        };

        self.slots[cell] = VACANT;
        self.positions.swap_remove(slot);
        if let Some(&moved) = self.positions.get(slot) {
            let moved_cell = self.cell(moved);
            self.slots[moved_cell] = slot;
        }
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
    }

    pub fn clear(&mut self) {
        for at in std::mem::take(&mut self.positions) {
            let cell = self.cell(at);
            self.slots[cell] = VACANT;
        }
    }

    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    pub fn contains(&self, at: Coord) -> bool {
        matches!(self.slots.get(self.cell(at)), Some(&slot) if slot != VACANT)
    }

    /// Take every entry out in Fisher-Yates shuffled order, leaving the registry
    /// empty so the next tick's set can be built in its place.
    pub fn drain_shuffled<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Coord> {
        let mut order = std::mem::take(&mut self.positions);
        for &at in &order {
            let cell = self.cell(at);
            self.slots[cell] = VACANT;
        }
        order.shuffle(rng);
        order
    }

    /// Swap in the set built during a phase
    pub fn replace(&mut self, next: Registry) {
        *self = next;
    }
}
