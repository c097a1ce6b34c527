//! Toroidal occupancy grid.

use crate::agent::{AgentState, Species};

/// Grid coordinate, `0 <= x < width`, `0 <= y < height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Content of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupancy {
    #[default]
    Empty,
    Prey(AgentState),
    Predator(AgentState),
}

/// Occupancy kind without the agent state, for renderers and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Prey,
    Predator,
}

impl Occupancy {
    /// Wrap an agent state as the given species
    pub fn agent(species: Species, state: AgentState) -> Self {
        match species {
            Species::Prey => Self::Prey(state),
            Species::Predator => Self::Predator(state),
        }
    }

    #[inline]
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Empty => CellKind::Empty,
            Self::Prey(_) => CellKind::Prey,
            Self::Predator(_) => CellKind::Predator,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[inline]
    pub fn species(&self) -> Option<Species> {
        match self {
            Self::Empty => None,
            Self::Prey(_) => Some(Species::Prey),
            Self::Predator(_) => Some(Species::Predator),
        }
    }

    #[inline]
    pub fn state(&self) -> Option<&AgentState> {
        match self {
            Self::Empty => None,
            Self::Prey(state) | Self::Predator(state) => Some(state),
        }
    }

    #[inline]
    pub fn state_mut(&mut self) -> Option<&mut AgentState> {
        match self {
            Self::Empty => None,
            Self::Prey(state) | Self::Predator(state) => Some(state),
        }
    }
}

/// Per-kind cell counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub empty: usize,
    pub prey: usize,
    pub predators: usize,
}

/// Flat row-major grid of cells.
///
/// Coordinates must already be wrapped into range; an out-of-range access is a
/// caller bug and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Occupancy>,
}

impl Grid {
    /// Create an empty grid. Dimensions are validated by the caller.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Occupancy::Empty; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, at: Coord) -> usize {
        assert!(
            at.x < self.width && at.y < self.height,
            "coordinate {} outside {}x{} grid",
            at,
            self.width,
            self.height
        );
        at.y * self.width + at.x
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Occupancy {
        self.cells[self.index(at)]
    }

    #[inline]
    pub fn get_mut(&mut self, at: Coord) -> &mut Occupancy {
        let idx = self.index(at);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn set(&mut self, at: Coord, occupancy: Occupancy) {
        let idx = self.index(at);
        self.cells[idx] = occupancy;
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Occupancy::Empty);
    }

    /// Visit every cell once in row-major order (y outer, x inner)
    pub fn for_each_cell<F>(&self, mut f: F)
    where
        F: FnMut(Coord, &Occupancy),
    {
        for (idx, cell) in self.cells.iter().enumerate() {
            f(Coord::new(idx % self.width, idx / self.width), cell);
        }
    }

    /// Visit every cell once in row-major order, allowing in-place rewrites
    pub fn for_each_cell_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(Coord, &mut Occupancy),
    {
        let width = self.width;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            f(Coord::new(idx % width, idx / width), cell);
        }
    }

    /// Count cells by kind
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for cell in &self.cells {
            match cell.kind() {
                CellKind::Empty => census.empty += 1,
                CellKind::Prey => census.prey += 1,
                CellKind::Predator => census.predators += 1,
            }
        }
        census
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_get_set() {
        let mut grid = Grid::new(8, 4);
        let at = Coord::new(7, 3);
        assert!(grid.get(at).is_empty());

        grid.set(at, Occupancy::Prey(AgentState::new(3, 0)));
        assert_eq!(grid.get(at).kind(), CellKind::Prey);
        assert_eq!(grid.get(at).state().map(|s| s.age), Some(3));
        assert_eq!(grid.capacity(), 32);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_panics() {
        let grid = Grid::new(4, 4);
        grid.get(Coord::new(4, 0));
    }

    #[test]
    fn test_for_each_cell_row_major() {
        let grid = Grid::new(3, 2);
        let mut visited = Vec::new();
        grid.for_each_cell(|at, _| visited.push((at.x, at.y)));

        assert_eq!(visited, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_for_each_cell_mut_rewrites() {
        let mut grid = Grid::new(4, 4);
        let mut moved = AgentState::new(0, 0);
        moved.moved = true;
        grid.set(Coord::new(1, 1), Occupancy::Predator(moved));

        grid.for_each_cell_mut(|_, cell| {
            if let Some(state) = cell.state_mut() {
                state.moved = false;
            }
        });

        assert_eq!(grid.get(Coord::new(1, 1)).state().map(|s| s.moved), Some(false));
    }

    #[test]
    fn test_census() {
        let mut grid = Grid::new(5, 5);
        grid.set(Coord::new(0, 0), Occupancy::Prey(AgentState::default()));
        grid.set(Coord::new(1, 0), Occupancy::Prey(AgentState::default()));
        grid.set(Coord::new(2, 0), Occupancy::Predator(AgentState::default()));

        let census = grid.census();
        assert_eq!(census.prey, 2);
        assert_eq!(census.predators, 1);
        assert_eq!(census.empty, 22);

        grid.clear();
        assert_eq!(grid.census().empty, 25);
    }
}
