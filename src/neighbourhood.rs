//! Neighbourhood topologies with toroidal wraparound.

use crate::error::ConfigError;
use crate::grid::{CellKind, Coord, Grid};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 4-connected offsets: left, right, up, down as (dx, dy)
const NEUMANN: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 8-connected offsets: the von Neumann four followed by the diagonals
const MOORE: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Adjacency topology used for movement and hunting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Neighbourhood {
    /// 4-connected
    #[default]
    #[serde(rename = "neumann")]
    VonNeumann,
    /// 8-connected
    #[serde(rename = "moore")]
    Moore,
}

impl Neighbourhood {
    /// Neighbour offsets in their fixed enumeration order
    #[inline]
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::VonNeumann => &NEUMANN,
            Self::Moore => &MOORE,
        }
    }

    /// Name as accepted by [`FromStr`] and the config file
    pub fn name(self) -> &'static str {
        match self {
            Self::VonNeumann => "neumann",
            Self::Moore => "moore",
        }
    }

    /// Wrapped neighbour coordinates of `at` on a `width` x `height` torus
    pub fn neighbours_of(
        self,
        at: Coord,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Coord> {
        let (w, h) = (width as isize, height as isize);
        let (x, y) = (at.x as isize, at.y as isize);
        self.offsets().iter().map(move |&(dx, dy)| {
            Coord::new((x + dx).rem_euclid(w) as usize, (y + dy).rem_euclid(h) as usize)
        })
    }

    /// Neighbours of `at` whose current occupancy is of the given kind
    pub fn neighbours_matching(self, grid: &Grid, at: Coord, kind: CellKind) -> Vec<Coord> {
        self.neighbours_of(at, grid.width(), grid.height())
            .filter(|&n| grid.get(n).kind() == kind)
            .collect()
    }

    /// Free cells an agent at `at` could move into
    pub fn empty_neighbours(self, grid: &Grid, at: Coord) -> Vec<Coord> {
        self.neighbours_matching(grid, at, CellKind::Empty)
    }

    /// Prey a predator at `at` could catch
    pub fn prey_neighbours(self, grid: &Grid, at: Coord) -> Vec<Coord> {
        self.neighbours_matching(grid, at, CellKind::Prey)
    }
}

impl FromStr for Neighbourhood {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neumann" => Ok(Self::VonNeumann),
            "moore" => Ok(Self::Moore),
            _ => Err(ConfigError::UnknownNeighbourhood(s.to_string())),
        }
    }
}

impl std::fmt::Display for Neighbourhood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
