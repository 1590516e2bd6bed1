//! # waypoint_routing
//!
//! Multi-waypoint routing on a bounded, 4-connected, uniform-cost grid. Given a start, an end and
//! a list of required cells, a [RoutingEngine] produces a minimal-length walk from start to end
//! that steps on every required cell. Two policies select the flavour of the problem:
//!
//! - [OrderPolicy] decides whether the required cells are visited in the given order or in the
//!   order minimizing total length, found exactly with
//!   [Held-Karp](https://en.wikipedia.org/wiki/Held%E2%80%93Karp_algorithm) dynamic programming.
//! - [RevisitPolicy] decides whether a cell may be stepped on more than once. When it may not,
//!   the engine searches the expanded state space of (position, visited waypoints, visited
//!   cells) with a uniform-cost search to obtain a provably optimal simple path.
//!
//! Like [grid_pathfinding](https://crates.io/crates/grid_pathfinding), connected components are
//! pre-computed to report unreachable waypoints without flood-filling the grid.
//!
//! ```
//! use waypoint_routing::{route, Coord, GridConfig, OrderPolicy, RevisitPolicy};
//!
//! let config = GridConfig::new(5, Coord::new(0, 0), Coord::new(4, 4))
//!     .with_required(vec![Coord::new(0, 4)])
//!     .with_policies(OrderPolicy::Optimize, RevisitPolicy::Forbidden);
//! let path = route(&config).unwrap();
//! assert_eq!(path.len(), 9);
//! ```
pub mod config;
pub mod engine;
pub mod error;
pub mod pathing_grid;
pub mod search_context;
pub mod solver;

use core::fmt;
use fxhash::FxHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use config::{GridConfig, OrderPolicy, RevisitPolicy, Snapshot};
pub use engine::{route, NoRevisitStrategy, RoutingEngine};
pub use error::RouteError;
pub use pathing_grid::PathingGrid;

/// Inline capacity of neighbour buffers; a cell has at most four orthogonal neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Bitset over the required waypoints, bit `i` standing for `required[i]`.
pub type Mask = u32;

/// Hard capacity of the exact solvers: the number of required waypoints must fit in a [Mask].
pub const MAX_REQUIRED: usize = Mask::BITS as usize;

/// Sequence of orthogonally adjacent cells from a start to an end.
pub type Path = Vec<Coord>;

/// A grid cell identified by row and column. Serialized as a `[row, col]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    /// The four orthogonal neighbours in expansion order: up, down, left, right. Searches rely on
    /// this order for deterministic tie-breaking.
    pub fn neumann_neighborhood(&self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row, self.col + 1),
        ]
    }

    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Whether the coordinate lies on an `n` by `n` grid.
    pub fn in_bounds(&self, n: usize) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as usize) < n && (self.col as usize) < n
    }
}

impl From<[i32; 2]> for Coord {
    fn from([row, col]: [i32; 2]) -> Coord {
        Coord::new(row, col)
    }
}

impl From<Coord> for [i32; 2] {
    fn from(c: Coord) -> [i32; 2] {
        [c.row, c.col]
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Number of steps taken along a path; a single-cell path costs nothing.
pub fn path_cost(path: &[Coord]) -> usize {
    path.len().saturating_sub(1)
}

/// Checks that consecutive cells differ by exactly one unit along exactly one axis.
pub fn is_orthogonal_walk(path: &[Coord]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}

/// Checks whether any cell occurs more than once.
pub fn has_repeated_cells(path: &[Coord]) -> bool {
    let mut seen = FxHashSet::default();
    !path.iter().all(|c| seen.insert(*c))
}
