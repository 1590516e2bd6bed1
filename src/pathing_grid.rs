use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{Coord, GridConfig, N_SMALLVEC_SIZE};

/// [PathingGrid] keeps the blocked cells of an `n` by `n` grid in a [BoolGrid] ([true] meaning
/// blocked) together with the 4-connected components of the free cells in a [UnionFind], which
/// answers reachability questions without flood-filling.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    n: usize,
}

/// [BoolGrid] is indexed by x (column) and y (row).
fn to_point(c: Coord) -> Point {
    Point::new(c.col, c.row)
}

impl PathingGrid {
    /// Creates an open `n` by `n` grid with the given cells blocked. Out-of-bounds cells are
    /// ignored.
    pub fn new<'a, I>(n: usize, blocked: I) -> PathingGrid
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(n, n, false),
            components: UnionFind::new(n * n),
            n,
        };
        for c in blocked {
            if c.in_bounds(n) {
                pathing_grid.grid.set_point(to_point(*c), true);
            }
        }
        pathing_grid.generate_components();
        pathing_grid
    }

    pub fn from_config(config: &GridConfig) -> PathingGrid {
        PathingGrid::new(config.n, &config.blocked)
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn in_bounds(&self, c: &Coord) -> bool {
        c.in_bounds(self.n)
    }

    pub fn is_blocked(&self, c: &Coord) -> bool {
        self.grid.get_point(to_point(*c))
    }

    pub fn can_move_to(&self, c: &Coord) -> bool {
        self.in_bounds(c) && !self.is_blocked(c)
    }

    /// Free orthogonal neighbours in up, down, left, right order.
    pub fn neighborhood_points(&self, c: &Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        c.neumann_neighborhood()
            .into_iter()
            .filter(|p| self.can_move_to(p))
            .collect()
    }

    /// Row-major index of an in-bounds cell.
    pub fn get_ix(&self, c: &Coord) -> usize {
        c.row as usize * self.n + c.col as usize
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, c: &Coord) -> usize {
        self.components.find(self.get_ix(c))
    }

    /// Checks if start and goal are free cells on the same component.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        self.can_move_to(start)
            && self.can_move_to(goal)
            && self
                .components
                .equiv(self.get_ix(start), self.get_ix(goal))
    }

    pub fn unreachable(&self, start: &Coord, goal: &Coord) -> bool {
        !self.reachable(start, goal)
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components of a {0}x{0} grid", self.n);
        self.components = UnionFind::new(self.n * self.n);
        for row in 0..self.n as i32 {
            for col in 0..self.n as i32 {
                let c = Coord::new(row, col);
                if !self.can_move_to(&c) {
                    continue;
                }
                let ix = self.get_ix(&c);
                // Down and right suffice, the other links are made from the neighbour
                for n in [Coord::new(row + 1, col), Coord::new(row, col + 1)] {
                    if self.can_move_to(&n) {
                        self.components.union(ix, self.get_ix(&n));
                    }
                }
            }
        }
    }

    /// Checks that a path stays on free cells and only takes orthogonal unit steps.
    pub fn is_valid_path(&self, path: &[Coord]) -> bool {
        path.iter().all(|c| self.can_move_to(c))
            && path
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.manhattan_distance(b) == 1)
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.n as i32 {
            let line = (0..self.n as i32)
                .map(|col| {
                    if self.is_blocked(&Coord::new(row, col)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
