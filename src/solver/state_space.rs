use fxhash::FxHashMap;
use log::{info, warn};
use smallvec::SmallVec;

use super::{RouteSolver, Waypoints};
use crate::pathing_grid::PathingGrid;
use crate::search_context::SearchContext;
use crate::{Coord, Mask, Path, RevisitPolicy, RouteError};

/// Bitset over the cells of the grid, indexed row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellSet(SmallVec<[u64; 4]>);

impl CellSet {
    pub fn contains(&self, ix: usize) -> bool {
        self.0
            .get(ix / 64)
            .map_or(false, |word| *word & (1u64 << (ix % 64)) != 0)
    }

    pub fn insert(&mut self, ix: usize) {
        let word = ix / 64;
        if self.0.len() <= word {
            self.0.resize(word + 1, 0);
        }
        self.0[word] |= 1u64 << (ix % 64);
    }
}

/// A node of the expanded search graph. `visited` stays empty when revisits are allowed, so
/// that states differing only in their history collapse into one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub pos: Coord,
    pub mask: Mask,
    pub visited: CellSet,
}

/// Mask with the lowest `r` bits set.
pub fn full_mask(r: usize) -> Mask {
    if r == 0 {
        0
    } else {
        Mask::MAX >> (Mask::BITS as usize - r)
    }
}

/// Finds a globally shortest walk by searching (position, visited waypoints) states, plus the
/// set of visited cells when revisits are forbidden, with unit step costs. The waypoint order
/// falls out of the search instead of being fixed beforehand, and the end can only be entered
/// once every required point has been stepped on.
///
/// With revisits allowed there are at most `n^2 * 2^R` states. Without, every distinct history
/// is its own state and the search space grows exponentially with the path length, so this is
/// only suited to small grids.
///
/// Because the end is never a transit cell, this search can be longer than, or fail where,
/// stitched shortest paths succeed by passing over the end, which is why the engine only uses
/// it when revisits are forbidden.
#[derive(Clone, Debug)]
pub struct StateSpaceSolver {
    pub revisit: RevisitPolicy,
}

impl StateSpaceSolver {
    pub fn new(revisit: RevisitPolicy) -> StateSpaceSolver {
        StateSpaceSolver { revisit }
    }

    fn successors(
        &self,
        grid: &PathingGrid,
        bits: &FxHashMap<Coord, Mask>,
        end: Coord,
        full: Mask,
        state: &SearchState,
    ) -> SmallVec<[(SearchState, usize); 4]> {
        let forbid_revisits = self.revisit == RevisitPolicy::Forbidden;
        grid.neighborhood_points(&state.pos)
            .into_iter()
            .filter_map(|pos| {
                let ix = grid.get_ix(&pos);
                if forbid_revisits && state.visited.contains(ix) {
                    return None;
                }
                let mask = state.mask | bits.get(&pos).copied().unwrap_or(0);
                if pos == end && mask != full {
                    return None;
                }
                let mut visited = state.visited.clone();
                if forbid_revisits {
                    visited.insert(ix);
                }
                Some((SearchState { pos, mask, visited }, 1))
            })
            .collect()
    }
}

impl RouteSolver for StateSpaceSolver {
    fn name(&self) -> &'static str {
        "global state search"
    }

    fn solve(&self, grid: &PathingGrid, waypoints: &Waypoints) -> Result<Path, RouteError> {
        let mut bits: FxHashMap<Coord, Mask> = FxHashMap::default();
        for (i, c) in waypoints.required.iter().enumerate() {
            *bits.entry(*c).or_insert(0) |= 1 << i;
        }
        let full = full_mask(waypoints.required.len());
        let end = waypoints.end;

        let mut visited = CellSet::default();
        if self.revisit == RevisitPolicy::Forbidden {
            visited.insert(grid.get_ix(&waypoints.start));
        }
        let start = SearchState {
            pos: waypoints.start,
            mask: bits.get(&waypoints.start).copied().unwrap_or(0),
            visited,
        };

        let mut ct: SearchContext<SearchState, usize> = SearchContext::new();
        let result = ct.uniform_cost(
            &start,
            |state| self.successors(grid, &bits, end, full, state),
            |state| state.pos == end && state.mask == full,
        );
        info!("State search reached {} distinct states", ct.parents.len());
        match result {
            Some((states, _)) => Ok(states.into_iter().map(|s| s.pos).collect()),
            None => {
                warn!("State search exhausted without reaching {}", end);
                Err(RouteError::NoRoute)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{has_repeated_cells, path_cost};

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn waypoints(start: Coord, required: Vec<Coord>, end: Coord) -> Waypoints {
        Waypoints {
            start,
            required,
            end,
        }
    }

    #[test]
    fn cell_set_grows_on_demand() {
        let mut set = CellSet::default();
        assert!(!set.contains(200));
        set.insert(200);
        set.insert(3);
        assert!(set.contains(200));
        assert!(set.contains(3));
        assert!(!set.contains(199));
    }

    #[test]
    fn full_mask_covers_the_capacity() {
        assert_eq!(full_mask(0), 0);
        assert_eq!(full_mask(3), 0b111);
        assert_eq!(full_mask(Mask::BITS as usize), Mask::MAX);
    }

    #[test]
    fn picks_the_cheaper_waypoint_order() {
        // Visiting (0, 4) first and (0, 1) last would double back along the top row
        let grid = PathingGrid::new(5, &[]);
        let plan = waypoints(c(0, 0), vec![c(0, 4), c(0, 1)], c(4, 4));
        for revisit in [RevisitPolicy::Allowed, RevisitPolicy::Forbidden] {
            let path = StateSpaceSolver::new(revisit).solve(&grid, &plan).unwrap();
            assert_eq!(path_cost(&path), 8);
            let first_r1 = path.iter().position(|p| *p == c(0, 1)).unwrap();
            let first_r0 = path.iter().position(|p| *p == c(0, 4)).unwrap();
            assert!(first_r1 < first_r0);
        }
    }

    #[test]
    fn end_is_not_a_transit_cell() {
        // The only way to the required point passes the end: S E R
        let grid = PathingGrid::new(3, &[c(1, 0), c(1, 1), c(1, 2), c(2, 0), c(2, 1), c(2, 2)]);
        let plan = waypoints(c(0, 0), vec![c(0, 2)], c(0, 1));
        let solver = StateSpaceSolver::new(RevisitPolicy::Allowed);
        assert_eq!(solver.solve(&grid, &plan), Err(RouteError::NoRoute));
    }

    #[test]
    fn start_on_end_with_nothing_required() {
        let grid = PathingGrid::new(2, &[]);
        let plan = waypoints(c(1, 1), vec![], c(1, 1));
        for revisit in [RevisitPolicy::Allowed, RevisitPolicy::Forbidden] {
            let path = StateSpaceSolver::new(revisit).solve(&grid, &plan).unwrap();
            assert_eq!(path, vec![c(1, 1)]);
        }
    }

    #[test]
    fn round_trip_needs_revisits() {
        // Start and end coincide, so returning to it repeats a cell
        let grid = PathingGrid::new(3, &[]);
        let plan = waypoints(c(0, 0), vec![c(0, 2)], c(0, 0));
        let allowed = StateSpaceSolver::new(RevisitPolicy::Allowed)
            .solve(&grid, &plan)
            .unwrap();
        assert_eq!(path_cost(&allowed), 4);
        assert_eq!(
            StateSpaceSolver::new(RevisitPolicy::Forbidden).solve(&grid, &plan),
            Err(RouteError::NoRoute)
        );
    }

    #[test]
    fn forbidden_revisits_take_the_long_way() {
        // R is a dead end when entered from above, so a simple route has to leave it downwards
        //  S . . . E
        //  # # R # .
        //  . . . . .
        let blocked = [c(1, 0), c(1, 1), c(1, 3), c(3, 0), c(3, 1), c(3, 2), c(3, 3), c(3, 4)];
        let grid = PathingGrid::new(5, &blocked);
        let plan = waypoints(c(0, 0), vec![c(1, 2)], c(0, 4));
        let allowed = StateSpaceSolver::new(RevisitPolicy::Allowed)
            .solve(&grid, &plan)
            .unwrap();
        assert_eq!(path_cost(&allowed), 6);
        let simple = StateSpaceSolver::new(RevisitPolicy::Forbidden)
            .solve(&grid, &plan)
            .unwrap();
        assert!(!has_repeated_cells(&simple));
        assert!(grid.is_valid_path(&simple));
        assert_eq!(path_cost(&simple), 8);
        assert!(simple.contains(&c(1, 2)));
    }
}
