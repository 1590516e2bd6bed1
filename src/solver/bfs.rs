use fxhash::FxHashSet;
use indexmap::map::Entry::Vacant;
use std::collections::VecDeque;

use crate::pathing_grid::PathingGrid;
use crate::search_context::{reverse_path, FxIndexMap, NO_PARENT};
use crate::{Coord, Path};

/// Computes a shortest path from `source` to `target` with a breadth-first search. Cells in
/// `forbidden` are treated as blocked, except for `source` and `target` themselves. Neighbours
/// are expanded up, down, left, right, so equal-length alternatives are resolved the same way on
/// every call. Returns [None] if `target` cannot be reached.
pub fn shortest_path(
    grid: &PathingGrid,
    source: Coord,
    target: Coord,
    forbidden: Option<&FxHashSet<Coord>>,
) -> Option<Path> {
    if source == target {
        return Some(vec![source]);
    }
    if !grid.can_move_to(&target) {
        return None;
    }
    let passable = |c: &Coord| *c == target || forbidden.map_or(true, |f| !f.contains(c));
    // Maps every seen cell to the index of the cell it was first reached from
    let mut parents: FxIndexMap<Coord, usize> = FxIndexMap::default();
    parents.insert(source, NO_PARENT);
    let mut queue = VecDeque::from([0usize]);
    while let Some(index) = queue.pop_front() {
        let Some((&node, _)) = parents.get_index(index) else {
            continue;
        };
        for n in grid.neighborhood_points(&node) {
            if !passable(&n) {
                continue;
            }
            if let Vacant(e) = parents.entry(n) {
                let n_index = e.index();
                e.insert(index);
                if n == target {
                    return Some(reverse_path(&parents, |&p| p, n_index));
                }
                queue.push_back(n_index);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_cost;

    /// Asserts that the case in which source and target are equal is handled correctly.
    #[test]
    fn equal_source_target() {
        let pathing_grid = PathingGrid::new(1, &[]);
        let start = Coord::new(0, 0);
        let path = shortest_path(&pathing_grid, start, start, None).unwrap();
        assert_eq!(path, vec![start]);
    }

    /// Asserts that the optimal 4 step solution is found around a central obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  E|
        let pathing_grid = PathingGrid::new(3, &[Coord::new(1, 1)]);
        let path =
            shortest_path(&pathing_grid, Coord::new(0, 0), Coord::new(2, 2), None).unwrap();
        assert_eq!(path_cost(&path), 4);
        assert!(pathing_grid.is_valid_path(&path));
        // Down before right
        assert_eq!(
            path,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(2, 1),
                Coord::new(2, 2)
            ]
        );
    }

    #[test]
    fn forbidden_cells_force_a_detour() {
        let pathing_grid = PathingGrid::new(3, &[]);
        let forbidden: FxHashSet<Coord> = [Coord::new(0, 1)].into_iter().collect();
        let path = shortest_path(
            &pathing_grid,
            Coord::new(0, 0),
            Coord::new(0, 2),
            Some(&forbidden),
        )
        .unwrap();
        assert_eq!(path_cost(&path), 4);
        assert!(!path.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn endpoints_are_exempt_from_forbidding() {
        let pathing_grid = PathingGrid::new(2, &[]);
        let source = Coord::new(0, 0);
        let target = Coord::new(0, 1);
        let forbidden: FxHashSet<Coord> = [source, target].into_iter().collect();
        let path = shortest_path(&pathing_grid, source, target, Some(&forbidden)).unwrap();
        assert_eq!(path, vec![source, target]);
    }

    #[test]
    fn walled_off_target_is_unreachable() {
        let wall = [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)];
        let pathing_grid = PathingGrid::new(3, &wall);
        assert!(shortest_path(&pathing_grid, Coord::new(0, 0), Coord::new(0, 2), None).is_none());
        assert!(shortest_path(&pathing_grid, Coord::new(0, 0), Coord::new(1, 1), None).is_none());
    }
}
