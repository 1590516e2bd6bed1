use log::debug;

use super::bfs::shortest_path;
use crate::pathing_grid::PathingGrid;
use crate::{path_cost, Coord, Path};

/// Square matrix of hop counts, [None] meaning unreachable.
pub trait DistanceMatrix {
    fn len(&self) -> usize;
    fn distance(&self, i: usize, j: usize) -> Option<usize>;
}

impl DistanceMatrix for Vec<Vec<Option<usize>>> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn distance(&self, i: usize, j: usize) -> Option<usize> {
        self[i][j]
    }
}

/// Shortest distances and paths between every ordered pair of marker points. Points are indexed
/// with the start at 0, the required points at `1..=R` and the end at `R + 1`.
#[derive(Clone, Debug)]
pub struct DistanceTable {
    points: Vec<Coord>,
    paths: Vec<Option<Path>>,
}

impl DistanceTable {
    /// Runs one breadth-first search per ordered pair of distinct indices.
    pub fn new(grid: &PathingGrid, points: Vec<Coord>) -> DistanceTable {
        let k = points.len();
        let mut paths = Vec::with_capacity(k * k);
        for i in 0..k {
            for j in 0..k {
                paths.push(if i == j {
                    Some(vec![points[i]])
                } else {
                    shortest_path(grid, points[i], points[j], None)
                });
            }
        }
        debug!("Built distance table over {} points", k);
        DistanceTable { points, paths }
    }

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn path(&self, i: usize, j: usize) -> Option<&Path> {
        self.paths[i * self.points.len() + j].as_ref()
    }
}

impl DistanceMatrix for DistanceTable {
    fn len(&self) -> usize {
        self.points.len()
    }
    fn distance(&self, i: usize, j: usize) -> Option<usize> {
        self.path(i, j).map(|p| path_cost(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_holds_pairwise_distances() {
        //  S # .
        //  . # R
        //  E . .
        let wall = [Coord::new(0, 1), Coord::new(1, 1)];
        let grid = PathingGrid::new(3, &wall);
        let points = vec![Coord::new(0, 0), Coord::new(1, 2), Coord::new(2, 0)];
        let table = DistanceTable::new(&grid, points.clone());
        assert_eq!(table.len(), 3);
        assert_eq!(table.points(), points.as_slice());
        for i in 0..3 {
            assert_eq!(table.distance(i, i), Some(0));
            assert_eq!(table.path(i, i), Some(&vec![points[i]]));
        }
        assert_eq!(table.distance(0, 1), Some(5));
        assert_eq!(table.distance(1, 0), Some(5));
        assert_eq!(table.distance(0, 2), Some(2));
        assert_eq!(table.distance(1, 2), Some(3));
        let path = table.path(0, 1).unwrap();
        assert_eq!(path.first(), Some(&points[0]));
        assert_eq!(path.last(), Some(&points[1]));
    }

    #[test]
    fn unreachable_pairs_are_none() {
        let wall = [Coord::new(0, 1), Coord::new(1, 1)];
        let grid = PathingGrid::new(2, &wall);
        let table = DistanceTable::new(&grid, vec![Coord::new(0, 0), Coord::new(1, 0)]);
        assert_eq!(table.distance(0, 1), Some(1));

        let wall = [Coord::new(0, 1), Coord::new(1, 0)];
        let grid = PathingGrid::new(2, &wall);
        let table = DistanceTable::new(&grid, vec![Coord::new(0, 0), Coord::new(1, 1)]);
        assert_eq!(table.distance(0, 1), None);
        assert!(table.path(1, 0).is_none());
    }
}
