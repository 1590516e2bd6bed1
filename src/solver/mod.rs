use crate::pathing_grid::PathingGrid;
use crate::{Coord, Path, RevisitPolicy, RouteError};

pub mod bfs;
pub mod distance_table;
pub mod held_karp;
pub mod segments;
pub mod state_space;

use distance_table::DistanceTable;
use held_karp::order_waypoints;
use segments::{concatenate, route_segments};

/// The markers of a routing problem once the configuration has been validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Waypoints {
    pub start: Coord,
    pub required: Vec<Coord>,
    pub end: Coord,
}

impl Waypoints {
    /// Start, required points and end in visiting order, as indexed by a [DistanceTable].
    pub fn points(&self) -> Vec<Coord> {
        let mut points = Vec::with_capacity(self.required.len() + 2);
        points.push(self.start);
        points.extend_from_slice(&self.required);
        points.push(self.end);
        points
    }

    /// Reports the first required point, then the end, lying on a different connected component
    /// than the start.
    pub fn check_reachable(&self, grid: &PathingGrid) -> Result<(), RouteError> {
        match self
            .required
            .iter()
            .chain(std::iter::once(&self.end))
            .find(|p| grid.unreachable(&self.start, p))
        {
            Some(p) => Err(RouteError::Unreachable(*p)),
            None => Ok(()),
        }
    }
}

/// A strategy producing a complete path through all [Waypoints], or the reason none was found.
pub trait RouteSolver {
    fn name(&self) -> &'static str;
    fn solve(&self, grid: &PathingGrid, waypoints: &Waypoints) -> Result<Path, RouteError>;
}

/// Visits the required points in the given order.
#[derive(Clone, Debug)]
pub struct SequentialSolver {
    pub revisit: RevisitPolicy,
}

impl RouteSolver for SequentialSolver {
    fn name(&self) -> &'static str {
        "sequential segments"
    }

    fn solve(&self, grid: &PathingGrid, waypoints: &Waypoints) -> Result<Path, RouteError> {
        route_segments(grid, &waypoints.points(), self.revisit)
    }
}

/// Chooses the visiting order with [Held-Karp](held_karp::held_karp) over unconstrained
/// shortest distances. With revisits allowed the table paths are stitched directly; otherwise
/// the chosen order is re-routed segment by segment while avoiding earlier cells, inheriting the
/// limitations described on [route_segments].
#[derive(Clone, Debug)]
pub struct HeldKarpSolver {
    pub revisit: RevisitPolicy,
}

impl RouteSolver for HeldKarpSolver {
    fn name(&self) -> &'static str {
        match self.revisit {
            RevisitPolicy::Allowed => "optimal order",
            RevisitPolicy::Forbidden => "optimal order with simple segments",
        }
    }

    fn solve(&self, grid: &PathingGrid, waypoints: &Waypoints) -> Result<Path, RouteError> {
        let table = DistanceTable::new(grid, waypoints.points());
        let tour = order_waypoints(&table)?;
        match self.revisit {
            RevisitPolicy::Allowed => {
                let segments = tour
                    .order
                    .windows(2)
                    .map(|w| table.path(w[0], w[1]))
                    .collect::<Option<Vec<_>>>()
                    .ok_or(RouteError::NoCompleteRoute)?;
                Ok(concatenate(segments))
            }
            RevisitPolicy::Forbidden => {
                let points = tour
                    .order
                    .iter()
                    .map(|&i| table.points()[i])
                    .collect::<Vec<_>>();
                route_segments(grid, &points, RevisitPolicy::Forbidden)
            }
        }
    }
}
