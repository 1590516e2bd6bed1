use thiserror::Error;

use crate::Coord;

/// Errors returned by [RoutingEngine::route](crate::RoutingEngine::route). Each one is terminal
/// for the given configuration: no partial path is ever produced alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Start or end has not been placed.
    #[error("start or end is not set")]
    MissingEndpoint,
    /// No path exists from the start to this required point or to the end.
    #[error("{0} cannot be reached from the start")]
    Unreachable(Coord),
    /// The order solver found no finite-cost tour through all required points.
    #[error("no complete route through all required points exists")]
    NoCompleteRoute,
    /// The search between the points at positions `i` and `i + 1` of the visiting sequence failed.
    #[error("segment {0} of the visiting sequence could not be routed")]
    SegmentUnreachable(usize),
    /// The state-space search exhausted its frontier without reaching the goal.
    #[error("no route satisfies the constraints")]
    NoRoute,
    /// A snapshot could not be imported.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("{0} lies outside the grid")]
    OutOfBounds(Coord),
    /// Start, end or a required point sits on a blocked cell.
    #[error("{0} is blocked")]
    BlockedWaypoint(Coord),
    /// The required points do not fit in the waypoint bitmask.
    #[error("{count} required points exceed the capacity of {max}")]
    TooManyRequired { count: usize, max: usize },
}
