use log::info;

use crate::pathing_grid::PathingGrid;
use crate::solver::state_space::StateSpaceSolver;
use crate::solver::{HeldKarpSolver, RouteSolver, SequentialSolver, Waypoints};
use crate::{GridConfig, OrderPolicy, Path, RevisitPolicy, RouteError};

/// How an optimized route without revisits is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoRevisitStrategy {
    /// Search the expanded state space, which yields the shortest simple path.
    #[default]
    GlobalSearch,
    /// Fix the order with Held-Karp on unconstrained distances, then route the segments while
    /// avoiding earlier cells. Cheaper, but neither optimal nor complete.
    OrderThenSegments,
}

/// Picks and runs a [RouteSolver] for the policies of a [GridConfig]:
///
/// | order | revisits | solver |
/// |---|---|---|
/// | as specified | either | [SequentialSolver] |
/// | optimize | allowed | [HeldKarpSolver] |
/// | optimize | forbidden | [StateSpaceSolver], or [HeldKarpSolver] with [NoRevisitStrategy::OrderThenSegments] |
#[derive(Clone, Debug, Default)]
pub struct RoutingEngine {
    pub no_revisit_strategy: NoRevisitStrategy,
}

impl RoutingEngine {
    pub fn new(no_revisit_strategy: NoRevisitStrategy) -> RoutingEngine {
        RoutingEngine {
            no_revisit_strategy,
        }
    }

    fn solver(&self, order: OrderPolicy, revisit: RevisitPolicy) -> Box<dyn RouteSolver> {
        match (order, revisit) {
            (OrderPolicy::AsSpecified, revisit) => Box::new(SequentialSolver { revisit }),
            (OrderPolicy::Optimize, RevisitPolicy::Allowed) => Box::new(HeldKarpSolver { revisit }),
            (OrderPolicy::Optimize, RevisitPolicy::Forbidden) => match self.no_revisit_strategy {
                NoRevisitStrategy::GlobalSearch => Box::new(StateSpaceSolver::new(revisit)),
                NoRevisitStrategy::OrderThenSegments => Box::new(HeldKarpSolver { revisit }),
            },
        }
    }

    /// Computes a path from start to end through every required point, or the first reason
    /// none can be produced. Configuration problems are reported before any search runs.
    pub fn route(&self, config: &GridConfig) -> Result<Path, RouteError> {
        let (start, end) = config.validate()?;
        let grid = PathingGrid::from_config(config);
        let waypoints = Waypoints {
            start,
            required: config.required.clone(),
            end,
        };
        waypoints.check_reachable(&grid)?;

        let solver = self.solver(config.order, config.revisit);
        info!(
            "Routing {} to {} through {} required points using {}",
            start,
            end,
            waypoints.required.len(),
            solver.name()
        );
        let path = solver.solve(&grid, &waypoints)?;
        debug_assert!(grid.is_valid_path(&path));
        info!("Found a route of {} steps", path.len().saturating_sub(1));
        Ok(path)
    }
}

/// Routes a configuration with the default [RoutingEngine].
pub fn route(config: &GridConfig) -> Result<Path, RouteError> {
    RoutingEngine::default().route(config)
}
