use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{Coord, RouteError, MAX_REQUIRED};

pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Whether the required points are visited in the given order or in the cheapest one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrderPolicy {
    #[default]
    AsSpecified,
    Optimize,
}

/// Whether a route may step on the same cell more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevisitPolicy {
    #[default]
    Allowed,
    Forbidden,
}

/// Immutable input to a single routing call: an `n` by `n` grid, its blocked cells, the markers
/// and the two policies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub n: usize,
    pub blocked: FxIndexSet<Coord>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    /// Ordering is only meaningful under [OrderPolicy::AsSpecified].
    pub required: Vec<Coord>,
    pub order: OrderPolicy,
    pub revisit: RevisitPolicy,
}

impl GridConfig {
    pub fn new(n: usize, start: Coord, end: Coord) -> GridConfig {
        GridConfig {
            n,
            blocked: FxIndexSet::default(),
            start: Some(start),
            end: Some(end),
            required: Vec::new(),
            order: OrderPolicy::default(),
            revisit: RevisitPolicy::default(),
        }
    }

    pub fn with_blocked<I: IntoIterator<Item = Coord>>(mut self, blocked: I) -> GridConfig {
        self.blocked.extend(blocked);
        self
    }

    pub fn with_required(mut self, required: Vec<Coord>) -> GridConfig {
        self.required = required;
        self
    }

    pub fn with_policies(mut self, order: OrderPolicy, revisit: RevisitPolicy) -> GridConfig {
        self.order = order;
        self.revisit = revisit;
        self
    }

    /// Checks the preconditions of a routing call and returns the start and end.
    pub fn validate(&self) -> Result<(Coord, Coord), RouteError> {
        if self.n == 0 {
            return Err(RouteError::EmptyGrid);
        }
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(RouteError::MissingEndpoint),
        };
        let markers = || [start, end].into_iter().chain(self.required.iter().copied());
        if let Some(c) = markers()
            .chain(self.blocked.iter().copied())
            .find(|c| !c.in_bounds(self.n))
        {
            return Err(RouteError::OutOfBounds(c));
        }
        if let Some(c) = markers().find(|c| self.blocked.contains(c)) {
            return Err(RouteError::BlockedWaypoint(c));
        }
        if self.required.len() > MAX_REQUIRED {
            return Err(RouteError::TooManyRequired {
                count: self.required.len(),
                max: MAX_REQUIRED,
            });
        }
        Ok((start, end))
    }

    /// Builds a configuration from an imported snapshot. Policies are not part of a snapshot.
    pub fn from_snapshot(
        snapshot: Snapshot,
        order: OrderPolicy,
        revisit: RevisitPolicy,
    ) -> Result<GridConfig, RouteError> {
        snapshot.check()?;
        Ok(GridConfig {
            n: snapshot.n,
            blocked: snapshot.blocked.into_iter().collect(),
            start: snapshot.start,
            end: snapshot.end,
            required: snapshot.required,
            order,
            revisit,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            n: self.n,
            start: self.start,
            end: self.end,
            blocked: self.blocked.iter().copied().collect(),
            required: self.required.clone(),
        }
    }
}

/// Flat export format exchanged with the editor, e.g.
/// `{"n": 5, "start": [0, 0], "end": [4, 4], "blocked": [[1, 1]], "required": []}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub n: usize,
    #[serde(default)]
    pub start: Option<Coord>,
    #[serde(default)]
    pub end: Option<Coord>,
    #[serde(default)]
    pub blocked: Vec<Coord>,
    #[serde(default)]
    pub required: Vec<Coord>,
}

impl Snapshot {
    /// Parses and checks a snapshot. Anything malformed is rejected as a whole.
    pub fn from_json(json: &str) -> Result<Snapshot, RouteError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| RouteError::InvalidInput(e.to_string()))?;
        snapshot.check()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn check(&self) -> Result<(), RouteError> {
        let invalid = |reason: String| Err(RouteError::InvalidInput(reason));
        if self.n == 0 {
            return invalid("grid size must be positive".to_owned());
        }
        let markers = self
            .start
            .iter()
            .chain(self.end.iter())
            .chain(self.required.iter());
        if let Some(c) = markers
            .clone()
            .chain(self.blocked.iter())
            .find(|c| !c.in_bounds(self.n))
        {
            return invalid(format!("{} lies outside a {}x{} grid", c, self.n, self.n));
        }
        if let Some(c) = markers.clone().find(|c| self.blocked.contains(*c)) {
            return invalid(format!("marker {} is also blocked", c));
        }
        Ok(())
    }
}
