//! Exact waypoint ordering with the
//! [Held-Karp](https://en.wikipedia.org/wiki/Held%E2%80%93Karp_algorithm) dynamic program. The
//! table has `2^R * R` entries for `R` required points, which keeps it practical only while `R`
//! stays in the low teens. Orders over more than [MAX_ORDERED_REQUIRED] points are refused
//! rather than attempted.
use log::{info, warn};

use super::distance_table::{DistanceMatrix, DistanceTable};
use crate::search_context::NO_PARENT;
use crate::RouteError;

/// Largest number of required points [held_karp] accepts. Far below
/// [MAX_REQUIRED](crate::MAX_REQUIRED), which only bounds the waypoint bitmask: at this size the
/// tables already hold about a million entries each.
pub const MAX_ORDERED_REQUIRED: usize = 16;

/// Visiting order over matrix indices, from 0 (start) to `len - 1` (end), and its total length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    pub order: Vec<usize>,
    pub cost: usize,
}

/// Finds the cheapest order in which to visit indices `1..len - 1` on the way from index 0 to
/// index `len - 1`. Returns [None] if no ordering has finite cost, or if there are more than
/// [MAX_ORDERED_REQUIRED] points in between. Among equally cheap orders the one found first in
/// ascending index order wins.
pub fn held_karp<M: DistanceMatrix + ?Sized>(matrix: &M) -> Option<Tour> {
    let k = matrix.len();
    if k < 2 {
        return None;
    }
    let end = k - 1;
    let r = k - 2;
    if r > MAX_ORDERED_REQUIRED {
        return None;
    }
    if r == 0 {
        return matrix.distance(0, end).map(|cost| Tour {
            order: vec![0, end],
            cost,
        });
    }
    // Waypoint i of the DP corresponds to matrix index i + 1
    let size = 1usize << r;
    let ix = |mask: usize, i: usize| mask * r + i;
    let mut dp: Vec<Option<usize>> = vec![None; size * r];
    let mut parent: Vec<usize> = vec![NO_PARENT; size * r];
    for i in 0..r {
        dp[ix(1 << i, i)] = matrix.distance(0, i + 1);
    }
    for mask in 1..size {
        for i in (0..r).filter(|&i| mask & (1 << i) != 0) {
            let Some(c) = dp[ix(mask, i)] else {
                continue;
            };
            for j in (0..r).filter(|&j| mask & (1 << j) == 0) {
                let Some(d) = matrix.distance(i + 1, j + 1) else {
                    continue;
                };
                let next = ix(mask | 1 << j, j);
                if dp[next].map_or(true, |current| c + d < current) {
                    dp[next] = Some(c + d);
                    parent[next] = i;
                }
            }
        }
    }

    let full = size - 1;
    let mut best: Option<(usize, usize)> = None;
    for i in 0..r {
        if let (Some(c), Some(d)) = (dp[ix(full, i)], matrix.distance(i + 1, end)) {
            if best.map_or(true, |(_, b)| c + d < b) {
                best = Some((i, c + d));
            }
        }
    }
    let (last, cost) = best?;

    let mut order = vec![end];
    let mut mask = full;
    let mut i = last;
    loop {
        order.push(i + 1);
        let p = parent[ix(mask, i)];
        mask ^= 1 << i;
        if p == NO_PARENT {
            break;
        }
        i = p;
    }
    order.push(0);
    order.reverse();
    Some(Tour { order, cost })
}

/// Orders the required points of a [DistanceTable] built over start, required points and end.
/// Fails with [RouteError::Unreachable] naming the first required point, or the end, that
/// cannot be reached from the start, with [RouteError::NoCompleteRoute] if no finite tour
/// exists, and with [RouteError::TooManyRequired] beyond [MAX_ORDERED_REQUIRED] points.
pub fn order_waypoints(table: &DistanceTable) -> Result<Tour, RouteError> {
    let points = table.points();
    let count = points.len().saturating_sub(2);
    if count > MAX_ORDERED_REQUIRED {
        warn!("Refusing to order {} required points", count);
        return Err(RouteError::TooManyRequired {
            count,
            max: MAX_ORDERED_REQUIRED,
        });
    }
    if let Some(j) = (1..points.len()).find(|&j| table.distance(0, j).is_none()) {
        return Err(RouteError::Unreachable(points[j]));
    }
    let tour = held_karp(table).ok_or(RouteError::NoCompleteRoute)?;
    info!(
        "Optimal order over {} required points has length {}",
        count, tour.cost
    );
    Ok(tour)
}
