use fxhash::FxHashSet;
use log::debug;

use super::bfs::shortest_path;
use crate::pathing_grid::PathingGrid;
use crate::{Coord, Path, RevisitPolicy, RouteError};

/// Stitches consecutive point-to-point paths into one, dropping the duplicated junction cell at
/// the start of every segment after the first.
pub fn concatenate<S, I>(segments: I) -> Path
where
    S: AsRef<[Coord]>,
    I: IntoIterator<Item = S>,
{
    let mut path = Path::new();
    for segment in segments {
        let segment = segment.as_ref();
        let skip = usize::from(!path.is_empty());
        path.extend_from_slice(segment.get(skip..).unwrap_or_default());
    }
    path
}

/// Routes through `points` in the given order, one breadth-first search per consecutive pair.
///
/// Under [RevisitPolicy::Forbidden] each segment search additionally avoids every cell already
/// on the path and every point still to be visited later, so that no later target is crossed
/// early. This keeps the stitched path simple, but the segments are fixed greedily one after
/// the other: the result is not necessarily the shortest simple path through the points in this
/// order, and a segment can fail even though some simple route exists. Failing segments are
/// reported as [RouteError::SegmentUnreachable] with the index of their first point.
pub fn route_segments(
    grid: &PathingGrid,
    points: &[Coord],
    revisit: RevisitPolicy,
) -> Result<Path, RouteError> {
    let mut segments: Vec<Path> = points.first().map(|p| vec![vec![*p]]).unwrap_or_default();
    let mut committed: FxHashSet<Coord> = points.first().copied().into_iter().collect();
    for (i, pair) in points.windows(2).enumerate() {
        let (source, target) = (pair[0], pair[1]);
        let segment = match revisit {
            RevisitPolicy::Allowed => shortest_path(grid, source, target, None),
            RevisitPolicy::Forbidden => {
                if source != target && committed.contains(&target) {
                    debug!("Segment {} targets {} which is already on the path", i, target);
                    return Err(RouteError::SegmentUnreachable(i));
                }
                let mut forbidden = committed.clone();
                forbidden.extend(points[i + 2..].iter().copied());
                shortest_path(grid, source, target, Some(&forbidden))
            }
        }
        .ok_or(RouteError::SegmentUnreachable(i))?;
        debug!(
            "Segment {} from {} to {} takes {} steps",
            i,
            source,
            target,
            segment.len() - 1
        );
        if revisit == RevisitPolicy::Forbidden {
            committed.extend(segment.iter().copied());
        }
        segments.push(segment);
    }
    Ok(concatenate(segments))
}
