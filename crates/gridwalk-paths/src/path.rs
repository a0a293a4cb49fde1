use gridwalk_core::{Grid, Point, Stepper};

use crate::PathOutcome;

/// Walk predecessors back from `end` to `start`, marking every cell in
/// between as Path with one step each.
///
/// Start and end keep their roles. The walk honours cancellation and is
/// bounded by the grid size, so a corrupted predecessor chain cannot spin.
pub(crate) fn trace_path(
    grid: &mut Grid,
    start: Point,
    end: Point,
    steps: &mut Stepper<'_>,
) -> PathOutcome {
    let mut moves = 0usize;
    let mut cur = end;
    while cur != start {
        if steps.cancelled() {
            return PathOutcome::Cancelled;
        }
        let Some(prev) = grid[cur].predecessor else {
            break;
        };
        moves += 1;
        if moves > grid.len() {
            break;
        }
        if prev != start {
            grid[prev].make_path();
            steps.emit(grid);
        }
        cur = prev;
    }
    PathOutcome::Found { length: moves }
}

/// Collect the start→end route recorded by the last successful search,
/// both endpoints included.
///
/// Returns `None` if `end` has no predecessor chain leading to `start`.
pub fn reconstruct(grid: &Grid, start: Point, end: Point) -> Option<Vec<Point>> {
    if !grid.contains(start) || !grid.contains(end) {
        return None;
    }
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        cur = grid[cur].predecessor?;
        path.push(cur);
        if path.len() > grid.len() {
            return None;
        }
    }
    path.reverse();
    Some(path)
}
