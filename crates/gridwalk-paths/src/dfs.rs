use gridwalk_core::{Grid, Point, Stepper};

use crate::PathOutcome;
use crate::path::trace_path;

/// Stepwise depth-first search from `start` to `end`.
///
/// Uses an explicit stack. Each iteration pops the top cell and, if it still
/// has an undiscovered neighbour, pushes it back together with that one
/// neighbour; neighbours are taken in the order `refresh_neighbors`
/// produced. Cells sit in Frontier while on the stack and turn Visited once
/// exhausted. The search succeeds the moment `end` is discovered.
///
/// The path found is whatever the traversal stumbled on; it is not
/// guaranteed to be shortest.
pub fn dfs(grid: &mut Grid, start: Point, end: Point, steps: &mut Stepper<'_>) -> PathOutcome {
    // Per-cell position in its neighbour list.
    let mut cursor = vec![0usize; grid.len()];
    let mut stack = vec![start];
    grid[start].visited = true;

    loop {
        if steps.cancelled() {
            return PathOutcome::Cancelled;
        }
        let Some(current) = stack.pop() else {
            return PathOutcome::NoPath;
        };
        let Some(ci) = grid.idx(current) else {
            continue;
        };

        let next = loop {
            let Some(&np) = grid[current].neighbors().get(cursor[ci]) else {
                break None;
            };
            cursor[ci] += 1;
            if !grid[np].visited {
                break Some(np);
            }
        };

        match next {
            Some(np) => {
                stack.push(current);
                let n = &mut grid[np];
                n.visited = true;
                n.predecessor = Some(current);
                if np == end {
                    return trace_path(grid, start, end, steps);
                }
                n.make_frontier();
                stack.push(np);
            }
            None => {
                if current != start {
                    grid[current].make_visited();
                }
            }
        }
        steps.emit(grid);
    }
}
