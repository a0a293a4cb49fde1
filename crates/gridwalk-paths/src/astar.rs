use gridwalk_core::{Grid, Point, Stepper};

use crate::PathOutcome;
use crate::distance::manhattan;
use crate::path::trace_path;
use crate::queue::StableQueue;

/// Stepwise A* from `start` to `end` using the Manhattan heuristic.
///
/// Expects fresh search state and up-to-date neighbour lists; use
/// [`PathAlgorithm::run`](crate::PathAlgorithm::run) to get both. One step is
/// emitted per expanded node and per path cell.
pub fn astar(grid: &mut Grid, start: Point, end: Point, steps: &mut Stepper<'_>) -> PathOutcome {
    let mut open = StableQueue::new();
    // Frontier-set membership, indexed by flat cell index.
    let mut in_open = vec![false; grid.len()];

    {
        let s = &mut grid[start];
        s.g_score = 0;
        s.h_score = manhattan(start, end);
    }
    open.push(start, grid[start].f_score());
    if let Some(si) = grid.idx(start) {
        in_open[si] = true;
    }

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);

    loop {
        if steps.cancelled() {
            return PathOutcome::Cancelled;
        }
        let Some(current) = open.pop() else {
            return PathOutcome::NoPath;
        };
        // Stale entry left behind by a later improvement.
        if grid[current].visited {
            continue;
        }
        if let Some(ci) = grid.idx(current) {
            in_open[ci] = false;
        }

        if current == end {
            return trace_path(grid, start, end, steps);
        }

        grid[current].visited = true;
        let tentative = grid[current].g_score + 1;

        nbuf.clear();
        nbuf.extend_from_slice(grid[current].neighbors());
        for &np in &nbuf {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            let n = &mut grid[np];
            if n.g_score <= tentative {
                continue;
            }
            n.g_score = tentative;
            n.h_score = manhattan(np, end);
            n.predecessor = Some(current);
            if !in_open[ni] {
                if np != end {
                    n.make_frontier();
                }
                in_open[ni] = true;
            }
            let f = n.f_score();
            open.push(np, f);
        }

        if current != start {
            grid[current].make_visited();
        }
        steps.emit(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::reconstruct;
    use gridwalk_core::{CellState, Context, Never, NoopSink};

    fn ready(rows: i32, cols: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(rows, cols, 1);
        g.set_start(start);
        g.set_end(end);
        g
    }

    fn search(g: &mut Grid) -> PathOutcome {
        g.refresh_neighbors();
        let (s, e) = (g.start().unwrap(), g.end().unwrap());
        let mut sink = NoopSink;
        let mut steps = Stepper::new(&mut sink, &Never);
        astar(g, s, e, &mut steps)
    }

    #[test]
    fn empty_grid_path_is_manhattan() {
        let mut g = ready(10, 10, Point::at(0, 0), Point::at(9, 9));
        assert_eq!(search(&mut g), PathOutcome::Found { length: 18 });
        assert_eq!(g.count(CellState::Path), 17);
        assert_eq!(g.count(CellState::Start), 1);
        assert_eq!(g.count(CellState::End), 1);

        let route = reconstruct(&g, Point::at(0, 0), Point::at(9, 9)).unwrap();
        assert_eq!(route.len(), 19);
        assert!(route.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn detours_around_a_wall() {
        // Column 2 blocked except the bottom row.
        let mut g = ready(5, 5, Point::at(0, 0), Point::at(0, 4));
        for r in 0..4 {
            g.toggle_barrier(Point::at(r, 2));
        }
        assert_eq!(search(&mut g), PathOutcome::Found { length: 12 });
        assert!(g[Point::at(4, 2)].state() == CellState::Path);
    }

    #[test]
    fn blocked_row_means_no_path() {
        let mut g = ready(3, 3, Point::at(0, 0), Point::at(2, 0));
        for c in 0..3 {
            g.toggle_barrier(Point::at(1, c));
        }
        assert_eq!(search(&mut g), PathOutcome::NoPath);
        assert_eq!(g.count(CellState::Path), 0);
        assert_eq!(g.count(CellState::Visited), 2);
    }

    #[test]
    fn end_is_never_frontier_and_start_keeps_role() {
        let mut g = ready(6, 6, Point::at(2, 2), Point::at(2, 4));
        let mut saw_end_frontier = false;
        let end = Point::at(2, 4);
        let mut sink = |g: &Grid| {
            if g[end].state() == CellState::Frontier {
                saw_end_frontier = true;
            }
        };
        g.refresh_neighbors();
        let mut steps = Stepper::new(&mut sink, &Never);
        let out = astar(&mut g, Point::at(2, 2), end, &mut steps);
        drop(steps);
        assert!(out.found());
        assert!(!saw_end_frontier);
        assert!(g[Point::at(2, 2)].is_start());
    }

    #[test]
    fn identical_runs_replay_identically() {
        let run = || {
            let mut g = ready(12, 9, Point::at(1, 1), Point::at(10, 7));
            for p in [Point::at(4, 0), Point::at(4, 1), Point::at(4, 2), Point::at(4, 3)] {
                g.toggle_barrier(p);
            }
            let mut frames = Vec::new();
            let mut sink = |g: &Grid| frames.push(g.iter().map(|c| c.state()).collect::<Vec<_>>());
            g.refresh_neighbors();
            let mut steps = Stepper::new(&mut sink, &Never);
            let out = astar(&mut g, Point::at(1, 1), Point::at(10, 7), &mut steps);
            drop(steps);
            (out, frames)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn cancellation_after_first_iteration() {
        let mut g = ready(50, 50, Point::at(0, 0), Point::at(49, 49));
        g.refresh_neighbors();
        let ctx = Context::new();
        let trigger = ctx.clone();
        let mut sink = move |_: &Grid| trigger.cancel();
        let mut steps = Stepper::new(&mut sink, &ctx);
        let out = astar(&mut g, Point::at(0, 0), Point::at(49, 49), &mut steps);
        assert_eq!(steps.count(), 1);
        drop(steps);

        assert_eq!(out, PathOutcome::Cancelled);
        assert!(!out.found());
        let touched = g.count(CellState::Frontier) + g.count(CellState::Visited);
        assert!(touched >= 1);
        assert!(touched < g.len() - 2);
    }
}
