use gridwalk_core::{Grid, Point, Stepper};

use crate::PathOutcome;
use crate::path::trace_path;
use crate::queue::StableQueue;

/// Stepwise Dijkstra search from `start` to `end`.
///
/// The same loop as [`astar`](crate::astar) keyed purely on
/// [`Cell::distance`](gridwalk_core::Cell::distance), so it expands in rings
/// around the start instead of leaning toward the end.
pub fn dijkstra(
    grid: &mut Grid,
    start: Point,
    end: Point,
    steps: &mut Stepper<'_>,
) -> PathOutcome {
    let mut open = StableQueue::new();
    let mut in_open = vec![false; grid.len()];

    grid[start].distance = 0;
    open.push(start, 0);
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
        let tentative = grid[current].distance + 1;

        nbuf.clear();
        nbuf.extend_from_slice(grid[current].neighbors());
        for &np in &nbuf {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            let n = &mut grid[np];
            if n.distance <= tentative {
                continue;
            }
            n.distance = tentative;
            n.predecessor = Some(current);
            if !in_open[ni] {
                if np != end {
                    n.make_frontier();
                }
                in_open[ni] = true;
            }
            open.push(np, tentative);
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
    use crate::astar;
    use gridwalk_core::{CellState, Context, Never, NoopSink};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn run(g: &mut Grid, f: fn(&mut Grid, Point, Point, &mut Stepper<'_>) -> PathOutcome) -> PathOutcome {
        g.clear_search();
        g.refresh_neighbors();
        let (s, e) = (g.start().unwrap(), g.end().unwrap());
        let mut sink = NoopSink;
        let mut steps = Stepper::new(&mut sink, &Never);
        f(g, s, e, &mut steps)
    }

    #[test]
    fn empty_grid_path_is_manhattan() {
        let mut g = Grid::new(10, 10, 1);
        g.set_start(Point::at(0, 0));
        g.set_end(Point::at(9, 9));
        assert_eq!(run(&mut g, dijkstra), PathOutcome::Found { length: 18 });
        assert_eq!(g.count(CellState::Path), 17);
        assert_eq!(g[Point::at(9, 9)].distance, 18);
    }

    #[test]
    fn distances_grow_by_one_per_ring() {
        let mut g = Grid::new(7, 7, 1);
        g.set_start(Point::at(3, 3));
        g.set_end(Point::at(6, 6));
        run(&mut g, dijkstra);
        assert_eq!(g[Point::at(3, 4)].distance, 1);
        assert_eq!(g[Point::at(1, 2)].distance, 3);
        assert_eq!(g[Point::at(3, 3)].distance, 0);
    }

    #[test]
    fn blocked_row_means_no_path() {
        let mut g = Grid::new(3, 3, 1);
        g.set_start(Point::at(0, 0));
        g.set_end(Point::at(2, 0));
        for c in 0..3 {
            g.toggle_barrier(Point::at(1, c));
        }
        assert_eq!(run(&mut g, dijkstra), PathOutcome::NoPath);
        assert_eq!(g.count(CellState::Path), 0);
    }

    #[test]
    fn agrees_with_astar_on_random_obstacles() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = Grid::new(15, 20, 1);
            g.set_start(Point::at(0, 0));
            g.set_end(Point::at(14, 19));
            for p in g.bounds() {
                if rng.random_bool(0.25) {
                    g.toggle_barrier(p);
                }
            }
            let a = run(&mut g, astar);
            let d = run(&mut g, dijkstra);
            assert_eq!(a.length(), d.length(), "seed {seed}");
            assert_eq!(a.found(), d.found(), "seed {seed}");
        }
    }

    #[test]
    fn cancellation_after_first_iteration() {
        let mut g = Grid::new(50, 50, 1);
        g.set_start(Point::at(0, 0));
        g.set_end(Point::at(49, 49));
        g.refresh_neighbors();
        let ctx = Context::new();
        let trigger = ctx.clone();
        let mut sink = move |_: &Grid| trigger.cancel();
        let mut steps = Stepper::new(&mut sink, &ctx);
        let out = dijkstra(&mut g, Point::at(0, 0), Point::at(49, 49), &mut steps);
        assert_eq!(steps.count(), 1);
        drop(steps);

        assert_eq!(out, PathOutcome::Cancelled);
        // The start was expanded into its two open neighbours.
        assert_eq!(g.count(CellState::Frontier), 2);
        assert_eq!(g[Point::at(1, 0)].distance, 1);
        assert_eq!(g.count(CellState::Visited), 0);
        assert_eq!(g.count(CellState::Path), 0);
    }
}
