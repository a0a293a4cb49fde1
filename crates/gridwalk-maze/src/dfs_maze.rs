use gridwalk_core::{Grid, Point, Progress, Stepper};
use rand::Rng;

/// Carve a perfect maze into a walled grid by randomized depth-first
/// backtracking from the top-left cell.
///
/// While the cell on top of the stack still has uncarved geometric
/// neighbours, one is picked uniformly at random, the wall pair between the
/// two is knocked down and the neighbour is pushed. Otherwise the cell is
/// popped. One step is emitted per carve, so a full run emits
/// `rows * cols - 1` steps.
///
/// Adjacency is linked as walls come down. A carved cell is open, so any
/// barrier drawn on it beforehand is cleared.
pub fn dfs_maze(grid: &mut Grid, rng: &mut impl Rng, steps: &mut Stepper<'_>) -> Progress {
    let root = Point::at(0, 0);
    if !grid.contains(root) {
        return Progress::Completed;
    }

    // Uncarved geometric neighbours, drained as the carver moves on.
    let mut candidates: Vec<Vec<Point>> = (0..grid.len())
        .map(|i| {
            let p = grid.point(i);
            p.neighbors_4()
                .into_iter()
                .filter(|&q| grid.contains(q))
                .collect()
        })
        .collect();

    grid[root].clear_barrier();
    grid.mark_carved(root);
    let mut stack = vec![root];

    while let Some(&current) = stack.last() {
        if steps.cancelled() {
            return Progress::Cancelled;
        }
        let Some(ci) = grid.idx(current) else {
            stack.pop();
            continue;
        };
        let open = &mut candidates[ci];
        open.retain(|&q| !grid[q].is_carved());
        if open.is_empty() {
            stack.pop();
            continue;
        }
        let next = open.swap_remove(rng.random_range(0..open.len()));
        grid.carve_between(current, next);
        grid[next].clear_barrier();
        grid.mark_carved(next);
        stack.push(next);
        steps.emit(grid);
    }
    Progress::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{CellKind, Context, Never, NoopSink};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{BTreeSet, VecDeque};

    fn carve(rows: i32, cols: i32, seed: u64) -> (Grid, usize) {
        let mut g = Grid::with_kind(rows, cols, 1, CellKind::Walled);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sink = NoopSink;
        let mut steps = Stepper::new(&mut sink, &Never);
        assert_eq!(dfs_maze(&mut g, &mut rng, &mut steps), Progress::Completed);
        let n = steps.count();
        (g, n)
    }

    fn carved_pairs(g: &Grid) -> usize {
        let removed: u32 = g.iter().map(|c| 4 - c.walls().count()).sum();
        removed as usize / 2
    }

    fn reachable(g: &Grid, from: Point) -> usize {
        let mut seen = vec![false; g.len()];
        let mut queue = VecDeque::from([from]);
        seen[g.idx(from).unwrap()] = true;
        let mut n = 1;
        while let Some(p) = queue.pop_front() {
            for &q in g[p].neighbors() {
                let qi = g.idx(q).unwrap();
                if !seen[qi] {
                    seen[qi] = true;
                    n += 1;
                    queue.push_back(q);
                }
            }
        }
        n
    }

    #[test]
    fn maze_is_a_spanning_tree() {
        for seed in 0..10 {
            let (g, steps) = carve(9, 13, seed);
            assert_eq!(carved_pairs(&g), 9 * 13 - 1, "seed {seed}");
            assert_eq!(steps, 9 * 13 - 1);
            assert_eq!(reachable(&g, Point::at(0, 0)), g.len());
            assert!(g.iter().all(|c| c.is_carved()));
        }
    }

    #[test]
    fn outer_walls_stay_up() {
        let (g, _) = carve(6, 7, 5);
        for col in 0..7 {
            assert!(g[Point::at(0, col)].walls().has(gridwalk_core::Side::Top));
            assert!(g[Point::at(5, col)].walls().has(gridwalk_core::Side::Bottom));
        }
        for row in 0..6 {
            assert!(g[Point::at(row, 0)].walls().has(gridwalk_core::Side::Left));
            assert!(g[Point::at(row, 6)].walls().has(gridwalk_core::Side::Right));
        }
    }

    #[test]
    fn refresh_agrees_with_carved_links() {
        let (mut g, _) = carve(8, 8, 11);
        let linked: Vec<BTreeSet<Point>> =
            g.iter().map(|c| c.neighbors().iter().copied().collect()).collect();
        g.refresh_neighbors();
        let refreshed: Vec<BTreeSet<Point>> =
            g.iter().map(|c| c.neighbors().iter().copied().collect()).collect();
        assert_eq!(linked, refreshed);
    }

    #[test]
    fn carving_clears_drawn_barriers() {
        let mut g = Grid::with_kind(8, 8, 1, CellKind::Walled);
        g.set_start(Point::at(0, 0));
        g.set_end(Point::at(7, 7));
        g.toggle_barrier(Point::at(3, 3));
        g.toggle_barrier(Point::at(4, 4));
        g.toggle_barrier(Point::at(0, 0));
        let mut rng = StdRng::seed_from_u64(3);
        let mut sink = NoopSink;
        let mut steps = Stepper::new(&mut sink, &Never);
        assert_eq!(dfs_maze(&mut g, &mut rng, &mut steps), Progress::Completed);
        drop(steps);

        assert!(g.iter().all(|c| !c.is_barrier()));
        assert!(g[Point::at(0, 0)].is_start());
        g.refresh_neighbors();
        assert_eq!(reachable(&g, Point::at(0, 0)), g.len());
    }

    #[test]
    fn degenerate_grids() {
        let (g, steps) = carve(1, 1, 0);
        assert_eq!(steps, 0);
        assert!(g[Point::at(0, 0)].is_carved());

        let (g, steps) = carve(1, 6, 0);
        assert_eq!(steps, 5);
        assert_eq!(reachable(&g, Point::at(0, 5)), 6);

        let (g, steps) = carve(0, 0, 0);
        assert_eq!(steps, 0);
        assert!(g.is_empty());
    }

    #[test]
    fn cancellation_leaves_partial_tree() {
        let mut g = Grid::with_kind(10, 10, 1, CellKind::Walled);
        let mut rng = StdRng::seed_from_u64(2);
        let ctx = Context::new();
        let trigger = ctx.clone();
        let mut emitted = 0;
        let mut sink = move |_: &Grid| {
            emitted += 1;
            if emitted == 5 {
                trigger.cancel();
            }
        };
        let mut steps = Stepper::new(&mut sink, &ctx);
        assert_eq!(dfs_maze(&mut g, &mut rng, &mut steps), Progress::Cancelled);
        assert_eq!(steps.count(), 5);
        drop(steps);
        assert_eq!(carved_pairs(&g), 5);
        assert_eq!(g.iter().filter(|c| c.is_carved()).count(), 6);
    }
}
