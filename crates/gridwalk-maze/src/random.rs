use gridwalk_core::{Grid, Point, Progress, Stepper};
use rand::Rng;
use rand::seq::index;

/// Share of each column that may become barrier, in percent.
const DENSITY_PCT: usize = 8;

/// Upper bound of barriers placed in one column of a grid `cols` wide.
pub(crate) fn column_target(cols: usize) -> usize {
    cols * DENSITY_PCT / 100
}

/// Sprinkle barriers column by column.
///
/// Each column gets between `target - 3` (at least zero) and `target`
/// barriers on distinct rows, where `target` is 8% of the column count
/// rounded down and never more than the column holds. One step is emitted
/// per chosen cell; start and end cells are chosen like any other but keep
/// their role.
pub fn random_barriers(grid: &mut Grid, rng: &mut impl Rng, steps: &mut Stepper<'_>) -> Progress {
    let rows = grid.rows().max(0) as usize;
    let target = column_target(grid.cols().max(0) as usize).min(rows);
    let low = target.saturating_sub(3);

    for col in 0..grid.cols() {
        let n = rng.random_range(low..=target);
        for row in index::sample(rng, rows, n) {
            if steps.cancelled() {
                return Progress::Cancelled;
            }
            grid[Point::at(row as i32, col)].make_barrier();
            steps.emit(grid);
        }
    }
    Progress::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{CellState, Context, Never, NoopSink};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate(g: &mut Grid, seed: u64) -> (Progress, usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sink = NoopSink;
        let mut steps = Stepper::new(&mut sink, &Never);
        let p = random_barriers(g, &mut rng, &mut steps);
        (p, steps.count())
    }

    #[test]
    fn target_is_eight_percent_rounded_down() {
        assert_eq!(column_target(0), 0);
        assert_eq!(column_target(12), 0);
        assert_eq!(column_target(13), 1);
        assert_eq!(column_target(50), 4);
        assert_eq!(column_target(100), 8);
    }

    fn column_counts(g: &Grid) -> Vec<usize> {
        (0..g.cols())
            .map(|col| {
                (0..g.rows())
                    .filter(|&r| g[Point::at(r, col)].is_barrier())
                    .count()
            })
            .collect()
    }

    #[test]
    fn per_column_count_within_bounds() {
        // 60 columns give a target of 4, whatever the height.
        for seed in 0..10 {
            let mut g = Grid::new(20, 60, 1);
            let (p, steps) = generate(&mut g, seed);
            assert_eq!(p, Progress::Completed);
            for (col, n) in column_counts(&g).into_iter().enumerate() {
                assert!((1..=4).contains(&n), "seed {seed} col {col}: {n}");
            }
            assert_eq!(steps, g.count(CellState::Barrier));
        }
    }

    #[test]
    fn wide_short_grids_fill_whole_columns() {
        // 300 columns ask for 24 per column but only 20 rows exist.
        let mut g = Grid::new(20, 300, 1);
        let (p, _) = generate(&mut g, 4);
        assert_eq!(p, Progress::Completed);
        assert!(column_counts(&g).into_iter().all(|n| (17..=20).contains(&n)));
    }

    #[test]
    fn narrow_grids_get_no_barriers() {
        let mut g = Grid::new(40, 12, 1);
        let (_, steps) = generate(&mut g, 3);
        assert_eq!(steps, 0);
        assert_eq!(g.count(CellState::Barrier), 0);
    }

    #[test]
    fn endpoints_survive() {
        for seed in 0..20 {
            let mut g = Grid::new(4, 100, 1);
            g.set_start(Point::at(0, 0));
            g.set_end(Point::at(3, 99));
            generate(&mut g, seed);
            assert!(g[Point::at(0, 0)].is_start());
            assert!(g[Point::at(3, 99)].is_end());
            assert_eq!(g.start(), Some(Point::at(0, 0)));
        }
    }

    #[test]
    fn seeded_runs_replay() {
        let mut a = Grid::new(40, 40, 1);
        let mut b = Grid::new(40, 40, 1);
        generate(&mut a, 42);
        generate(&mut b, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn cancellation_stops_placement() {
        let mut g = Grid::new(50, 50, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = Context::new();
        let trigger = ctx.clone();
        let mut sink = move |_: &Grid| trigger.cancel();
        let mut steps = Stepper::new(&mut sink, &ctx);
        let p = random_barriers(&mut g, &mut rng, &mut steps);
        assert_eq!(p, Progress::Cancelled);
        assert_eq!(steps.count(), 1);
        drop(steps);
        assert_eq!(g.count(CellState::Barrier), 1);
    }
}
