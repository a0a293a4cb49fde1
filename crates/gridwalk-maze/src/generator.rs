use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use gridwalk_core::{CellKind, Error, Grid, Progress, Stepper};
use rand::Rng;

use crate::{dfs_maze, random_barriers, recursive_division};

/// The available barrier generators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BarrierGenerator {
    /// Barriers are drawn by the user; generation only refreshes adjacency.
    #[default]
    Manual,
    Random,
    RecursiveDivision,
    /// Needs a [`CellKind::Walled`] grid.
    DfsMaze,
}

impl BarrierGenerator {
    pub const ALL: [BarrierGenerator; 4] = [
        Self::Manual,
        Self::Random,
        Self::RecursiveDivision,
        Self::DfsMaze,
    ];

    /// Lookup key, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Manual => "diy",
            Self::Random => "random",
            Self::RecursiveDivision => "recursive_division",
            Self::DfsMaze => "dfs_maze",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "Draw It Yourself",
            Self::Random => "Random Barriers",
            Self::RecursiveDivision => "Recursive Division",
            Self::DfsMaze => "DFS Maze",
        }
    }

    /// The cell model the grid must be built with.
    pub const fn cell_kind(self) -> CellKind {
        match self {
            Self::DfsMaze => CellKind::Walled,
            _ => CellKind::Plain,
        }
    }

    /// Default pause between rendered steps.
    pub const fn step_delay(self) -> Duration {
        match self {
            Self::Manual | Self::Random => Duration::from_millis(10),
            Self::RecursiveDivision | Self::DfsMaze => Duration::from_millis(20),
        }
    }

    /// Run the generator on `grid`.
    ///
    /// Fails with [`Error::PreconditionFailed`] before any mutation if the
    /// grid's [`CellKind`] is not [`cell_kind`](Self::cell_kind). Neighbour
    /// lists are refreshed at the end, cancelled or not.
    pub fn generate(
        self,
        grid: &mut Grid,
        rng: &mut impl Rng,
        steps: &mut Stepper<'_>,
    ) -> Result<Progress, Error> {
        if grid.kind() != self.cell_kind() {
            log::warn!(
                "{} needs a {:?} grid, got {:?}",
                self.label(),
                self.cell_kind(),
                grid.kind()
            );
            return Err(Error::PreconditionFailed("grid cell kind does not match generator"));
        }
        log::debug!("{} on a {}x{} grid", self.label(), grid.rows(), grid.cols());

        let progress = match self {
            Self::Manual => Progress::Completed,
            Self::Random => random_barriers(grid, rng, steps),
            Self::RecursiveDivision => recursive_division(grid, rng, steps),
            Self::DfsMaze => dfs_maze(grid, rng, steps),
        };
        grid.refresh_neighbors();

        log::debug!("{}: {:?} after {} steps", self.label(), progress, steps.count());
        Ok(progress)
    }

    /// Build an empty grid of the kind this generator works on.
    pub fn new_grid(self, rows: i32, cols: i32, cell_size: i32) -> Grid {
        Grid::with_kind(rows, cols, cell_size, self.cell_kind())
    }
}

impl fmt::Display for BarrierGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BarrierGenerator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == key)
            .ok_or_else(|| Error::NotFound {
                kind: "barrier generator",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{CellState, Never, NoopSink, Point};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate(which: BarrierGenerator, g: &mut Grid, seed: u64) -> Result<Progress, Error> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sink = NoopSink;
        let mut steps = Stepper::new(&mut sink, &Never);
        which.generate(g, &mut rng, &mut steps)
    }

    #[test]
    fn lookup_by_name() {
        for g in BarrierGenerator::ALL {
            assert_eq!(g.name().parse::<BarrierGenerator>(), Ok(g));
        }
        assert_eq!(
            "  Recursive_Division ".parse::<BarrierGenerator>(),
            Ok(BarrierGenerator::RecursiveDivision)
        );
        assert_eq!(
            "prim".parse::<BarrierGenerator>(),
            Err(Error::NotFound {
                kind: "barrier generator",
                name: "prim".to_string()
            })
        );
    }

    #[test]
    fn pacing() {
        assert_eq!(BarrierGenerator::Manual.step_delay(), Duration::from_millis(10));
        assert_eq!(BarrierGenerator::DfsMaze.step_delay(), Duration::from_millis(20));
    }

    #[test]
    fn manual_only_refreshes() {
        let mut g = Grid::new(4, 4, 1);
        g.toggle_barrier(Point::at(0, 1));
        let before: Vec<CellState> = g.iter().map(|c| c.state()).collect();
        assert_eq!(generate(BarrierGenerator::Manual, &mut g, 0), Ok(Progress::Completed));
        let after: Vec<CellState> = g.iter().map(|c| c.state()).collect();
        assert_eq!(before, after);
        assert_eq!(g[Point::at(0, 0)].neighbors(), &[Point::at(1, 0)]);
    }

    #[test]
    fn kind_mismatch_is_rejected_untouched() {
        let mut plain = Grid::new(6, 6, 1);
        let before = plain.clone();
        assert!(matches!(
            generate(BarrierGenerator::DfsMaze, &mut plain, 0),
            Err(Error::PreconditionFailed(_))
        ));
        assert_eq!(plain, before);

        let mut walled = BarrierGenerator::DfsMaze.new_grid(6, 6, 1);
        assert!(generate(BarrierGenerator::Random, &mut walled, 0).is_err());
        assert!(generate(BarrierGenerator::DfsMaze, &mut walled, 0).is_ok());
    }

    #[test]
    fn generated_adjacency_is_current() {
        for which in BarrierGenerator::ALL {
            let mut g = which.new_grid(30, 30, 1);
            generate(which, &mut g, 7).unwrap();
            let snapshot = g.clone();
            g.refresh_neighbors();
            assert_eq!(g, snapshot, "{which}");
        }
    }
}
