use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Cancel, Error, Grid, StepSink, Stepper};

use crate::{astar, dfs, dijkstra};

/// How a search ended.
///
/// `NoPath` is a completed search that exhausted the reachable cells;
/// `Cancelled` means the run stopped early and says nothing about
/// reachability.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathOutcome {
    /// `length` is the number of moves from start to end.
    Found { length: usize },
    NoPath,
    Cancelled,
}

impl PathOutcome {
    #[inline]
    pub fn found(self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[inline]
    pub fn is_cancelled(self) -> bool {
        self == Self::Cancelled
    }

    #[inline]
    pub fn length(self) -> Option<usize> {
        match self {
            Self::Found { length } => Some(length),
            _ => None,
        }
    }
}

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PathAlgorithm {
    #[default]
    AStar,
    Dijkstra,
    DepthFirst,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 3] = [Self::AStar, Self::Dijkstra, Self::DepthFirst];

    /// Lookup key, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::AStar => "a*",
            Self::Dijkstra => "dijkstra",
            Self::DepthFirst => "dfs",
        }
    }

    /// Human-readable title.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AStar => "A* Search",
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::DepthFirst => "Depth First Search",
        }
    }

    /// Whether the algorithm always finds a shortest path.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::DepthFirst)
    }

    /// Run the search on `grid` between its start and end cells.
    ///
    /// Fails with [`Error::PreconditionFailed`] before touching the grid if
    /// either endpoint is missing. Otherwise clears results of any earlier
    /// search, refreshes adjacency, and searches.
    pub fn run(self, grid: &mut Grid, steps: &mut Stepper<'_>) -> Result<PathOutcome, Error> {
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            log::warn!("{}: start and end are not both set", self.label());
            return Err(Error::PreconditionFailed("start and end must both be set"));
        };

        grid.clear_search();
        grid.refresh_neighbors();
        log::debug!(
            "{} from {} to {} on a {}x{} grid",
            self.label(),
            start,
            end,
            grid.rows(),
            grid.cols()
        );

        let outcome = match self {
            Self::AStar => astar(grid, start, end, steps),
            Self::Dijkstra => dijkstra(grid, start, end, steps),
            Self::DepthFirst => dfs(grid, start, end, steps),
        };
        log::debug!("{}: {:?} after {} steps", self.label(), outcome, steps.count());
        Ok(outcome)
    }

    /// Convenience wrapper that builds the [`Stepper`] from a sink and a
    /// cancel source.
    pub fn run_with(
        self,
        grid: &mut Grid,
        sink: &mut dyn StepSink,
        cancel: &dyn Cancel,
    ) -> Result<PathOutcome, Error> {
        let mut steps = Stepper::new(sink, cancel);
        self.run(grid, &mut steps)
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PathAlgorithm {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| Error::NotFound {
                kind: "pathfinding algorithm",
                name: s.to_string(),
            })
    }
}
