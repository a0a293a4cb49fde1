//! Stepwise pathfinding over a [`gridwalk_core::Grid`].
//!
//! Three interchangeable searches share one control pattern: poll for
//! cancellation, apply one mutation, hand the grid to the step sink.
//!
//! - **A\*** with the Manhattan heuristic ([`astar`])
//! - **Dijkstra** ([`dijkstra`])
//! - **Depth-first search** ([`dfs`]), not shortest-path
//!
//! [`PathAlgorithm`] is the closed set of searches; it checks preconditions,
//! prepares the grid and dispatches. Both priority-queue searches break ties
//! by insertion order so identical inputs replay identically.
//!
//! All moves cost 1 and only cardinal moves are allowed.

mod algorithm;
mod astar;
mod dfs;
mod dijkstra;
mod distance;
mod path;
mod queue;

pub use algorithm::{PathAlgorithm, PathOutcome};
pub use astar::astar;
pub use dfs::dfs;
pub use dijkstra::dijkstra;
pub use distance::manhattan;
pub use path::reconstruct;
