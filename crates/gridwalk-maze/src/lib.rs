//! Barrier and maze generators for a [`gridwalk_core::Grid`].
//!
//! Provides four generators behind [`BarrierGenerator`]:
//! - **Manual**: leaves the layout to the user and only refreshes adjacency.
//! - **Random barriers**: sprinkles a few barriers into every column.
//! - **Recursive division**: splits the grid into chambers with barrier
//!   lines and punches three doors per split.
//! - **DFS maze**: carves a perfect maze out of a walled grid by randomized
//!   backtracking.
//!
//! Like the searches, every generator emits one step per mutation and polls
//! for cancellation between steps.

mod dfs_maze;
mod division;
mod generator;
mod random;

pub use dfs_maze::dfs_maze;
pub use division::recursive_division;
pub use generator::BarrierGenerator;
pub use random::random_barriers;
