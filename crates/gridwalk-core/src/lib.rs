//! **gridwalk-core** — the grid data model behind the gridwalk visualizer.
//!
//! This crate provides the types every search and generator works on:
//! geometry primitives, the [`Cell`] and its per-cell state, the [`Grid`]
//! that owns them, and the step protocol ([`StepSink`], [`Cancel`],
//! [`Stepper`]) through which algorithms hand control back to a renderer
//! after each mutation.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod step;

pub use cell::{Cell, CellState, Side, UNREACHABLE, Walls};
pub use error::Error;
pub use geom::{Point, Range};
pub use grid::{CellKind, Grid};
pub use step::{Cancel, Context, Never, NoopSink, Progress, StepSink, Stepper};
