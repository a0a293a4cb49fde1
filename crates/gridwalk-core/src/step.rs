//! The step protocol shared by every search and generator.
//!
//! Each algorithm is a plain loop. At the top of an iteration it polls a
//! [`Cancel`] source; after each state mutation it hands the grid to a
//! [`StepSink`], which is the only place the loop yields control. The sink
//! gets an immutable borrow, so it can render but never edit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::grid::Grid;

// ---------------------------------------------------------------------------
// StepSink
// ---------------------------------------------------------------------------

/// Receiver of "render now" signals, called once per atomic mutation.
///
/// A sink may block (e.g. to pace an animation); the algorithm waits for it.
pub trait StepSink {
    fn step(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> StepSink for F {
    #[inline]
    fn step(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// A sink that ignores every step. Useful for headless runs and tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopSink;

impl StepSink for NoopSink {
    #[inline]
    fn step(&mut self, _grid: &Grid) {}
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// A should-stop signal polled once per iteration.
pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

impl<F: Fn() -> bool> Cancel for F {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// A source that never cancels.
#[derive(Copy, Clone, Debug, Default)]
pub struct Never;

impl Cancel for Never {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag, so a sink or an input poller can hold one
/// clone and request cancellation while the algorithm polls another.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }

    /// Clear a previous cancellation so the token can drive another run.
    #[inline]
    pub fn rearm(&self) {
        self.done.store(false, Ordering::Relaxed);
    }
}

impl Cancel for Context {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.is_done()
    }
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// How a generator run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Progress {
    Completed,
    /// Stopped early by the cancel source. The grid holds whatever partial
    /// state was reached.
    Cancelled,
}

/// Bundles a sink and a cancel source for the duration of one run.
pub struct Stepper<'a> {
    sink: &'a mut dyn StepSink,
    cancel: &'a dyn Cancel,
    steps: usize,
}

impl<'a> Stepper<'a> {
    pub fn new(sink: &'a mut dyn StepSink, cancel: &'a dyn Cancel) -> Self {
        Self {
            sink,
            cancel,
            steps: 0,
        }
    }

    /// Poll the cancel source. Call once at the top of each iteration.
    #[inline]
    pub fn cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Signal the sink that the grid changed.
    #[inline]
    pub fn emit(&mut self, grid: &Grid) {
        self.steps += 1;
        self.sink.step(grid);
    }

    /// Number of steps emitted so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.steps
    }
}

impl std::fmt::Debug for Stepper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper").field("steps", &self.steps).finish()
    }
}
