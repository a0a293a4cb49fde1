//! Terminal front end for gridwalk.
//!
//! [`Session`] owns the grid and runs the generate-then-search pipeline
//! against any [`StepSink`]. The [`term`] module supplies a crossterm sink
//! that animates every step; headless runs use a no-op sink instead.

pub mod config;
pub mod frame;
pub mod term;

use gridwalk_core::{Cancel, Error, Grid, Never, NoopSink, Progress, StepSink, Stepper};
use gridwalk_paths::PathOutcome;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use config::{Args, Config};
pub use frame::{Canvas, Tone};

/// Nominal cell edge in pixels, kept on every cell for front ends that
/// draw in pixel space.
pub const CELL_SIZE: i32 = 20;

/// Counts and outcomes of one pipeline run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub generation: Progress,
    pub generation_steps: usize,
    /// `None` when generation was cancelled and no search ran.
    pub outcome: Option<PathOutcome>,
    pub search_steps: usize,
}

/// A grid plus the configuration that drives it.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub grid: Grid,
    rng: StdRng,
}

impl Session {
    /// Build an empty grid of the generator's cell kind and place the
    /// configured endpoints.
    pub fn new(config: Config) -> Session {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Session {
            grid: config.generator.new_grid(config.rows, config.cols, CELL_SIZE),
            config,
            rng,
        };
        session.place_endpoints();
        session
    }

    fn place_endpoints(&mut self) {
        if let Some(p) = self.config.start {
            if !self.grid.set_start(p) {
                log::warn!("start {p} rejected");
            }
        }
        if let Some(p) = self.config.end {
            if !self.grid.set_end(p) {
                log::warn!("end {p} rejected");
            }
        }
    }

    /// Throw away every edit and search result, then re-place the
    /// configured endpoints.
    pub fn clear(&mut self) {
        self.grid.reset();
        self.place_endpoints();
    }

    /// Run the generator, then the search, stepping through `sink`.
    ///
    /// Fails before mutating anything if the grid has no start or end.
    pub fn run(&mut self, sink: &mut dyn StepSink, cancel: &dyn Cancel) -> Result<Report, Error> {
        if !self.grid.is_ready() {
            return Err(Error::PreconditionFailed("start and end must both be set"));
        }
        let Config {
            generator,
            algorithm,
            ..
        } = self.config;

        let mut steps = Stepper::new(sink, cancel);
        let generation = generator.generate(&mut self.grid, &mut self.rng, &mut steps)?;
        let generation_steps = steps.count();
        log::info!("{generator}: {generation:?} in {generation_steps} steps");
        if generation == Progress::Cancelled {
            return Ok(Report {
                generation,
                generation_steps,
                outcome: None,
                search_steps: 0,
            });
        }

        let outcome = algorithm.run(&mut self.grid, &mut steps)?;
        let search_steps = steps.count() - generation_steps;
        log::info!("{algorithm}: {outcome:?} in {search_steps} steps");
        Ok(Report {
            generation,
            generation_steps,
            outcome: Some(outcome),
            search_steps,
        })
    }
}

/// Run the whole pipeline without rendering.
pub fn run_headless(config: Config) -> Result<(Report, Grid), Error> {
    let mut session = Session::new(config);
    let report = session.run(&mut NoopSink, &Never)?;
    Ok((report, session.grid))
}

/// One-line human summary of a report.
pub fn describe(report: &Report) -> String {
    match report.outcome {
        None => "generation cancelled".to_string(),
        Some(PathOutcome::Found { length }) => format!("path found, length {length}"),
        Some(PathOutcome::NoPath) => "no path".to_string(),
        Some(PathOutcome::Cancelled) => "search cancelled".to_string(),
    }
}
