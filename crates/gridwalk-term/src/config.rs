//! Command-line arguments and the validated run configuration built from
//! them.

use std::time::Duration;

use clap::Parser;
use gridwalk_core::{Error, Point};
use gridwalk_maze::BarrierGenerator;
use gridwalk_paths::PathAlgorithm;

/// Step-by-step pathfinding and maze generation in the terminal.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(1..=500))]
    pub rows: i32,

    /// Number of grid columns
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(i32).range(1..=500))]
    pub cols: i32,

    /// Search to run: a*, dijkstra or dfs
    #[arg(short, long, default_value = "a*")]
    pub algorithm: String,

    /// Barrier generator: diy, random, recursive_division or dfs_maze
    #[arg(short, long, default_value = "diy")]
    pub generator: String,

    /// Pause between rendered steps, in milliseconds (defaults per generator)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the generator's random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = parse_cell)]
    pub start: Option<Point>,

    /// End cell as ROW,COL
    #[arg(long, value_parser = parse_cell)]
    pub end: Option<Point>,

    /// Run without a terminal UI and print the result
    #[arg(long)]
    pub headless: bool,
}

/// Parse `ROW,COL` into a point.
pub fn parse_cell(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{s}`"))?;
    let row: i32 = row.trim().parse().map_err(|e| format!("bad row `{row}`: {e}"))?;
    let col: i32 = col.trim().parse().map_err(|e| format!("bad column `{col}`: {e}"))?;
    Ok(Point::at(row, col))
}

/// Everything a run needs, with names already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: i32,
    pub cols: i32,
    pub algorithm: PathAlgorithm,
    pub generator: BarrierGenerator,
    pub delay: Duration,
    pub seed: Option<u64>,
    /// Endpoints placed before the run. In the terminal UI with the `diy`
    /// generator these may be left unset and clicked in instead.
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub headless: bool,
}

impl Config {
    /// Resolve names and check endpoints against the grid shape.
    ///
    /// Headless runs default the endpoints to opposite corners.
    pub fn from_args(args: Args) -> Result<Config, Error> {
        let algorithm: PathAlgorithm = args.algorithm.parse()?;
        let generator: BarrierGenerator = args.generator.parse()?;

        let interactive_diy = !args.headless && generator == BarrierGenerator::Manual;
        let (start, end) = if interactive_diy {
            (args.start, args.end)
        } else {
            (
                Some(args.start.unwrap_or(Point::at(0, 0))),
                Some(args.end.unwrap_or(Point::at(args.rows - 1, args.cols - 1))),
            )
        };

        let in_bounds = |p: Point| (0..args.rows).contains(&p.row()) && (0..args.cols).contains(&p.col());
        if !start.into_iter().chain(end).all(in_bounds) {
            return Err(Error::PreconditionFailed("start or end lies outside the grid"));
        }
        if start.is_some() && start == end {
            return Err(Error::PreconditionFailed("start and end must differ"));
        }

        let delay = args
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| generator.step_delay());

        Ok(Config {
            rows: args.rows,
            cols: args.cols,
            algorithm,
            generator,
            delay,
            seed: args.seed,
            start,
            end,
            headless: args.headless,
        })
    }
}
