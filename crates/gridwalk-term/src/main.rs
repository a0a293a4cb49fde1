//! Step-by-step pathfinding visualizer.
//!
//! Run: cargo run -- --generator recursive_division --algorithm dijkstra
//! Headless: cargo run -- --headless --generator dfs_maze --seed 7

use clap::Parser;
use gridwalk_term::{Args, Canvas, Config, describe, run_headless, term};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The UI owns the terminal, so only warnings reach stderr unless
    // RUST_LOG says otherwise.
    let default_filter = if args.headless { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::from_args(args)?;
    log::info!(
        "{} after {} on a {}x{} grid",
        config.algorithm,
        config.generator,
        config.rows,
        config.cols
    );

    if config.headless {
        let (report, grid) = run_headless(config)?;
        print!("{}", Canvas::render(&grid).to_text());
        println!("{}", describe(&report));
    } else if let Some(report) = term::run_interactive(config)? {
        log::info!("last run: {}", describe(&report));
    }
    Ok(())
}
