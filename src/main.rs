//! CLI for the animated maze walk

use std::time::Duration;

use clap::Parser;
use maze_walk::app::{AnsiRenderer, App, CancelToken, StdinEvents};

/// Generate a perfect maze and watch the shortest walk out of it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze interior size, cells per side
    #[arg(short, long, default_value_t = 25)]
    size: usize,

    /// Animation frame length in milliseconds
    #[arg(short, long, default_value_t = 200)]
    frame_length: u64,

    /// Random seed for the first maze
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app = App::new(
        args.size,
        Duration::from_millis(args.frame_length),
        args.seed,
        AnsiRenderer,
        StdinEvents,
        CancelToken::new(),
    )?;
    app.run()?;
    Ok(())
}
