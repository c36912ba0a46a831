//! CLI for one-shot maze generation

use clap::Parser;
use maze_walk::generator::GridBuilder;

/// Generate a perfect maze and print it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze interior size, cells per side
    #[arg(short, long, default_value_t = 25)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let grid = GridBuilder::new(args.size, args.seed)?.generate();
    println!("{}", grid.display_string());
    Ok(())
}
