//! Interactive replay loop
//!
//! Drives the generate → solve → render → animate cycle. Rendering and the
//! wait-for-continue input are injectable, so the loop is testable without a
//! real terminal; [`AnsiRenderer`] and [`StdinEvents`] are the console
//! implementations used by the binary.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::generator::GridBuilder;
use crate::{shortest_path, Cell, Grid, MazeError, MIN_SIZE};

/// What the user asked for at a phase boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Continue,
    Quit,
}

/// Blocking source of user commands between phases.
pub trait EventSource {
    fn wait(&mut self) -> Command;
}

/// Full-frame display plus a channel for phase prompts and error reports.
pub trait Render {
    fn render(&mut self, grid: &Grid);
    fn message(&mut self, text: &str);
}

/// Shared flag checked before every animation frame
///
/// Tripping the token from anywhere makes [`App::run`] return cleanly at the
/// next frame boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The replay loop: generate a maze, show it, walk the shortest path on
/// request, repeat until told to quit.
pub struct App<R, E> {
    size: usize,
    frame_delay: Duration,
    seed: Option<u64>,
    renderer: R,
    events: E,
    cancel: CancelToken,
}

impl<R: Render, E: EventSource> App<R, E> {
    /// Fails with [`MazeError::InvalidConfiguration`] when `size` cannot
    /// yield a solvable maze, so the loop never starts on a bad setup.
    pub fn new(
        size: usize,
        frame_delay: Duration,
        seed: Option<u64>,
        renderer: R,
        events: E,
        cancel: CancelToken,
    ) -> Result<Self, MazeError> {
        if size < MIN_SIZE {
            return Err(MazeError::InvalidConfiguration(size));
        }
        Ok(Self {
            size,
            frame_delay,
            seed,
            renderer,
            events,
            cancel,
        })
    }

    /// Run cycles until a quit command or a tripped cancel token
    ///
    /// A maze without a way out is reported and skips its animation; the
    /// loop then offers a fresh maze instead of crashing.
    pub fn run(&mut self) -> Result<(), MazeError> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(());
            }

            self.renderer.message("Generating a solvable maze...");
            // The seed pins the first maze for reproduction; replays draw
            // from entropy so "start again" is not the same maze forever.
            let mut grid = GridBuilder::new(self.size, self.seed.take())?.generate();
            let solution = shortest_path(&grid, grid.entrance(), grid.exit());
            self.renderer.render(&grid);

            match solution {
                Ok(path) => {
                    self.renderer
                        .message("Press enter to walk the maze (q to quit)");
                    if self.events.wait() == Command::Quit {
                        return Ok(());
                    }
                    if !self.animate(&mut grid, &path) {
                        return Ok(());
                    }
                    self.renderer
                        .message("Journey complete! Press enter to start again (q to quit)");
                }
                Err(MazeError::PathNotFound) => {
                    self.renderer
                        .message("This maze has no way out! Press enter for a fresh one (q to quit)");
                }
                Err(other) => return Err(other),
            }

            if self.events.wait() == Command::Quit {
                return Ok(());
            }
        }
    }

    /// Walk the player marker along `path`, one rendered frame per cell.
    /// Returns false when cancelled mid-walk.
    fn animate(&mut self, grid: &mut Grid, path: &[Cell]) -> bool {
        let Some(&start) = path.first() else {
            return true;
        };
        let mut player = start;
        for &cell in path {
            if self.cancel.is_cancelled() {
                return false;
            }
            grid.move_player(player, cell);
            player = cell;
            self.renderer.render(grid);
            thread::sleep(self.frame_delay);
        }
        true
    }
}

/// Console renderer: clears the screen, then redraws the whole grid.
pub struct AnsiRenderer;

impl Render for AnsiRenderer {
    fn render(&mut self, grid: &Grid) {
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", grid.display_string());
    }

    fn message(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Line-based console input: enter continues, `q` or end-of-input quits.
pub struct StdinEvents;

impl EventSource for StdinEvents {
    fn wait(&mut self) -> Command {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Command::Quit,
            Ok(_) if line.trim().eq_ignore_ascii_case("q") => Command::Quit,
            Ok(_) => Command::Continue,
            Err(_) => Command::Quit,
        }
    }
}
