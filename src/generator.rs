//! Maze generation

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Cell, CellState, Grid, MazeError, MIN_SIZE};

/// Builds a perfect maze by randomized Prim's-style wall carving
///
/// Starting from the entrance, the builder repeatedly picks a random wall
/// from a frontier set, carves through it into the unvisited cell on the far
/// side, and grows the frontier from there. Every wall is considered once,
/// which keeps generation linear in the cell count and guarantees a perfect
/// maze: exactly one simple path between any two open cells.
pub struct GridBuilder {
    grid: Grid,
    random: StdRng,
}

impl GridBuilder {
    /// Create a builder for a maze with `size` interior cells per side
    ///
    /// The full grid gains two extra rows and columns for an impenetrable
    /// border. Pass a seed for reproducible mazes, or `None` to draw from
    /// entropy.
    ///
    /// Fails with [`MazeError::InvalidConfiguration`] when `size` is below
    /// [`MIN_SIZE`], before any grid is allocated.
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self, MazeError> {
        if size < MIN_SIZE {
            return Err(MazeError::InvalidConfiguration(size));
        }
        Ok(Self {
            grid: Grid::walled(size + 2),
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        })
    }

    /// Carve the maze and return the finished grid
    ///
    /// After carving, the entrance cell `(1, 1)` carries the
    /// [`CellState::Entrance`] marker and the cell one step inside the
    /// bottom-right corner carries [`CellState::Exit`].
    pub fn generate(mut self) -> Grid {
        let entrance = self.grid.entrance();
        self.grid.carve(entrance);
        let mut frontier = self.wall_neighbors(entrance);

        while !frontier.is_empty() {
            let picked = self.random.gen_range(0..frontier.len());
            // Visited-once semantics: the wall leaves the frontier whether or
            // not it gets carved.
            let wall = frontier.swap_remove(picked);

            if let Some(opposite) = self.opposite_cell(wall) {
                if self.grid.state(opposite) == CellState::Wall {
                    self.grid.carve(wall);
                    self.grid.carve(opposite);
                    frontier.extend(self.wall_neighbors(opposite));
                }
            }
        }

        let exit = self.grid.exit();
        self.grid.mark(entrance, CellState::Entrance);
        self.grid.mark(exit, CellState::Exit);
        self.grid
    }

    fn wall_neighbors(&self, cell: Cell) -> Vec<Cell> {
        self.grid
            .neighbors(cell)
            .filter(|&n| self.grid.state(n) == CellState::Wall)
            .collect()
    }

    /// Cell on the far side of `wall` from the carved region
    ///
    /// The carving direction comes from the first open neighbor in
    /// up/down/left/right order; a wall touching the carved region on several
    /// sides keeps that tie-break, which biases carving order but never
    /// connectivity. `None` when the projection leaves the interior, so the
    /// border is never carved.
    fn opposite_cell(&self, wall: Cell) -> Option<Cell> {
        let open = self
            .grid
            .neighbors(wall)
            .find(|&n| self.grid.state(n) == CellState::Open)?;
        let row = (2 * wall.row).checked_sub(open.row)?;
        let col = (2 * wall.col).checked_sub(open.col)?;
        let opposite = Cell::new(row, col);
        self.grid.is_interior(opposite).then_some(opposite)
    }
}
