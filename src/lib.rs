//! Generate a perfect maze and walk the shortest path out of it
//!
//! A maze is carved on a bordered square grid with a randomized Prim's-style
//! algorithm, so that every open cell is reachable from the entrance through
//! exactly one simple path. The shortest entrance-to-exit walk is then found
//! with breadth-first search and can be animated on a text console.
//!
//! # Examples
//! ```
//! use maze_walk::generator::GridBuilder;
//! use maze_walk::shortest_path;
//!
//! let grid = GridBuilder::new(9, Some(7)).unwrap().generate();
//! let path = shortest_path(&grid, grid.entrance(), grid.exit()).unwrap();
//!
//! assert_eq!(path[0], grid.entrance());
//! assert_eq!(*path.last().unwrap(), grid.exit());
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use itertools::Itertools;
use thiserror::Error;

pub mod app;
pub mod generator;

/// Smallest interior size for which the bordered maze topology stays solvable
/// and non-trivial.
pub const MIN_SIZE: usize = 5;

/// Errors raised while building, parsing or solving a maze
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze size {0} is too small, the minimum is {MIN_SIZE}")]
    InvalidConfiguration(usize),
    #[error("no path from entrance to exit")]
    PathNotFound,
    #[error("unexpected character {0:?} at row {1}, col {2}")]
    UnexpectedGlyph(char, usize, usize),
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Location on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Contents of a single grid cell
///
/// `Entrance` and `Exit` are display markers over otherwise-open cells; they
/// do not change traversability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Wall,
    Open,
    Entrance,
    Exit,
}

impl CellState {
    /// Character shown for this state on the text display.
    pub fn glyph(self) -> char {
        match self {
            CellState::Wall => '#',
            CellState::Open => ' ',
            CellState::Entrance => 'P',
            CellState::Exit => 'E',
        }
    }

    fn from_glyph(c: char) -> Option<Self> {
        match c {
            '#' => Some(CellState::Wall),
            ' ' => Some(CellState::Open),
            'P' => Some(CellState::Entrance),
            'E' => Some(CellState::Exit),
            _ => None,
        }
    }
}

/// Bordered square maze grid
///
/// Cells are held in a contiguous row-major buffer. The outermost row and
/// column on every side are border cells and stay [`CellState::Wall`] for the
/// lifetime of the grid; the only mutation entry points are carving (during
/// generation) and [`Grid::move_player`] (during animation), and both are
/// restricted to interior cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimension: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Up, down, left, right. This order fixes the breadth-first tie-break
    /// and the opposite-cell choice during generation.
    const DIRECTIONS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// All-wall grid of `dimension` x `dimension` cells.
    pub(crate) fn walled(dimension: usize) -> Self {
        Self {
            dimension,
            cells: vec![CellState::Wall; dimension * dimension],
        }
    }

    /// Parse a grid from its display glyphs (`#`, space, `P`, `E`)
    ///
    /// The input is one line per row, without the trailing border column that
    /// [`Grid::display_string`] appends. Returns an error on unknown
    /// characters or when a row length differs from the row count.
    ///
    /// # Examples
    /// ```
    /// use maze_walk::Grid;
    ///
    /// let grid = Grid::parse_glyphs("#####\n#P  #\n#   #\n#  E#\n#####").unwrap();
    /// assert_eq!(grid.dimension(), 5);
    /// ```
    pub fn parse_glyphs(text: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = text.lines().collect();
        let dimension = lines.len();
        let mut cells = Vec::with_capacity(dimension * dimension);

        for (row, line) in lines.iter().enumerate() {
            let mut width = 0;
            for (col, c) in line.chars().enumerate() {
                let state =
                    CellState::from_glyph(c).ok_or(MazeError::UnexpectedGlyph(c, row, col))?;
                cells.push(state);
                width += 1;
            }
            if width != dimension {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: dimension,
                    actual: width,
                });
            }
        }
        Ok(Self { dimension, cells })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fixed entrance cell, one step inside the top-left border corner.
    pub fn entrance(&self) -> Cell {
        Cell::new(1, 1)
    }

    /// Fixed exit cell, one step inside the bottom-right border corner.
    pub fn exit(&self) -> Cell {
        Cell::new(self.dimension - 2, self.dimension - 2)
    }

    pub fn state(&self, cell: Cell) -> CellState {
        self.cells[self.index(cell)]
    }

    fn index(&self, cell: Cell) -> usize {
        assert!(
            cell.row < self.dimension && cell.col < self.dimension,
            "cell ({}, {}) outside grid of dimension {}",
            cell.row,
            cell.col,
            self.dimension
        );
        cell.row * self.dimension + cell.col
    }

    pub(crate) fn is_interior(&self, cell: Cell) -> bool {
        (1..self.dimension - 1).contains(&cell.row)
            && (1..self.dimension - 1).contains(&cell.col)
    }

    /// In-bounds 4-directional neighbors, in up/down/left/right order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Self::DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row as i64 + dr;
            let col = cell.col as i64 + dc;
            if row >= 0
                && col >= 0
                && (row as usize) < self.dimension
                && (col as usize) < self.dimension
            {
                Some(Cell::new(row as usize, col as usize))
            } else {
                None
            }
        })
    }

    /// Turn an interior wall cell into an open one.
    pub(crate) fn carve(&mut self, cell: Cell) {
        debug_assert!(self.is_interior(cell), "carving into the border");
        let i = self.index(cell);
        self.cells[i] = CellState::Open;
    }

    pub(crate) fn mark(&mut self, cell: Cell, state: CellState) {
        debug_assert!(self.is_interior(cell), "marking the border");
        let i = self.index(cell);
        self.cells[i] = state;
    }

    /// Relocate the player marker: the old cell reverts to open, the new cell
    /// becomes the entrance marker.
    pub fn move_player(&mut self, from: Cell, to: Cell) {
        self.mark(from, CellState::Open);
        self.mark(to, CellState::Entrance);
    }

    /// Full-frame text dump of the grid
    ///
    /// Emits `dimension + 1` rows of `dimension + 1` characters: every row
    /// carries a trailing border `#`, and a closing all-`#` row is appended.
    pub fn display_string(&self) -> String {
        (0..self.dimension)
            .map(|row| {
                (0..self.dimension)
                    .map(|col| self.state(Cell::new(row, col)).glyph())
                    .chain(std::iter::once('#'))
                    .collect::<String>()
            })
            .chain(std::iter::once("#".repeat(self.dimension + 1)))
            .join("\n")
    }
}

/// Find the shortest path between two open cells with breadth-first search
///
/// The returned path runs from `start` to `end` inclusive and is shortest by
/// step count; ties are broken by the fixed up/down/left/right neighbor
/// order, so the result is deterministic for a given grid. Fails with
/// [`MazeError::PathNotFound`] when `end` is not reachable.
pub fn shortest_path(grid: &Grid, start: Cell, end: Cell) -> Result<Vec<Cell>, MazeError> {
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    let mut predecessors: HashMap<Cell, Cell> = HashMap::new();

    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            let mut path = vec![current];
            let mut cell = current;
            while let Some(&previous) = predecessors.get(&cell) {
                path.push(previous);
                cell = previous;
            }
            path.reverse();
            return Ok(path);
        }

        for neighbor in grid.neighbors(current) {
            if !visited.contains(&neighbor) && grid.state(neighbor) != CellState::Wall {
                visited.insert(neighbor);
                predecessors.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }
    Err(MazeError::PathNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN_ROOM: &str = "\
#####
#P  #
#   #
#  E#
#####";

    #[test]
    fn parse_open_room() {
        let grid = Grid::parse_glyphs(OPEN_ROOM).unwrap();

        assert_eq!(grid.dimension(), 5);
        assert_eq!(grid.state(Cell::new(1, 1)), CellState::Entrance);
        assert_eq!(grid.state(Cell::new(3, 3)), CellState::Exit);
        assert_eq!(grid.state(Cell::new(2, 2)), CellState::Open);
        assert_eq!(grid.state(Cell::new(0, 0)), CellState::Wall);
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let result = Grid::parse_glyphs("###\n#X#\n###");
        assert_eq!(result, Err(MazeError::UnexpectedGlyph('X', 1, 1)));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let result = Grid::parse_glyphs("###\n##\n###");
        assert_eq!(
            result,
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn neighbors_follow_fixed_order_and_bounds() {
        let grid = Grid::walled(5);

        let corner: Vec<Cell> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);

        let inner: Vec<Cell> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            inner,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );
    }

    #[test]
    fn bfs_finds_true_shortest_path_in_open_room() {
        let grid = Grid::parse_glyphs(OPEN_ROOM).unwrap();
        let path = shortest_path(&grid, grid.entrance(), grid.exit()).unwrap();

        // Manhattan distance in an unobstructed room: 4 steps, 5 cells.
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Cell::new(1, 1));
        assert_eq!(path[4], Cell::new(3, 3));
        for pair in path.windows(2) {
            let steps = pair[0].row.abs_diff(pair[1].row) + pair[0].col.abs_diff(pair[1].col);
            assert_eq!(steps, 1);
        }
    }

    #[test]
    fn bfs_is_deterministic() {
        let grid = Grid::parse_glyphs(OPEN_ROOM).unwrap();
        let first = shortest_path(&grid, grid.entrance(), grid.exit()).unwrap();
        let second = shortest_path(&grid, grid.entrance(), grid.exit()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bfs_reports_missing_path() {
        let walled_off = "\
#####
#P# #
# # #
# #E#
#####";
        let grid = Grid::parse_glyphs(walled_off).unwrap();
        let result = shortest_path(&grid, grid.entrance(), grid.exit());
        assert_eq!(result, Err(MazeError::PathNotFound));
    }

    #[test]
    fn display_appends_border_row_and_column() {
        let grid = Grid::parse_glyphs(OPEN_ROOM).unwrap();
        let expected = "\
######
#P  ##
#   ##
#  E##
######
######";
        assert_eq!(grid.display_string(), expected);
    }

    #[test]
    fn display_is_idempotent() {
        let grid = Grid::parse_glyphs(OPEN_ROOM).unwrap();
        assert_eq!(grid.display_string(), grid.display_string());
    }

    #[test]
    fn move_player_swaps_marker_for_open() {
        let mut grid = Grid::parse_glyphs(OPEN_ROOM).unwrap();
        grid.move_player(Cell::new(1, 1), Cell::new(1, 2));

        assert_eq!(grid.state(Cell::new(1, 1)), CellState::Open);
        assert_eq!(grid.state(Cell::new(1, 2)), CellState::Entrance);
    }
}
