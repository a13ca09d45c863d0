use crate::{
    Pos2,
    rule::{self, Transition},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised while acquiring the storage of a [`Universe`]
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("failed allocating row storage")]
    Rows(#[source] TryReserveError),
    #[error("failed allocating cell storage for row {row}")]
    Columns {
        row: usize,
        #[source]
        source: TryReserveError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
    transition: Transition,
}
impl Cell {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }
    #[inline]
    pub fn transition(&self) -> Transition {
        self.transition
    }
}

/// A fixed-size toroidal grid of cells evolving under Conway's rules
///
/// Every coordinate wraps around its dimension, so the grid has no edges:
/// the cell right of the last column is the first column of the same row.
#[derive(Debug, Clone)]
pub struct Universe {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Universe {
    /// Allocates a `rows` by `cols` universe with every cell dead
    ///
    /// Both dimensions must be positive.
    pub fn new(rows: usize, cols: usize) -> Result<Self, AllocationError> {
        debug_assert!(rows > 0 && cols > 0, "universe dimensions must be positive");

        let mut cells: Vec<Vec<Cell>> = Vec::new();
        cells
            .try_reserve_exact(rows)
            .map_err(AllocationError::Rows)?;
        for row in 0..rows {
            let mut line = Vec::new();
            line.try_reserve_exact(cols)
                .map_err(|source| AllocationError::Columns { row, source })?;
            line.resize(cols, Cell::default());
            cells.push(line);
        }

        log::debug!("allocated a {}x{} universe", cols, rows);
        Ok(Self { rows, cols, cells })
    }

    /// Frees the storage of this universe
    #[inline]
    pub fn release(self) {
        std::mem::drop(self);
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        let (row, col) = Pos2::new(row, col).wrap(self.rows, self.cols);
        self.cells[row][col]
    }
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).alive
    }
    /// Spawns or kills the cell at `(row, col)`, wrapping the coordinates
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) {
        let (row, col) = Pos2::new(row, col).wrap(self.rows, self.cols);
        self.cells[row][col].alive = alive;
    }

    /// Kills every cell
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.alive = false;
        }
    }

    /// Sets every cell alive or dead with equal odds
    ///
    /// Cells are visited in row-major order from a generator seeded with `seed`,
    /// so the same seed on the same dimensions always produces the same board.
    pub fn randomize(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for cell in self.cells.iter_mut().flatten() {
            cell.alive = rng.random_bool(0.5);
        }
    }

    /// Counts the live cells among the 8 toroidal neighbors of `(row, col)`
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        let center = Pos2::new(row, col);
        let mut count = 0;
        for offset in Pos2::NEIGHBORHOOD {
            let (r, c) = (center + offset).wrap(self.rows, self.cols);
            if self.cells[r][c].alive {
                count += 1;
            }
        }
        count
    }

    /// Whether no cell is alive anywhere in the universe
    pub fn is_extinct(&self) -> bool {
        !self.cells.iter().flatten().any(Cell::is_alive)
    }
    #[inline]
    pub fn has_life(&self) -> bool {
        !self.is_extinct()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.alive).count()
    }

    /// The positions of every live cell, sorted in row-major order
    pub fn alive_cells(&self) -> Vec<Pos2> {
        let mut alive = Vec::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if cell.alive {
                    alive.push(Pos2::new(row, col));
                }
            }
        }
        alive
    }

    /// Advances the universe by exactly one generation
    ///
    /// All cells must change simultaneously, so the update is split in two:
    /// every cell is first tagged with its pending [`Transition`] while the
    /// live states are untouched, then the tags are committed and cleared.
    pub fn evolve(&mut self) {
        self.decide();
        self.commit();
    }

    fn decide(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let neighbors = self.neighbor_count(row, col);
                let cell = &mut self.cells[row][col];
                cell.transition = rule::transition(cell.alive, neighbors);
            }
        }
    }

    fn commit(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            match cell.transition {
                Transition::Rising => cell.alive = true,
                Transition::Expiring => cell.alive = false,
                Transition::Stable => {}
            }
            cell.transition = Transition::Stable;
        }
    }
}
