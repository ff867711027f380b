use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Fixed-size grid of [`Cell`]s. Geometry and counting only, no game rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new_empty(rows: Dim, columns: Dim) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidSettings);
        }
        Ok(Self {
            cells: Array2::default([usize::from(rows), usize::from(columns)]),
        })
    }

    /// Parses rows of cell codes (see [`Cell::code`]), e.g. `["eeb", "EEe"]`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if height == 0 || width == 0 || height > usize::from(Dim::MAX) || width > usize::from(Dim::MAX)
        {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            let before = cells.len();
            for code in row.as_ref().chars() {
                cells.push(Cell::from_code(code).ok_or(GameError::InvalidBoardShape)?);
            }
            if cells.len() - before != width {
                return Err(GameError::InvalidBoardShape);
            }
        }

        let cells = Array2::from_shape_vec((height, width), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    pub fn rows(&self) -> Dim {
        // dimensions come from `Dim` values, see the constructors
        self.cells.dim().0 as Dim
    }

    pub fn columns(&self) -> Dim {
        self.cells.dim().1 as Dim
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows(), self.columns())
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_nd_index()]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_nd_index()] = cell;
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.column >= 0
            && pos.row < Coord::from(self.rows())
            && pos.column < Coord::from(self.columns())
    }

    pub fn validate_position(&self, pos: Position) -> Result<Position> {
        if self.is_valid_position(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Whether the cell at `pos` is any of `cells`.
    pub fn is(&self, pos: Position, cells: &[Cell]) -> bool {
        cells.contains(&self.get(pos))
    }

    pub fn iter_neighbors(&self, pos: Position) -> NeighborIter {
        NeighborIter::new(pos, (self.rows(), self.columns()))
    }

    /// Covered empty neighbors of `pos`, or nothing at all when any neighbor hides a bomb.
    ///
    /// A single adjacent bomb stops the cascade in every direction, not only its own.
    pub fn neighbors_if_no_bombs(&self, pos: Position) -> SmallVec<[Position; 8]> {
        let mut candidates = SmallVec::new();
        for neighbor in self.iter_neighbors(pos) {
            match self.get(neighbor) {
                cell if cell.is_covered_bomb() => return SmallVec::new(),
                Cell::EmptyCovered => candidates.push(neighbor),
                _ => {}
            }
        }
        candidates
    }

    pub fn count(&self, cell: Cell) -> CellCount {
        // bounded by `total_cells`, which fits
        self.cells.iter().filter(|&&c| c == cell).count() as CellCount
    }

    pub fn bomb_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_bomb()).count() as CellCount
    }

    /// Client-facing copy of the board with every covered bomb disguised as empty ground.
    pub fn hide_bombs(&self) -> Board {
        Self {
            cells: self.cells.map(|cell| cell.hidden()),
        }
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.cells[pos.to_nd_index()]
    }
}
