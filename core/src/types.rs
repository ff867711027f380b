use core::fmt;

use serde::{Deserialize, Serialize};

/// Signed coordinate used by positions, so out-of-range client input stays representable.
pub type Coord = i32;

/// Board width or height.
pub type Dim = u16;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u32;

pub const fn mult(a: Dim, b: Dim) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// A `(row, column)` pair on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub column: Coord,
}

impl Position {
    pub const fn new(row: Coord, column: Coord) -> Self {
        Self { row, column }
    }

    /// Maps a flat cell index to a position, row-major.
    pub fn from_index(index: usize, columns: Dim) -> Option<Self> {
        let columns = usize::from(columns);
        if columns == 0 {
            return None;
        }
        let row = Coord::try_from(index / columns).ok()?;
        let column = Coord::try_from(index % columns).ok()?;
        Some(Self { row, column })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    /// Only meaningful for positions already checked against the board bounds.
    fn to_nd_index(self) -> Self::Output {
        [self.row as usize, self.column as usize]
    }
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Position, delta: (Coord, Coord), bounds: (Dim, Dim)) -> Option<Position> {
    let (dr, dc) = delta;
    let (rows, columns) = bounds;

    let row = pos.row.checked_add(dr)?;
    if row < 0 || row >= Coord::from(rows) {
        return None;
    }

    let column = pos.column.checked_add(dc)?;
    if column < 0 || column >= Coord::from(columns) {
        return None;
    }

    Some(Position { row, column })
}

/// Moore neighborhood of a position, clipped to the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Position,
    bounds: (Dim, Dim),
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Position, bounds: (Dim, Dim)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
