use serde::{Deserialize, Serialize};

/// Canonical state of a single board cell: ground (empty or bomb) crossed with visibility.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    EmptyCovered,
    EmptyCoveredMarked,
    EmptyRevealed,
    BombCovered,
    BombCoveredMarked,
    /// Only reachable by losing.
    BombRevealed,
}

impl Cell {
    pub const ALL: [Cell; 6] = [
        Cell::EmptyCovered,
        Cell::EmptyCoveredMarked,
        Cell::EmptyRevealed,
        Cell::BombCovered,
        Cell::BombCoveredMarked,
        Cell::BombRevealed,
    ];

    pub const fn is_bomb(self) -> bool {
        matches!(
            self,
            Self::BombCovered | Self::BombCoveredMarked | Self::BombRevealed
        )
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::EmptyCoveredMarked | Self::BombCoveredMarked)
    }

    pub const fn is_covered_bomb(self) -> bool {
        matches!(self, Self::BombCovered | Self::BombCoveredMarked)
    }

    /// Flag toggle; `None` for revealed cells, which cannot be marked.
    pub const fn toggled_mark(self) -> Option<Self> {
        match self {
            Self::EmptyCovered => Some(Self::EmptyCoveredMarked),
            Self::EmptyCoveredMarked => Some(Self::EmptyCovered),
            Self::BombCovered => Some(Self::BombCoveredMarked),
            Self::BombCoveredMarked => Some(Self::BombCovered),
            Self::EmptyRevealed | Self::BombRevealed => None,
        }
    }

    /// Same visibility, bomb ground.
    pub const fn with_bomb(self) -> Self {
        match self {
            Self::EmptyCovered => Self::BombCovered,
            Self::EmptyCoveredMarked => Self::BombCoveredMarked,
            Self::EmptyRevealed => Self::BombRevealed,
            other => other,
        }
    }

    /// What a client is allowed to see: covered bombs look like covered empty ground.
    pub const fn hidden(self) -> Self {
        match self {
            Self::BombCovered => Self::EmptyCovered,
            Self::BombCoveredMarked => Self::EmptyCoveredMarked,
            other => other,
        }
    }

    pub const fn code(self) -> char {
        match self {
            Self::EmptyCovered => 'e',
            Self::EmptyCoveredMarked => 'X',
            Self::EmptyRevealed => 'E',
            Self::BombCovered => 'b',
            Self::BombCoveredMarked => 'Y',
            Self::BombRevealed => 'B',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'e' => Self::EmptyCovered,
            'X' => Self::EmptyCoveredMarked,
            'E' => Self::EmptyRevealed,
            'b' => Self::BombCovered,
            'Y' => Self::BombCoveredMarked,
            'B' => Self::BombRevealed,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_a_mark_twice_is_identity() {
        for cell in [Cell::EmptyCovered, Cell::BombCovered] {
            let marked = cell.toggled_mark().unwrap();
            assert!(marked.is_marked());
            assert_eq!(marked.toggled_mark(), Some(cell));
        }
    }

    #[test]
    fn revealed_cells_cannot_be_marked() {
        assert_eq!(Cell::EmptyRevealed.toggled_mark(), None);
        assert_eq!(Cell::BombRevealed.toggled_mark(), None);
    }

    #[test]
    fn hiding_keeps_visibility_and_drops_ground() {
        assert_eq!(Cell::BombCovered.hidden(), Cell::EmptyCovered);
        assert_eq!(Cell::BombCoveredMarked.hidden(), Cell::EmptyCoveredMarked);
        assert_eq!(Cell::BombRevealed.hidden(), Cell::BombRevealed);
        assert_eq!(Cell::EmptyRevealed.hidden(), Cell::EmptyRevealed);
    }

    #[test]
    fn codes_round_trip() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_code(cell.code()), Some(cell));
        }
        assert_eq!(Cell::from_code('?'), None);
    }
}
