use crate::*;
pub use random::*;

mod random;

/// Commits bombs to `board` following `permutation`, a shuffled `0..rows*columns`.
///
/// Each value `v` maps to `(v / columns, v % columns)`. The `exclude` position (the first click)
/// is skipped without counting against `bombs_count`. Returns how many bombs were placed.
pub fn place_bombs(
    board: &mut Board,
    bombs_count: CellCount,
    exclude: Position,
    permutation: &[usize],
) -> CellCount {
    let columns = board.columns();
    let mut placed: CellCount = 0;

    for &value in permutation {
        if placed >= bombs_count {
            break;
        }

        let Some(pos) = Position::from_index(value, columns).filter(|&p| board.is_valid_position(p))
        else {
            log::warn!("Random source yielded {value}, outside of the board, skipping");
            continue;
        };

        if pos == exclude {
            continue;
        }

        let cell = board[pos];
        if cell.is_bomb() {
            log::warn!("Random source repeated {value}, skipping");
            continue;
        }

        board[pos] = cell.with_bomb();
        placed += 1;
    }

    if placed != bombs_count {
        log::warn!(
            "Bomb placement count mismatch, actual: {}, requested: {}",
            placed,
            bombs_count
        );
    }

    placed
}
