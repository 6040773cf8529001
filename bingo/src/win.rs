use crate::Grid;

/// Which stage of the game the card is in.
///
/// Labels can only change during setup, checks only during play, and a win
/// can only be declared during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
}

/// The 12 ways to win: 5 rows, 5 columns and both diagonals.
pub const LINES: [[usize; 5]; 12] = [
    // Rows
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    // Columns
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    // Diagonals
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

impl Grid {
    /// Whether any line is fully checked.
    ///
    /// Always `false` before the game has started, no matter what the
    /// checks say.
    pub fn has_bingo(&self, phase: Phase) -> bool {
        if phase != Phase::Playing {
            return false;
        }
        LINES
            .iter()
            .any(|line| line.iter().all(|&index| self.cells()[index].checked))
    }
}
