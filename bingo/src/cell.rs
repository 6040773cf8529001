use serde::{Deserialize, Serialize};

/// Position of the free cell (row 2, col 2) on the 5×5 card.
pub const FREE_CELL_INDEX: usize = 12;

/// The value carried by the free cell.
pub const FREE_CELL_MARKER: &str = "O";

/// Identifies a cell within one card generation.
///
/// Ids travel with their cell through shuffles, so callers can target a cell
/// without depending on its current position. They are assigned from a
/// counter when the card is built and are only unique within that build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u32);

/// A single square on the bingo card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub checked: bool,
    pub value: String,
}

impl Cell {
    /// The permanently-checked center square.
    pub fn free(id: CellId) -> Self {
        Self {
            id,
            checked: true,
            value: String::from(FREE_CELL_MARKER),
        }
    }

    /// An unchecked square with the given label.
    pub fn labeled(id: CellId, value: impl Into<String>) -> Self {
        Self {
            id,
            checked: false,
            value: value.into(),
        }
    }

    /// Whether the label is non-blank after trimming.
    pub fn has_label(&self) -> bool {
        !self.value.trim().is_empty()
    }
}
