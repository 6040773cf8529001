use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Cell, CellId, FREE_CELL_INDEX, FREE_CELL_MARKER};

/// Side length of the card.
pub const GRID_SIDE: usize = 5;

/// Total number of cells on the card.
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// How many cells the player has to fill in before the game can start.
/// Everything except the free cell.
pub const REQUIRED_LABELS: usize = GRID_CELLS - 1;

/// A 5×5 bingo card.
///
/// Cells are stored row-major, indices 0..25. The cell at index 12 is the
/// free cell: it is always checked, always carries the marker value, and
/// never moves. Everything that mutates a card goes through the methods
/// here; persisting the result afterwards is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An empty card: no labels, nothing checked except the free cell.
    pub fn new() -> Self {
        Self::with_labels::<&str>(&[])
    }

    /// Builds a card from a label sequence.
    ///
    /// A sequence of 24 or fewer labels fills the non-free cells in card
    /// order, so label `k` ends up on the `k`-th square the player can
    /// write on. Missing labels default to the empty string.
    ///
    /// A sequence of 25 or more labels is treated as a full card export
    /// (see [`Grid::export_labels`]) and addresses positions directly;
    /// the entry for the center is ignored, since the free cell keeps its
    /// marker either way. Surplus entries are dropped.
    pub fn with_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let full_export = labels.len() >= GRID_CELLS;
        let mut cells = Vec::with_capacity(GRID_CELLS);
        let mut next_label = 0;
        for index in 0..GRID_CELLS {
            let id = CellId(index as u32);
            if index == FREE_CELL_INDEX {
                cells.push(Cell::free(id));
                if full_export {
                    next_label += 1;
                }
                continue;
            }
            let label = labels.get(next_label).map(|s| s.as_ref()).unwrap_or("");
            cells.push(Cell::labeled(id, label));
            next_label += 1;
        }
        Grid { cells }
    }

    /// All 25 cells in card order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Looks up a cell by id.
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.id == id)
    }

    /// Replaces the label of the matching cell.
    ///
    /// Unknown ids and the free cell are ignored. The checked flag is
    /// never touched.
    pub fn set_value(&mut self, id: CellId, value: impl Into<String>) {
        if let Some((index, cell)) = self.find_mut(id) {
            if index != FREE_CELL_INDEX {
                cell.value = value.into();
            }
        }
    }

    /// Flips the checked flag of the matching cell.
    ///
    /// Unknown ids are ignored, and the free cell stays checked no matter
    /// what.
    pub fn toggle(&mut self, id: CellId) {
        if let Some((index, cell)) = self.find_mut(id) {
            if index != FREE_CELL_INDEX {
                cell.checked = !cell.checked;
            }
        }
    }

    /// Redistributes the 24 player cells uniformly at random.
    ///
    /// `SliceRandom::shuffle` is a Fisher–Yates shuffle, so every
    /// permutation of the player cells is equally likely. The free cell
    /// never moves.
    pub fn shuffle(&mut self, rng: &mut StdRng) {
        let free = self.cells.remove(FREE_CELL_INDEX);
        self.cells.shuffle(rng);
        self.cells.insert(FREE_CELL_INDEX, free);
    }

    /// Clears the card back to a fresh, empty generation.
    pub fn reset(&mut self) {
        *self = Grid::new();
    }

    /// Rebuilds the card with the same labels but a fresh generation:
    /// new ids, all checks cleared except the free cell. This is what
    /// going back to setup does.
    pub fn rebuilt(&self) -> Grid {
        let values: Vec<&str> = self.cells.iter().map(|cell| cell.value.as_str()).collect();
        Grid::with_labels(&values)
    }

    /// Number of player cells that carry a non-blank label.
    pub fn labeled_count(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(index, cell)| index != FREE_CELL_INDEX && cell.has_label())
            .count()
    }

    /// The card can be played once every player cell has a label.
    pub fn is_ready(&self) -> bool {
        self.labeled_count() == REQUIRED_LABELS
    }

    /// Trimmed labels of all 25 cells in card order.
    ///
    /// This is the payload a share link carries; feeding it back into
    /// [`Grid::with_labels`] reproduces the card.
    pub fn export_labels(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.value.trim().to_string())
            .collect()
    }

    fn find_mut(&mut self, id: CellId) -> Option<(usize, &mut Cell)> {
        self.cells
            .iter_mut()
            .enumerate()
            .find(|(_, cell)| cell.id == id)
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut cells = Vec::<Cell>::deserialize(deserializer)?;
        if cells.len() != GRID_CELLS {
            return Err(D::Error::invalid_length(cells.len(), &"exactly 25 cells"));
        }
        // Re-establish the free cell invariant, whatever was stored.
        cells[FREE_CELL_INDEX].checked = true;
        cells[FREE_CELL_INDEX].value = String::from(FREE_CELL_MARKER);
        Ok(Grid { cells })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::{CheckedGrid, LabelList};

    #[test]
    fn fresh_card_shape() {
        let grid = Grid::new();
        assert_eq!(grid.cells().len(), GRID_CELLS);
        let free = &grid.cells()[FREE_CELL_INDEX];
        assert!(free.checked);
        assert_eq!(free.value, FREE_CELL_MARKER);
        assert!(grid
            .cells()
            .iter()
            .enumerate()
            .all(|(index, cell)| index == FREE_CELL_INDEX || !cell.checked));
        assert_eq!(grid.labeled_count(), 0);
    }

    #[test]
    fn labels_fill_player_cells_in_order() {
        let grid = Grid::with_labels(&["a", "b"]);
        assert_eq!(grid.cells()[0].value, "a");
        assert_eq!(grid.cells()[1].value, "b");
        assert_eq!(grid.cells()[2].value, "");
    }

    #[test]
    fn labels_skip_the_free_cell() {
        let labels: Vec<String> = (0..REQUIRED_LABELS).map(|i| format!("label {i}")).collect();
        let grid = Grid::with_labels(&labels);
        assert_eq!(grid.cells()[11].value, "label 11");
        assert_eq!(grid.cells()[FREE_CELL_INDEX].value, FREE_CELL_MARKER);
        assert_eq!(grid.cells()[13].value, "label 12");
        assert_eq!(grid.cells()[24].value, "label 23");
        assert!(grid.is_ready());
    }

    #[test]
    fn full_export_addresses_cells_directly() {
        let labels: Vec<String> = (0..GRID_CELLS).map(|i| format!("label {i}")).collect();
        let grid = Grid::with_labels(&labels);
        assert_eq!(grid.cells()[11].value, "label 11");
        assert_eq!(grid.cells()[FREE_CELL_INDEX].value, FREE_CELL_MARKER);
        assert_eq!(grid.cells()[13].value, "label 13");
        assert_eq!(grid.cells()[24].value, "label 24");
    }

    #[test]
    fn ids_are_unique() {
        let grid = Grid::new();
        let ids: BTreeSet<CellId> = grid.cells().iter().map(|cell| cell.id).collect();
        assert_eq!(ids.len(), GRID_CELLS);
    }

    #[test]
    fn set_value_targets_by_id() {
        let mut grid = Grid::new();
        let id = grid.cells()[3].id;
        grid.set_value(id, "hello");
        assert_eq!(grid.cells()[3].value, "hello");
        assert!(!grid.cells()[3].checked);
        // An id from a previous generation hits nothing.
        grid.set_value(CellId(999), "nope");
        assert!(grid.cells().iter().all(|cell| cell.value != "nope"));
    }

    #[test]
    fn set_value_spares_the_free_cell() {
        let mut grid = Grid::new();
        let id = grid.cells()[FREE_CELL_INDEX].id;
        grid.set_value(id, "scribble");
        assert_eq!(grid.cells()[FREE_CELL_INDEX].value, FREE_CELL_MARKER);
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut grid = Grid::new();
        let id = grid.cells()[7].id;
        grid.toggle(id);
        assert!(grid.cells()[7].checked);
        grid.toggle(id);
        assert!(!grid.cells()[7].checked);
    }

    #[test]
    fn toggle_on_the_free_cell_is_a_noop() {
        let mut grid = Grid::new();
        let id = grid.cells()[FREE_CELL_INDEX].id;
        grid.toggle(id);
        assert!(grid.cells()[FREE_CELL_INDEX].checked);
    }

    #[test]
    fn ready_needs_every_player_cell() {
        let mut labels: Vec<String> = (0..REQUIRED_LABELS).map(|i| format!("label {i}")).collect();
        labels[17] = String::from("   ");
        let grid = Grid::with_labels(&labels);
        assert_eq!(grid.labeled_count(), 23);
        assert!(!grid.is_ready());
    }

    #[test]
    fn rebuilt_keeps_labels_and_clears_checks() {
        let labels: Vec<String> = (0..REQUIRED_LABELS).map(|i| format!("label {i}")).collect();
        let mut grid = Grid::with_labels(&labels);
        grid.toggle(grid.cells()[0].id);
        grid.toggle(grid.cells()[24].id);

        let rebuilt = grid.rebuilt();
        assert_eq!(rebuilt.export_labels(), grid.export_labels());
        assert!(rebuilt
            .cells()
            .iter()
            .enumerate()
            .all(|(index, cell)| cell.checked == (index == FREE_CELL_INDEX)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut grid = Grid::with_labels(&["a", "b", "c"]);
        grid.toggle(grid.cells()[0].id);
        grid.reset();
        assert_eq!(grid.labeled_count(), 0);
        assert!(!grid.cells()[0].checked);
    }

    #[test]
    fn serde_round_trip() {
        let mut grid = Grid::with_labels(&["a", "b"]);
        grid.toggle(grid.cells()[1].id);
        let json = serde_json::to_string(&grid).unwrap();
        let restored: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn deserialize_rejects_wrong_length() {
        let json = serde_json::to_string(&Grid::new().cells()[..7]).unwrap();
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    quickcheck! {
        fn label_k_lands_on_the_kth_player_cell(labels: LabelList) -> bool {
            let grid = Grid::with_labels(&labels.0);
            let player_values: Vec<&str> = grid
                .cells()
                .iter()
                .enumerate()
                .filter(|&(index, _)| index != FREE_CELL_INDEX)
                .map(|(_, cell)| cell.value.as_str())
                .collect();
            player_values.iter().enumerate().all(|(k, &value)| {
                match labels.0.get(k) {
                    Some(label) => value == label,
                    None => value.is_empty(),
                }
            })
        }

        fn shuffle_is_a_permutation(input: CheckedGrid, seed: u64) -> bool {
            let mut shuffled = input.0.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            shuffled.shuffle(&mut rng);

            let player_cells = |grid: &Grid| {
                let mut cells: Vec<Cell> = grid
                    .cells()
                    .iter()
                    .enumerate()
                    .filter(|&(index, _)| index != FREE_CELL_INDEX)
                    .map(|(_, cell)| cell.clone())
                    .collect();
                cells.sort_by_key(|cell| cell.id);
                cells
            };
            player_cells(&shuffled) == player_cells(&input.0)
                && shuffled.cells()[FREE_CELL_INDEX] == input.0.cells()[FREE_CELL_INDEX]
        }
    }
}
