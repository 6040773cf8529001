use crate::{Grid, FREE_CELL_INDEX, GRID_SIDE};

const CELL_WIDTH: usize = 12;

/// Renders the card as plain text, one line per card row.
///
/// Checked cells get a filled marker, the free cell a star, and labels are
/// truncated to the cell width.
pub fn visualize_card(grid: &Grid) -> String {
    let mut result = String::from("╭");
    for col in 0..GRID_SIDE {
        result += &"─".repeat(CELL_WIDTH);
        result.push(if col + 1 == GRID_SIDE { '╮' } else { '┬' });
    }
    for row in 0..GRID_SIDE {
        result += "\n│";
        for col in 0..GRID_SIDE {
            let index = row * GRID_SIDE + col;
            let cell = &grid.cells()[index];
            let marker = if index == FREE_CELL_INDEX {
                '★'
            } else if cell.checked {
                '■'
            } else {
                '□'
            };
            let label: String = if index == FREE_CELL_INDEX {
                String::new()
            } else {
                cell.value.trim().chars().take(CELL_WIDTH - 4).collect()
            };
            result += &format!("{marker} {label:<width$}│", width = CELL_WIDTH - 2);
        }
    }
    result += "\n╰";
    for col in 0..GRID_SIDE {
        result += &"─".repeat(CELL_WIDTH);
        result.push(if col + 1 == GRID_SIDE { '╯' } else { '┴' });
    }
    result
}
