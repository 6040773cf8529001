use bingo::{
    extract_payload, import_labels, share_url, Grid, Phase, FREE_CELL_INDEX, GRID_CELLS, GRID_SIDE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::store::Store;

/// Modal state layered over the card.
pub enum Overlay {
    None,
    /// Reset wipes the card, so it asks first.
    ConfirmReset,
    /// The share link, shown until any key is pressed.
    Share(String),
}

/// The controller that owns the card.
///
/// Every mutation goes through a method here, and every method that changes
/// the grid saves it to the store before returning.
pub struct App {
    pub grid: Grid,
    pub phase: Phase,
    /// Position of the selected cell.
    pub cursor: usize,
    /// Persistent inline message, currently only used for import errors.
    pub notice: Option<String>,
    pub overlay: Overlay,
    pub should_quit: bool,
    share_base: String,
    store: Store,
    rng: StdRng,
}

impl App {
    /// Loads the card, preferring a share link over the stored state.
    ///
    /// This is the one-shot startup step: a well-formed link seeds a fresh
    /// card and overwrites whatever was persisted; a broken one leaves the
    /// stored card alone and surfaces the error as an inline notice.
    pub fn new(
        store: Store,
        import: Option<&str>,
        share_base: &str,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let mut notice = None;
        let imported = import.and_then(|link| {
            let payload = extract_payload(link)?;
            match import_labels(payload) {
                Ok(labels) => Some(Grid::with_labels(&labels)),
                Err(err) => {
                    warn!(%err, "Could not import the shared card");
                    notice = Some(err.to_string());
                    None
                }
            }
        });

        let grid = match imported {
            Some(grid) => {
                store.save(&grid)?;
                info!("Imported a shared card");
                grid
            }
            None => store.load()?.unwrap_or_default(),
        };

        Ok(Self {
            grid,
            phase: Phase::Setup,
            cursor: 0,
            notice,
            overlay: Overlay::None,
            should_quit: false,
            share_base: String::from(share_base),
            store,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match self.overlay {
            Overlay::ConfirmReset => {
                if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
                    self.overlay = Overlay::None;
                    self.reset()?;
                } else {
                    self.overlay = Overlay::None;
                }
                Ok(())
            }
            Overlay::Share(_) => {
                self.overlay = Overlay::None;
                Ok(())
            }
            Overlay::None => match self.phase {
                Phase::Setup => self.handle_setup_key(key),
                Phase::Playing => self.handle_play_key(key),
            },
        }
    }

    /// During setup, plain keys type into the selected cell and the
    /// actions hide behind Ctrl so they cannot collide with the text.
    fn handle_setup_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.start(),
                KeyCode::Char('f') => self.shuffle()?,
                KeyCode::Char('r') => self.overlay = Overlay::ConfirmReset,
                KeyCode::Char('o') => self.share(),
                _ => {}
            }
            return Ok(());
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Tab => self.cursor = (self.cursor + 1) % GRID_CELLS,
            KeyCode::BackTab => self.cursor = (self.cursor + GRID_CELLS - 1) % GRID_CELLS,
            KeyCode::Backspace => self.edit_selected(|value| {
                value.pop();
            })?,
            KeyCode::Char(c) => self.edit_selected(|value| value.push(c))?,
            _ => {}
        }
        Ok(())
    }

    fn handle_play_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('e') => self.back_to_setup()?,
            KeyCode::Char('r') => self.overlay = Overlay::ConfirmReset,
            KeyCode::Char('s') => self.share(),
            _ => {}
        }
        Ok(())
    }

    fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let row = (self.cursor / GRID_SIDE) as isize;
        let col = (self.cursor % GRID_SIDE) as isize;
        let side = GRID_SIDE as isize;
        let row = (row + row_delta).rem_euclid(side);
        let col = (col + col_delta).rem_euclid(side);
        self.cursor = (row * side + col) as usize;
    }

    fn edit_selected(&mut self, edit: impl FnOnce(&mut String)) -> anyhow::Result<()> {
        if self.cursor == FREE_CELL_INDEX {
            return Ok(());
        }
        let cell = &self.grid.cells()[self.cursor];
        let id = cell.id;
        let mut value = cell.value.clone();
        edit(&mut value);
        self.grid.set_value(id, value);
        self.store.save(&self.grid)
    }

    fn toggle_selected(&mut self) -> anyhow::Result<()> {
        let id = self.grid.cells()[self.cursor].id;
        let had_bingo = self.grid.has_bingo(self.phase);
        self.grid.toggle(id);
        if !had_bingo && self.grid.has_bingo(self.phase) {
            info!("BINGO");
        }
        self.store.save(&self.grid)
    }

    fn start(&mut self) {
        if self.grid.is_ready() {
            self.phase = Phase::Playing;
            info!("Game started");
        }
    }

    fn shuffle(&mut self) -> anyhow::Result<()> {
        self.grid.shuffle(&mut self.rng);
        self.store.save(&self.grid)
    }

    fn reset(&mut self) -> anyhow::Result<()> {
        self.grid.reset();
        self.phase = Phase::Setup;
        self.notice = None;
        info!("Card cleared");
        self.store.save(&self.grid)
    }

    /// Back to setup with the labels kept and the checks cleared. Doubles
    /// as "play again" after a win.
    fn back_to_setup(&mut self) -> anyhow::Result<()> {
        self.grid = self.grid.rebuilt();
        self.phase = Phase::Setup;
        self.store.save(&self.grid)
    }

    fn share(&mut self) {
        self.overlay = Overlay::Share(share_url(&self.share_base, &self.grid));
    }
}
