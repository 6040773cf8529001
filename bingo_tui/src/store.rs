use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bingo::Grid;
use tracing::{debug, warn};

/// The single persisted entry: one JSON file holding the serialized card.
///
/// A missing file means a first run, and an unreadable one is treated the
/// same way rather than taking the whole session down.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> anyhow::Result<Option<Grid>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read '{}'", self.path.display()))?;
        match serde_json::from_str(&contents) {
            Ok(grid) => {
                debug!(path = %self.path.display(), "Loaded card");
                Ok(Some(grid))
            }
            Err(err) => {
                warn!(%err, path = %self.path.display(), "Stored card is unreadable, starting over");
                Ok(None)
            }
        }
    }

    pub fn save(&self, grid: &Grid) -> anyhow::Result<()> {
        let contents = serde_json::to_string(grid)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Could not write '{}'", self.path.display()))?;
        debug!(path = %self.path.display(), "Saved card");
        Ok(())
    }
}
