use std::collections::BTreeMap;

use crate::board::{Board, Status, Task};

use super::{KeyValueStore, Result};

/// Key the board snapshot is stored under
pub const STORAGE_KEY: &str = "taskManagerTasks";

/// Column status -> task texts, top to bottom
pub type Snapshot = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
#[error("stored board is not a map of task lists: {0}")]
pub struct SnapshotError(#[from] serde_json::Error);

/// Decode a stored snapshot entry
pub fn decode_snapshot(raw: &str) -> std::result::Result<Snapshot, SnapshotError> {
    Ok(serde_json::from_str(raw)?)
}

/// Saves and restores a [`Board`] through a [`KeyValueStore`]
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Build the status -> texts mapping from the model, columns in display order
    pub fn snapshot(board: &Board) -> Snapshot {
        board
            .columns()
            .iter()
            .map(|c| (c.status().as_str().to_string(), c.texts()))
            .collect()
    }

    /// Write the whole board as one entry under [`STORAGE_KEY`]
    pub fn save(&mut self, board: &Board) -> Result<()> {
        let encoded = serde_json::to_string(&Self::snapshot(board))?;
        self.store.set(STORAGE_KEY, &encoded)?;
        tracing::debug!(tasks = board.len(), "board saved");
        Ok(())
    }

    /// Rebuild the board from the stored entry.
    ///
    /// Missing, unreadable, and malformed entries all yield an empty board. Keys that do not
    /// name a column are skipped, as are blank task texts.
    pub fn load(&self) -> Board {
        let mut board = Board::new();

        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("no saved board, starting empty");
                return board;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read saved board, starting empty");
                return board;
            }
        };

        let snapshot = match decode_snapshot(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "saved board is malformed, starting empty");
                return board;
            }
        };

        for (key, texts) in &snapshot {
            let Some(status) = Status::from_str(key) else {
                tracing::debug!(key = key.as_str(), "ignoring unknown column in saved board");
                continue;
            };
            for text in texts {
                if let Some(task) = Task::new(text) {
                    board.push_task(status, task);
                }
            }
        }

        tracing::info!(
            todo = board.column(Status::Todo).len(),
            doing = board.column(Status::Doing).len(),
            done = board.column(Status::Done).len(),
            "board loaded"
        );
        board
    }
}
