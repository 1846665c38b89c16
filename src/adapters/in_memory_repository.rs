//! In-memory table repository for testing.
//!
//! Keeps encoded tables in a shared map so tests exercise the same
//! MessagePack encoding as the on-disk adapter without touching the file
//! system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::TableRepository, q_learning::SavedQTable};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use cheeseboard::adapters::InMemoryRepository;
/// use cheeseboard::gridworld::Board;
/// use cheeseboard::ports::TableRepository;
/// use cheeseboard::q_learning::{Hyperparameters, QTable, SavedQTable};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let saved = SavedQTable::new(&QTable::new(), &Board::standard(), Hyperparameters::default());
///
/// repo.save(&saved, Path::new("brain"))?;
/// let loaded = repo.load(Path::new("brain"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), cheeseboard::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map only means another test thread panicked mid-insert.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Raw stored bytes, for byte-level comparisons in tests.
    pub fn bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.storage().get(&path.to_string_lossy().to_string()).cloned()
    }

    /// Store arbitrary bytes at `path`, e.g. to simulate a damaged file.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage()
            .insert(path.to_string_lossy().to_string(), bytes);
    }

    /// Clear all stored tables.
    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl TableRepository for InMemoryRepository {
    fn exists(&self, path: &Path) -> bool {
        self.storage()
            .contains_key(&path.to_string_lossy().to_string())
    }

    fn save(&self, table: &SavedQTable, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(table).map_err(|e| Error::SerializationContext {
            operation: "serialize value table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;
        self.insert_raw(path, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQTable> {
        let bytes = self.bytes(path).ok_or_else(|| Error::MissingCache {
            path: path.to_path_buf(),
        })?;

        rmp_serde::from_slice(&bytes).map_err(|e| Error::CorruptCache {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
