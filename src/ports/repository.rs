//! Repository port for value table persistence.
//!
//! This module defines the trait boundary between the learner and the
//! storage of trained tables ("brains").

use std::path::Path;

use crate::{Result, q_learning::SavedQTable};

/// Port for persisting and loading saved value tables.
///
/// Implementations only move bytes; checking that a table fits the current
/// board is left to the caller via [`SavedQTable::check`].
///
/// # Examples
///
/// ```no_run
/// use cheeseboard::adapters::MsgPackRepository;
/// use cheeseboard::ports::TableRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// if repo.exists(Path::new("mouse_brain.msgpack")) {
///     let saved = repo.load(Path::new("mouse_brain.msgpack"))?;
///     println!("format version {}", saved.version);
/// }
/// # Ok::<(), cheeseboard::Error>(())
/// ```
pub trait TableRepository {
    /// Whether a saved table exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, table: &SavedQTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns `MissingCache` if nothing is stored at `path`, and
    /// `CorruptCache` if the stored bytes cannot be decoded.
    fn load(&self, path: &Path) -> Result<SavedQTable>;
}
