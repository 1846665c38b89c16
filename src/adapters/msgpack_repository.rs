//! MessagePack implementation of the table repository.
//!
//! This adapter implements the TableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::TableRepository, q_learning::SavedQTable};

/// MessagePack-based table repository.
///
/// # Examples
///
/// ```no_run
/// use cheeseboard::adapters::MsgPackRepository;
/// use cheeseboard::gridworld::Board;
/// use cheeseboard::ports::TableRepository;
/// use cheeseboard::q_learning::{Hyperparameters, QTable, SavedQTable};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let saved = SavedQTable::new(&QTable::new(), &Board::standard(), Hyperparameters::default());
///
/// repo.save(&saved, Path::new("mouse_brain.msgpack"))?;
/// let loaded = repo.load(Path::new("mouse_brain.msgpack"))?;
/// # Ok::<(), cheeseboard::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl TableRepository for MsgPackRepository {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn save(&self, table: &SavedQTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize value table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {}", path.display()),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQTable> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::MissingCache {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(Error::CorruptCache {
                    path: path.to_path_buf(),
                    reason: source.to_string(),
                });
            }
        };

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| Error::CorruptCache {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        gridworld::{Action, Board, Observation, Position},
        q_learning::{Hyperparameters, QTable},
    };

    fn sample_table() -> QTable {
        let mut table = QTable::new();
        let obs = Observation::new(Position::new(1, 0), Position::new(3, 4));
        table.set(&obs, Action::Down, -0.75);
        table.set(&obs, Action::Right, 3.25);
        table
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("brain.msgpack");

        let repo = MsgPackRepository::new();
        let saved = SavedQTable::new(&sample_table(), &Board::standard(), Hyperparameters::default());

        assert!(!repo.exists(&file_path));
        repo.save(&saved, &file_path).expect("Failed to save");
        assert!(repo.exists(&file_path));

        let loaded = repo.load(&file_path).expect("Failed to load");
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_load_then_save_is_byte_identical() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let first = temp_dir.path().join("first.msgpack");
        let second = temp_dir.path().join("second.msgpack");

        let repo = MsgPackRepository::new();
        let saved = SavedQTable::new(&sample_table(), &Board::standard(), Hyperparameters::default());
        repo.save(&saved, &first).unwrap();

        let reloaded = repo.load(&first).unwrap();
        repo.save(&reloaded, &second).unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }

    #[test]
    fn test_load_nonexistent_returns_missing_cache() {
        let repo = MsgPackRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_cheeseboard_12345.msgpack"));
        assert!(matches!(result, Err(Error::MissingCache { .. })));
    }

    #[test]
    fn test_load_truncated_file_returns_corrupt_cache() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("brain.msgpack");

        let repo = MsgPackRepository::new();
        let saved = SavedQTable::new(&sample_table(), &Board::standard(), Hyperparameters::default());
        repo.save(&saved, &file_path).unwrap();

        let bytes = std::fs::read(&file_path).unwrap();
        std::fs::write(&file_path, &bytes[..bytes.len() / 2]).unwrap();

        let result = repo.load(&file_path);
        assert!(matches!(result, Err(Error::CorruptCache { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let saved = SavedQTable::new(&QTable::new(), &Board::standard(), Hyperparameters::default());
        let result = repo.save(&saved, Path::new("/invalid_dir_12345/brain.msgpack"));
        assert!(result.is_err());
    }
}
