//! Dependency injection container for the cheeseboard application.
//!
//! The container owns the table repository and implements the
//! load-or-train contract: a cached brain replaces training entirely, and a
//! freshly trained brain is written back exactly once.

use std::{path::Path, sync::Arc};

use tracing::info;

use super::config::AgentConfig;
use crate::{
    Error, Result,
    adapters::MsgPackRepository,
    gridworld::{Board, GridWorld},
    pipeline::{TrainingConfig, TrainingPipeline, TrainingResult},
    ports::{Observer, TableRepository},
    q_learning::{Hyperparameters, QLearningAgent, QTable, SavedQTable},
};

/// Where the brain in use came from
#[derive(Debug, Clone)]
pub enum Brain {
    /// Read from the cache; no training happened
    Loaded(QTable),
    /// Trained in this process and saved to the cache
    Trained { table: QTable, result: TrainingResult },
}

impl Brain {
    pub fn table(&self) -> &QTable {
        match self {
            Brain::Loaded(table) => table,
            Brain::Trained { table, .. } => table,
        }
    }

    pub fn was_loaded(&self) -> bool {
        matches!(self, Brain::Loaded(_))
    }
}

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use cheeseboard::app::{AgentConfig, App};
/// use std::path::Path;
///
/// let app = App::new();
/// let brain = app.load_or_train(Path::new("mouse_brain.msgpack"), &AgentConfig::new(), Vec::new())?;
/// # Ok::<(), cheeseboard::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use cheeseboard::app::App;
/// use cheeseboard::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for brain persistence
    table_repository: Arc<dyn TableRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses `MsgPackRepository` and no default seed.
    pub fn new() -> Self {
        Self {
            table_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the table repository.
    pub fn table_repository(&self) -> Arc<dyn TableRepository + Send + Sync> {
        Arc::clone(&self.table_repository)
    }

    /// Train a fresh table on `config`, reporting to `observers`.
    pub fn train(
        &self,
        config: &AgentConfig,
        observers: Vec<Box<dyn Observer>>,
    ) -> Result<(QTable, TrainingResult)> {
        config.validate()?;

        let mut training = TrainingConfig::new(config.hyperparameters.episodes);
        if let Some(seed) = config.seed.or(self.default_seed) {
            training = training.with_seed(seed);
        }

        let mut pipeline = observers
            .into_iter()
            .fold(TrainingPipeline::new(training), |pipeline, observer| {
                pipeline.with_observer(observer)
            });

        let mut agent = QLearningAgent::new(config.hyperparameters);
        let mut env = GridWorld::new(config.board.clone());
        let result = pipeline.run(&mut agent, &mut env)?;

        Ok((agent.into_q_table(), result))
    }

    /// Save a table together with the schema it was learned under.
    pub fn save(&self, table: &QTable, config: &AgentConfig, path: &Path) -> Result<()> {
        let saved = SavedQTable::new(table, &config.board, config.hyperparameters);
        self.table_repository.save(&saved, path)?;
        info!(path = %path.display(), "saved value table");
        Ok(())
    }

    /// Load a table, checking it fits `board` and, when given, was learned
    /// with `hyperparameters`.
    ///
    /// # Errors
    ///
    /// `MissingCache` if nothing is stored at `path`; `CorruptCache` if the
    /// file cannot be decoded or does not fit.
    pub fn load(
        &self,
        path: &Path,
        board: &Board,
        hyperparameters: Option<&Hyperparameters>,
    ) -> Result<QTable> {
        let saved = self.table_repository.load(path)?;
        saved
            .check(board, hyperparameters)
            .map_err(|reason| Error::CorruptCache {
                path: path.to_path_buf(),
                reason,
            })?;
        saved.into_table().map_err(|e| Error::CorruptCache {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Use the cached brain at `path` if there is one; otherwise train and
    /// save it.
    ///
    /// A cache that exists but does not match `config` is an error, not a
    /// reason to retrain: delete it or call [`App::train`] explicitly.
    pub fn load_or_train(
        &self,
        path: &Path,
        config: &AgentConfig,
        observers: Vec<Box<dyn Observer>>,
    ) -> Result<Brain> {
        if self.table_repository.exists(path) {
            info!(path = %path.display(), "value table cache hit");
            let table = self.load(path, &config.board, Some(&config.hyperparameters))?;
            return Ok(Brain::Loaded(table));
        }

        info!(path = %path.display(), "value table cache miss, training");
        let (table, result) = self.train(config, observers)?;
        self.save(&table, config, path)?;
        Ok(Brain::Trained { table, result })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing App with custom dependencies.
pub struct AppBuilder {
    table_repository: Option<Arc<dyn TableRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            table_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom table repository.
    pub fn with_repository<R>(mut self, repository: R) -> Self
    where
        R: TableRepository + Send + Sync + 'static,
    {
        self.table_repository = Some(Arc::new(repository));
        self
    }

    /// Set a default random seed for all training runs.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app, falling back to `MsgPackRepository`.
    pub fn build(self) -> App {
        App {
            table_repository: self
                .table_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}
