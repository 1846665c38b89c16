//! Training, replay and evaluation pipelines
//!
//! This module provides:
//! - The episode loop that trains a learner on the grid world
//! - Observers for progress, metrics and episode logs
//! - Greedy replay of a learned table, optionally bounded
//! - Evaluation of the greedy policy over every cheese position

pub mod evaluation;
pub mod observers;
pub mod replay;
pub mod training;

pub use evaluation::{DEFAULT_EVALUATION_STEPS, EvaluationReport, evaluate_policy};
pub use observers::{JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use replay::{Frame, ReplayConfig, ReplayOutcome, ReplayResult, replay};
pub use training::{EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
