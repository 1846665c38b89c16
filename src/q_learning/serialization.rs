//! On-disk form of a trained value table.
//!
//! The values are stored as a flat array next to a schema tag describing the
//! board and hyperparameters they were learned under, so a stale or foreign
//! file is rejected instead of silently steering the mouse.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    gridworld::{Action, BOARD_SIZE, Board, Position},
    q_learning::{
        hyperparameters::Hyperparameters,
        q_table::{QTable, TABLE_LEN},
    },
};

/// What a saved table was learned against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub board_size: usize,
    pub action_count: usize,
    pub hazards: Vec<Position>,
    pub hyperparameters: Hyperparameters,
}

impl TableSchema {
    pub fn new(board: &Board, hyperparameters: Hyperparameters) -> Self {
        let mut hazards = board.hazards().to_vec();
        hazards.sort();
        Self {
            board_size: BOARD_SIZE,
            action_count: Action::COUNT,
            hazards,
            hyperparameters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub schema: TableSchema,
    values: Vec<f64>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn new(table: &QTable, board: &Board, hyperparameters: Hyperparameters) -> Self {
        Self {
            version: Self::VERSION,
            schema: TableSchema::new(board, hyperparameters),
            values: table.values().to_vec(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Check the saved table fits `board`, and, when given, was learned with
    /// `hyperparameters`. Returns the reason for the first mismatch.
    pub fn check(
        &self,
        board: &Board,
        hyperparameters: Option<&Hyperparameters>,
    ) -> std::result::Result<(), String> {
        if self.version != Self::VERSION {
            return Err(format!(
                "unsupported format version {} (expected {})",
                self.version,
                Self::VERSION
            ));
        }
        if self.values.len() != TABLE_LEN {
            return Err(format!(
                "table holds {} values, expected {TABLE_LEN}",
                self.values.len()
            ));
        }
        let expected = TableSchema::new(board, Hyperparameters::default());
        if self.schema.board_size != expected.board_size
            || self.schema.action_count != expected.action_count
        {
            return Err(format!(
                "table shape {}x{} with {} actions does not match {}x{} with {} actions",
                self.schema.board_size,
                self.schema.board_size,
                self.schema.action_count,
                expected.board_size,
                expected.board_size,
                expected.action_count
            ));
        }
        if self.schema.hazards != expected.hazards {
            return Err("table was learned on a board with different hazards".to_string());
        }
        match hyperparameters {
            Some(params) if self.schema.hyperparameters != *params => Err(format!(
                "table was learned with {:?}, current run uses {:?}",
                self.schema.hyperparameters, params
            )),
            _ => Ok(()),
        }
    }

    pub fn into_table(self) -> Result<QTable> {
        QTable::from_values(self.values)
    }
}
