//! Board geometry: dimension, start cell and hazard cells

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Side length of the square board
pub const BOARD_SIZE: usize = 5;

/// Fixed starting cell of every episode
pub const START: Position = Position::new(0, 0);

/// Trap cells of the standard board
pub const DEFAULT_HAZARDS: [Position; 5] = [
    Position::new(1, 1),
    Position::new(2, 2),
    Position::new(3, 1),
    Position::new(0, 4),
    Position::new(4, 0),
];

/// A (row, col) coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies on a board of [`BOARD_SIZE`]
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable board geometry
///
/// The dimension is always [`BOARD_SIZE`]; only the hazard set varies, and
/// only for tests and experiments. The standard board uses [`DEFAULT_HAZARDS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    hazards: Vec<Position>,
}

impl Board {
    /// The standard board with the five fixed traps
    pub fn standard() -> Self {
        Self {
            hazards: DEFAULT_HAZARDS.to_vec(),
        }
    }

    /// Board with a custom hazard set.
    ///
    /// Hazards must be on the board and must not cover the start cell.
    /// Duplicates are collapsed.
    pub fn with_hazards(hazards: impl IntoIterator<Item = Position>) -> Result<Self> {
        let mut cells: Vec<Position> = Vec::new();
        for hazard in hazards {
            if !hazard.in_bounds() {
                return Err(Error::InvalidConfiguration {
                    message: format!("hazard {hazard} lies outside the {BOARD_SIZE}x{BOARD_SIZE} board"),
                });
            }
            if hazard == START {
                return Err(Error::InvalidConfiguration {
                    message: format!("hazard {hazard} covers the start cell"),
                });
            }
            if !cells.contains(&hazard) {
                cells.push(hazard);
            }
        }
        let board = Self { hazards: cells };
        if board.goal_cells().is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "hazards leave no cell for the goal".to_string(),
            });
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    pub fn hazards(&self) -> &[Position] {
        &self.hazards
    }

    pub fn is_hazard(&self, position: Position) -> bool {
        self.hazards.contains(&position)
    }

    /// Whether the cell may hold the cheese: on the board, not the start,
    /// not a trap.
    pub fn is_valid_goal(&self, position: Position) -> bool {
        position.in_bounds() && position != START && !self.is_hazard(position)
    }

    /// All cells that may hold the cheese, in row-major order
    pub fn goal_cells(&self) -> Vec<Position> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
            .filter(|&cell| self.is_valid_goal(cell))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_hazards() {
        let board = Board::standard();
        assert_eq!(board.hazards().len(), 5);
        assert!(board.is_hazard(Position::new(2, 2)));
        assert!(!board.is_hazard(START));
    }

    #[test]
    fn test_goal_cells_exclude_start_and_hazards() {
        let board = Board::standard();
        let goals = board.goal_cells();
        assert_eq!(goals.len(), 25 - 1 - 5);
        assert!(!goals.contains(&START));
        assert!(goals.iter().all(|&g| !board.is_hazard(g)));
    }

    #[test]
    fn test_with_hazards_rejects_start() {
        let result = Board::with_hazards([Position::new(0, 0)]);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_with_hazards_rejects_out_of_bounds() {
        let result = Board::with_hazards([Position::new(5, 1)]);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_with_hazards_collapses_duplicates() {
        let board = Board::with_hazards([Position::new(1, 1), Position::new(1, 1)]).unwrap();
        assert_eq!(board.hazards(), &[Position::new(1, 1)]);
    }
}
