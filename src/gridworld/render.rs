//! Console rendering of the board

use super::{
    action::Action,
    board::{BOARD_SIZE, Board, Position},
};

/// Fixed-width cell glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub empty: &'static str,
    pub agent: &'static str,
    pub goal: &'static str,
    pub hazard: &'static str,
}

impl Glyphs {
    pub const EMOJI: Glyphs = Glyphs {
        empty: " ⬜ ",
        agent: " 🐭 ",
        goal: " 🧀 ",
        hazard: " ❌ ",
    };

    pub const ASCII: Glyphs = Glyphs {
        empty: " . ",
        agent: " M ",
        goal: " C ",
        hazard: " X ",
    };
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::EMOJI
    }
}

/// Render the board as one line per row.
///
/// When cells overlap the mouse wins over the cheese, and the cheese over a trap.
pub fn render_board(board: &Board, agent: Position, goal: Position, glyphs: &Glyphs) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let cell = Position::new(row, col);
            let glyph = if cell == agent {
                glyphs.agent
            } else if cell == goal {
                glyphs.goal
            } else if board.is_hazard(cell) {
                glyphs.hazard
            } else {
                glyphs.empty
            };
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out
}

/// Render a greedy policy as arrows, with the goal and traps marked.
///
/// `action_at` returns the chosen action for the mouse standing on a cell.
pub fn render_policy<F>(board: &Board, goal: Position, glyphs: &Glyphs, mut action_at: F) -> String
where
    F: FnMut(Position) -> Action,
{
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let cell = Position::new(row, col);
            if cell == goal {
                out.push_str(glyphs.goal);
            } else if board.is_hazard(cell) {
                out.push_str(glyphs.hazard);
            } else {
                out.push_str(&format!(" {} ", action_at(cell).arrow()));
            }
        }
        out.push('\n');
    }
    out
}
