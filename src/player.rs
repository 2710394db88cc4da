//! Player controller
//!
//! Pause state and camera focus. Reads the board, never changes it; the
//! driving loop checks `is_paused` before advancing board time.

use glam::Vec3;

use crate::board::{ButtonId, GameBoard};

#[derive(Debug, Clone, Default)]
pub struct PlayerController {
    paused: bool,
    focus: Option<Vec3>,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip pause and return the new state
    pub fn toggle_pause_game(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_camera_focus_target(&mut self, target: Vec3) {
        self.focus = Some(target);
    }

    /// Frame the whole board
    pub fn focus_board(&mut self, board: &GameBoard) {
        self.set_camera_focus_target(board.board_center());
    }

    /// Frame a single button. Returns false if it is not on the board.
    pub fn focus_button(&mut self, board: &GameBoard, button: ButtonId) -> bool {
        match board.get_button_index(button) {
            Some((col, row)) => {
                self.set_camera_focus_target(board.button_location(col, row));
                true
            }
            None => false,
        }
    }

    pub fn camera_focus(&self) -> Option<Vec3> {
        self.focus
    }
}
