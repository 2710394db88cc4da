//! Tick Tick Boom - gameboard core
//!
//! Core modules:
//! - `board`: Button grid, rotation, safe button selection and round phases
//! - `settings`: Board layout and tuning shared by every level
//! - `player`: Pause and camera focus for the presentation layer
//! - `error`: Error type for configuration and rotation failures

pub mod board;
pub mod error;
pub mod player;
pub mod settings;

pub use board::{BoardPhase, BoardTable, ButtonId, ClickOutcome, GameBoard, GameboardData};
pub use error::BoardError;
pub use player::PlayerController;
pub use settings::BoardSettings;

/// Driver loop constants
pub mod consts {
    /// Fixed frame timestep for the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
