//! Gameboard core
//!
//! All round logic lives here. Like the rest of the crate it is deterministic:
//! - Time only advances through `GameBoard::advance`
//! - Seeded RNG only
//! - Grid iteration is row-major
//! - No rendering, input or engine dependencies

pub mod data;
pub mod grid;
pub mod hooks;
pub mod selection;
pub mod signals;
pub mod state;
pub mod tick;

pub use data::{BoardTable, GameboardData, SectionTypes};
pub use grid::{
    ButtonGrid, Direction, GridSection, GridSectionType, SectionMove,
    is_button_traveling_off_board,
};
pub use hooks::{BoardHooks, NoHooks};
pub use selection::{SafeButtonChoice, SafeButtonPicker, random_button};
pub use signals::{BoardSignals, ListenerId, Signal};
pub use state::{
    BASE_CYCLE_INTERVAL, BoardPhase, ButtonId, ClickOutcome, GameBoard, GateId, PendingTimer,
    RngState, TimerKind,
};
