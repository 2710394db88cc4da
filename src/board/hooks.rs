//! Presentation hooks
//!
//! The board calls these at fixed points of a round. Implementations drive
//! countdown UI, highlighting, explosions and so on; the board only relies on
//! the order of the calls. Every method defaults to doing nothing.

use super::grid::{ButtonGrid, SectionMove};
use super::state::ButtonId;

pub trait BoardHooks {
    /// A round is starting (`round` is zero-based)
    fn begin_pre_cycle(&mut self, _round: u32) {}

    /// Override safe button selection. `None` keeps the built-in choice.
    fn choose_safe_button(&mut self, _grid: &ButtonGrid) -> Option<ButtonId> {
        None
    }

    fn on_safe_button_set(&mut self, _button: ButtonId) {}

    /// A cycle tick rotated `moves`; `step` counts from 1
    fn cycle_on_timer(&mut self, _step: u32, _moves: &[SectionMove]) {}

    fn on_cycle_complete(&mut self) {}

    fn button_clicked(&mut self, _button: ButtonId) {}

    fn on_level_success(&mut self) {}

    fn on_level_failure(&mut self) {}

    fn explode(&mut self) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl BoardHooks for NoHooks {}
