//! Board state and core types
//!
//! `GameBoard` owns everything a round needs: grid, safe button, phase, the
//! pending timer and the seeded RNG. Phase transitions live in `tick.rs`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::data::GameboardData;
use super::grid::{self, ButtonGrid, Direction};
use super::hooks::{BoardHooks, NoHooks};
use super::selection::{self, SafeButtonPicker};
use super::signals::BoardSignals;
use crate::error::BoardError;
use crate::settings::BoardSettings;

/// Opaque reference to a button entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ButtonId(pub u32);

/// Opaque reference to a gate entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateId(pub u32);

/// Current phase of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    /// Not running a round
    Inactive,
    /// Safe button chosen and shown
    PreCycle,
    /// Sections rotating on a timer
    Cycle,
    /// Rotation finished, countdown running
    PostCycle,
}

impl BoardPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, BoardPhase::Inactive)
    }
}

/// What a scheduled callback does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the safe button reveal, starts cycling
    Reveal,
    /// One rotation step
    CycleStep,
    /// Player ran out of time
    Countdown,
}

/// The single pending scheduled callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTimer {
    pub kind: TimerKind,
    /// Seconds until it fires
    pub remaining: f32,
}

/// Result of a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Press arrived outside the countdown or for an unknown button
    Ignored,
    Safe,
    Wrong,
}

/// RNG state wrapper
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// A gameboard: rotating button grid plus its round state machine
pub struct GameBoard {
    pub(super) data: GameboardData,
    pub(super) settings: BoardSettings,
    pub(super) grid: ButtonGrid,
    pub(super) gates: Vec<GateId>,
    /// Button the player must track and press
    pub(super) safe_button: Option<ButtonId>,
    pub(super) safe_button_index: Option<(usize, usize)>,
    pub(super) phase: BoardPhase,
    pub(super) timer: Option<PendingTimer>,
    /// Rotation steps done in the current cycle
    pub(super) cycle_steps_done: u32,
    /// Zero-based round within the level
    pub(super) round: u32,
    pub(super) rng_state: RngState,
    pub(super) rng: Pcg32,
    pub(super) picker: SafeButtonPicker,
    pub(super) hooks: Box<dyn BoardHooks>,
    /// Notifications for UI and button entities
    pub signals: BoardSignals,
    next_id: u32,
}

impl std::fmt::Debug for GameBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameBoard")
            .field("data", &self.data)
            .field("grid", &self.grid)
            .field("safe_button", &self.safe_button)
            .field("phase", &self.phase)
            .field("timer", &self.timer)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl GameBoard {
    /// Build a board and spawn its buttons
    pub fn new(data: GameboardData, settings: BoardSettings, seed: u64) -> Result<Self, BoardError> {
        data.validate()?;
        let mut next_id = 1;
        let grid = ButtonGrid::new(data.cols as usize, data.rows as usize, || {
            let id = ButtonId(next_id);
            next_id += 1;
            id
        })?;
        Self::with_grid(data, settings, grid, seed)
    }

    /// Build a board around buttons spawned elsewhere
    pub fn with_grid(
        data: GameboardData,
        settings: BoardSettings,
        grid: ButtonGrid,
        seed: u64,
    ) -> Result<Self, BoardError> {
        data.validate()?;
        settings.validate()?;
        check_dimensions(&data, &grid)?;

        let next_id = grid.all_buttons().iter().map(|b| b.0).max().unwrap_or(0) + 1;
        let rng_state = RngState::new(seed);
        log::debug!(
            "Board {}x{} built, seed {}",
            grid.cols(),
            grid.rows(),
            seed
        );
        Ok(Self {
            picker: SafeButtonPicker::new(
                settings.safe_button_cycle_bias,
                settings.safe_button_choice_iterations,
            ),
            rng: rng_state.to_rng(),
            rng_state,
            data,
            settings,
            grid,
            gates: Vec::new(),
            safe_button: None,
            safe_button_index: None,
            phase: BoardPhase::Inactive,
            timer: None,
            cycle_steps_done: 0,
            round: 0,
            hooks: Box::new(NoHooks),
            signals: BoardSignals::default(),
            next_id,
        })
    }

    /// Install presentation hooks
    pub fn with_hooks(mut self, hooks: impl BoardHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Publish the initial layout to listeners
    pub fn initialize(&mut self) {
        log::info!(
            "Board ready: {}x{}, {} cycle steps, time scale {}",
            self.grid.cols(),
            self.grid.rows(),
            self.data.cycle_count,
            self.data.time_scale
        );
        self.signals.grid_updated.broadcast();
    }

    /// Rebuild the board from a new data row. Only allowed while inactive.
    pub fn configure(&mut self, data: GameboardData) -> Result<(), BoardError> {
        if self.is_active() {
            return Err(BoardError::BoardActive);
        }
        data.validate()?;
        let grid = ButtonGrid::new(data.cols as usize, data.rows as usize, || {
            let id = ButtonId(self.next_id);
            self.next_id += 1;
            id
        })?;
        self.grid = grid;
        self.data = data;
        self.safe_button = None;
        self.safe_button_index = None;
        self.cycle_steps_done = 0;
        self.round = 0;
        self.picker.clear();
        self.signals.grid_updated.broadcast();
        Ok(())
    }

    /// Spawn `count` gates with fresh ids
    pub fn spawn_gates(&mut self, count: usize) -> &[GateId] {
        for _ in 0..count {
            let id = GateId(self.next_id);
            self.next_id += 1;
            self.gates.push(id);
        }
        &self.gates
    }

    pub fn set_gates(&mut self, gates: Vec<GateId>) {
        self.gates = gates;
    }

    pub fn gates(&self) -> &[GateId] {
        &self.gates
    }

    pub fn data(&self) -> &GameboardData {
        &self.data
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn grid(&self) -> &ButtonGrid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn safe_button(&self) -> Option<ButtonId> {
        self.safe_button
    }

    /// `(col, row)` of the safe button as of the last phase change
    pub fn safe_button_index(&self) -> Option<(usize, usize)> {
        self.safe_button_index
    }

    pub fn pending_timer(&self) -> Option<PendingTimer> {
        self.timer
    }

    /// Seconds left to press the safe button, if the countdown is running
    pub fn countdown_remaining(&self) -> Option<f32> {
        self.timer
            .filter(|t| t.kind == TimerKind::Countdown)
            .map(|t| t.remaining)
    }

    pub fn cycle_steps_done(&self) -> u32 {
        self.cycle_steps_done
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn board_width(&self) -> f32 {
        self.grid.cols() as f32 * self.settings.button_spacing
    }

    pub fn board_length(&self) -> f32 {
        self.grid.rows() as f32 * self.settings.button_spacing
    }

    pub fn time_scale(&self) -> f32 {
        self.data.time_scale
    }

    /// World position of the grid cell `(col, row)`, relative to the board origin
    pub fn button_location(&self, col: usize, row: usize) -> Vec3 {
        let spacing = self.settings.button_spacing;
        Vec3::new(
            (col as f32 + 0.5) * spacing,
            (row as f32 + 0.5) * spacing,
            self.settings.button_height,
        )
    }

    pub fn board_center(&self) -> Vec3 {
        Vec3::new(
            self.board_width() / 2.0,
            self.board_length() / 2.0,
            self.settings.button_height,
        )
    }

    /// Any button, uniformly
    pub fn get_rand_button(&mut self) -> ButtonId {
        selection::random_button(&self.grid, &mut self.rng)
    }

    pub fn get_button_by_index(&self, col: usize, row: usize) -> Option<ButtonId> {
        self.grid.button_at(col, row)
    }

    pub fn get_column(&self, index: usize) -> Option<Vec<ButtonId>> {
        self.grid.column(index)
    }

    pub fn get_row(&self, index: usize) -> Option<Vec<ButtonId>> {
        self.grid.row(index)
    }

    pub fn get_all_buttons(&self) -> Vec<ButtonId> {
        self.grid.all_buttons()
    }

    pub fn get_button_index(&self, button: ButtonId) -> Option<(usize, usize)> {
        self.grid.index_of(button)
    }

    pub fn is_button_traveling_off_board(
        &self,
        buttons: &[ButtonId],
        index: usize,
        direction: Direction,
    ) -> bool {
        grid::is_button_traveling_off_board(buttons, index, direction)
    }
}

fn check_dimensions(data: &GameboardData, grid: &ButtonGrid) -> Result<(), BoardError> {
    if grid.cols() != data.cols as usize {
        return Err(BoardError::InvalidConfig {
            field: "Cols",
            reason: "does not match the button grid",
        });
    }
    if grid.rows() != data.rows as usize {
        return Err(BoardError::InvalidConfig {
            field: "Rows",
            reason: "does not match the button grid",
        });
    }
    Ok(())
}

/// Base seconds between cycle steps at time scale 1
pub const BASE_CYCLE_INTERVAL: f32 = 0.6;

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cols: u32, rows: u32) -> GameBoard {
        let data = GameboardData {
            cols,
            rows,
            ..Default::default()
        };
        GameBoard::new(data, BoardSettings::default(), 42).unwrap()
    }

    #[test]
    fn test_new_board_is_inactive() {
        let board = board(3, 3);
        assert_eq!(board.phase(), BoardPhase::Inactive);
        assert!(!board.is_active());
        assert!(board.safe_button().is_none());
        assert_eq!(board.get_all_buttons().len(), 9);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let data = GameboardData {
            cols: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameBoard::new(data, BoardSettings::default(), 1),
            Err(BoardError::InvalidConfig { field: "Cols", .. })
        ));

        let grid = ButtonGrid::from_rows(vec![vec![ButtonId(1), ButtonId(2)]]).unwrap();
        let result = GameBoard::with_grid(GameboardData::default(), BoardSettings::default(), grid, 1);
        assert!(matches!(
            result,
            Err(BoardError::InvalidConfig { field: "Cols", .. })
        ));
    }

    #[test]
    fn test_dimension_queries() {
        let board = board(4, 2);
        let spacing = board.settings().button_spacing;
        assert_eq!(board.board_width(), 4.0 * spacing);
        assert_eq!(board.board_length(), 2.0 * spacing);
        assert_eq!(board.time_scale(), 1.0);

        let loc = board.button_location(1, 0);
        assert_eq!(loc.x, 1.5 * spacing);
        assert_eq!(loc.y, 0.5 * spacing);
        assert_eq!(loc.z, board.settings().button_height);
        assert_eq!(board.board_center().x, 2.0 * spacing);
    }

    #[test]
    fn test_lookup_helpers() {
        let board = board(3, 3);
        let button = board.get_button_by_index(2, 1).unwrap();
        assert_eq!(board.get_button_index(button), Some((2, 1)));
        assert_eq!(board.get_column(2).unwrap()[1], button);
        assert_eq!(board.get_row(1).unwrap()[2], button);
        assert!(board.get_button_by_index(3, 0).is_none());
        assert!(board.get_column(3).is_none());
        assert!(board.get_row(3).is_none());
        assert_eq!(board.get_button_index(ButtonId(1000)), None);

        let row = board.get_row(0).unwrap();
        assert!(board.is_button_traveling_off_board(&row, 2, Direction::Forward));
        assert!(!board.is_button_traveling_off_board(&row, 1, Direction::Forward));
    }

    #[test]
    fn test_rand_button_is_on_board() {
        let mut board = board(3, 2);
        for _ in 0..100 {
            let button = board.get_rand_button();
            assert!(board.grid().contains(button));
        }
    }

    #[test]
    fn test_gates_get_fresh_ids() {
        let mut board = board(2, 2);
        let gates = board.spawn_gates(3).to_vec();
        assert_eq!(gates.len(), 3);
        assert!(gates.iter().all(|g| g.0 > 4));
        board.set_gates(vec![GateId(77)]);
        assert_eq!(board.gates(), &[GateId(77)]);
    }

    #[test]
    fn test_configure_rebuilds_while_inactive() {
        let mut board = board(3, 3);
        let old = board.get_all_buttons();
        board
            .configure(GameboardData {
                cols: 2,
                rows: 5,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(board.grid().cols(), 2);
        assert_eq!(board.grid().rows(), 5);
        assert!(board.get_all_buttons().iter().all(|b| !old.contains(b)));
    }
}
