//! Tick Tick Boom headless driver
//!
//! Loads a board table, plays one level with a simulated player that always
//! tracks the safe button, and logs what happens.
//!
//! Usage: `tick-tick-boom [boards.json] [row name]`

use std::cell::Cell;
use std::rc::Rc;

use tick_tick_boom::board::{BoardHooks, BoardPhase, BoardTable, ButtonId, GameBoard, SectionMove};
use tick_tick_boom::consts::*;
use tick_tick_boom::{BoardError, BoardSettings, PlayerController};

const DEFAULT_TABLE: &str = "data/boards.json";
const SETTINGS_PATH: &str = "data/settings.json";
/// Simulated seconds the player waits before pressing
const REACTION_SECONDS: f32 = 0.75;
/// Give up after this much simulated time
const MAX_SECONDS: f32 = 600.0;

/// Logs every hook call and records the level result
struct LoggingHooks {
    result: Rc<Cell<Option<bool>>>,
}

impl BoardHooks for LoggingHooks {
    fn begin_pre_cycle(&mut self, round: u32) {
        log::info!("Round {} starting", round + 1);
    }

    fn on_safe_button_set(&mut self, button: ButtonId) {
        log::info!("Watch button {:?}", button);
    }

    fn cycle_on_timer(&mut self, step: u32, moves: &[SectionMove]) {
        for mv in moves {
            log::debug!(
                "Step {}: {:?} {} {:?}",
                step,
                mv.section.kind,
                mv.section.index,
                mv.direction
            );
        }
    }

    fn on_cycle_complete(&mut self) {
        log::info!("Cycling stopped, find the safe button!");
    }

    fn on_level_success(&mut self) {
        self.result.set(Some(true));
    }

    fn on_level_failure(&mut self) {
        self.result.set(Some(false));
    }

    fn explode(&mut self) {
        log::warn!("BOOM");
    }
}

/// Game instance holding the board and driver state
struct Game {
    board: GameBoard,
    controller: PlayerController,
    accumulator: f32,
    /// Time spent in the current PostCycle
    waiting: f32,
}

impl Game {
    /// Run simulation substeps for one rendered frame
    fn update(&mut self, dt: f32) -> Result<(), BoardError> {
        if self.controller.is_paused() {
            return Ok(());
        }
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.board.advance(SIM_DT)?;
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.play(SIM_DT);
        }
        Ok(())
    }

    /// Simulated player: follow the safe button and press it after a short delay
    fn play(&mut self, dt: f32) {
        if self.board.phase() != BoardPhase::PostCycle {
            self.waiting = 0.0;
            return;
        }
        if self.waiting == 0.0 {
            if let Some(safe) = self.board.safe_button() {
                self.controller.focus_button(&self.board, safe);
                log::info!(
                    "Safe button ended at {:?}, camera on {:?}",
                    self.board.safe_button_index(),
                    self.controller.camera_focus()
                );
            }
        }
        self.waiting += dt;
        if self.waiting >= REACTION_SECONDS {
            if let Some((col, row)) = self.board.safe_button_index() {
                if let Some(button) = self.board.get_button_by_index(col, row) {
                    let outcome = self.board.button_clicked(button);
                    log::info!("Pressed {:?}: {:?}", button, outcome);
                }
            }
            self.waiting = 0.0;
        }
    }
}

fn run() -> Result<bool, BoardError> {
    let mut args = std::env::args().skip(1);
    let table_path = args.next().unwrap_or_else(|| DEFAULT_TABLE.to_string());
    let row_name = args.next();

    let table = BoardTable::load(&table_path)?;
    let (name, data) = match row_name.as_deref() {
        Some(name) => table.row(name).map(|d| (name, d)).ok_or(BoardError::InvalidConfig {
            field: "Name",
            reason: "no such board row",
        })?,
        None => table.first().ok_or(BoardError::InvalidConfig {
            field: "Name",
            reason: "board table is empty",
        })?,
    };
    let settings = BoardSettings::load(SETTINGS_PATH)?;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Playing '{}' with seed {}", name, seed);

    let result = Rc::new(Cell::new(None));
    let mut board = GameBoard::new(data.clone(), settings, seed)?.with_hooks(LoggingHooks {
        result: Rc::clone(&result),
    });
    board.signals.grid_updated.connect(|| log::trace!("Grid updated"));
    board.initialize();

    let mut controller = PlayerController::new();
    controller.focus_board(&board);

    let mut game = Game {
        board,
        controller,
        accumulator: 0.0,
        waiting: 0.0,
    };
    game.board.activate_board();

    let frame_dt = 1.0 / 30.0;
    let mut elapsed = 0.0;
    while game.board.is_active() && elapsed < MAX_SECONDS {
        game.update(frame_dt)?;
        elapsed += frame_dt;
    }

    if game.board.is_active() {
        log::warn!("Level still running after {} seconds, stopping", MAX_SECONDS);
        game.board.on_short_circuit();
    }
    Ok(result.get().unwrap_or(false))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tick Tick Boom (headless) starting...");

    match run() {
        Ok(true) => log::info!("Level cleared"),
        Ok(false) => log::info!("Level failed"),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
