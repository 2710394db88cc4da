//! Round state machine
//!
//! Inactive -> PreCycle -> Cycle -> PostCycle -> (PreCycle | Inactive).
//! Time only moves through `advance`, which fires the single pending timer as
//! many times as the elapsed time allows, strictly in order. Deactivation from
//! any path drops the pending timer.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::{Direction, GridSection, SectionMove};
use super::state::{
    BASE_CYCLE_INTERVAL, BoardPhase, ButtonId, ClickOutcome, GameBoard, PendingTimer, TimerKind,
};
use crate::error::BoardError;

impl GameBoard {
    /// Start a level. Does nothing if the board is already running.
    pub fn activate_board(&mut self) {
        if self.is_active() {
            log::debug!("activate_board ignored, board already active");
            return;
        }
        log::info!("Board activated");
        self.round = 0;
        self.phase = BoardPhase::PreCycle;
        self.signals.buttons_activated.broadcast();
        self.enter_pre_cycle();
    }

    /// Stop the board and cancel any pending timer. Safe to call repeatedly.
    pub fn deactivate_board(&mut self) {
        self.timer = None;
        if !self.is_active() {
            return;
        }
        log::info!("Board deactivated in {:?}", self.phase);
        self.phase = BoardPhase::Inactive;
        self.signals.buttons_deactivated.broadcast();
    }

    /// Forced failure (wrong button, countdown expired, external rule)
    pub fn on_short_circuit(&mut self) {
        if !self.is_active() {
            return;
        }
        log::info!("Short circuit during {:?}", self.phase);
        self.deactivate_board();
        self.hooks.on_level_failure();
    }

    /// Skip the rest of the reveal and start rotating
    pub fn begin_cycle(&mut self) -> Result<(), BoardError> {
        if self.phase != BoardPhase::PreCycle {
            return Err(BoardError::InvalidPhase {
                operation: "begin_cycle",
                phase: self.phase,
            });
        }
        self.start_cycle();
        Ok(())
    }

    /// Player pressed `button`
    pub fn button_clicked(&mut self, button: ButtonId) -> ClickOutcome {
        if self.phase != BoardPhase::PostCycle || !self.grid.contains(button) {
            return ClickOutcome::Ignored;
        }
        self.hooks.button_clicked(button);

        if self.safe_button == Some(button) {
            self.complete_round();
            ClickOutcome::Safe
        } else {
            log::info!("Wrong button {:?}", button);
            self.hooks.explode();
            self.on_short_circuit();
            ClickOutcome::Wrong
        }
    }

    /// Advance board time by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> Result<(), BoardError> {
        if !dt.is_finite() || dt <= 0.0 || !self.is_active() {
            return Ok(());
        }

        let mut budget = dt;
        while let Some(mut timer) = self.timer {
            if budget < timer.remaining {
                timer.remaining -= budget;
                self.timer = Some(timer);
                break;
            }
            budget -= timer.remaining;
            self.timer = None;
            self.fire(timer.kind)?;
        }
        Ok(())
    }

    fn fire(&mut self, kind: TimerKind) -> Result<(), BoardError> {
        match kind {
            TimerKind::Reveal => self.start_cycle(),
            TimerKind::CycleStep => self.cycle_step()?,
            TimerKind::Countdown => {
                log::info!("Countdown expired");
                self.hooks.explode();
                self.on_short_circuit();
            }
        }
        Ok(())
    }

    fn schedule(&mut self, kind: TimerKind, seconds: f32) {
        self.timer = Some(PendingTimer {
            kind,
            remaining: seconds,
        });
    }

    fn enter_pre_cycle(&mut self) {
        self.phase = BoardPhase::PreCycle;
        self.timer = None;
        self.cycle_steps_done = 0;
        self.hooks.begin_pre_cycle(self.round);

        let choice = self.picker.pick(&self.grid, &mut self.rng);
        let button = match self.hooks.choose_safe_button(&self.grid) {
            Some(chosen) if self.grid.contains(chosen) => chosen,
            Some(chosen) => {
                log::warn!("Hook chose {:?} which is not on the board, ignoring", chosen);
                choice.button
            }
            None => choice.button,
        };

        self.safe_button = Some(button);
        self.safe_button_index = self.grid.index_of(button);
        self.picker.record(button);
        log::debug!(
            "Round {} safe button {:?} at {:?} ({} draws)",
            self.round,
            button,
            self.safe_button_index,
            choice.draws
        );
        self.hooks.on_safe_button_set(button);

        let reveal = self.settings.reveal_seconds / self.data.time_scale;
        if reveal > 0.0 {
            self.schedule(TimerKind::Reveal, reveal);
        } else {
            self.start_cycle();
        }
    }

    fn start_cycle(&mut self) {
        self.phase = BoardPhase::Cycle;
        self.cycle_steps_done = 0;
        self.schedule(TimerKind::CycleStep, self.cycle_interval());
    }

    /// Seconds between rotation steps at the board's time scale
    pub fn cycle_interval(&self) -> f32 {
        BASE_CYCLE_INTERVAL / self.data.time_scale
    }

    fn cycle_step(&mut self) -> Result<(), BoardError> {
        let moves = self.plan_moves();
        self.grid.apply_moves(&moves)?;
        self.cycle_steps_done += 1;

        self.signals.grid_updated.broadcast();
        self.hooks.cycle_on_timer(self.cycle_steps_done, &moves);

        if self.cycle_steps_done >= self.data.cycle_count {
            self.enter_post_cycle();
        } else {
            self.schedule(TimerKind::CycleStep, self.cycle_interval());
        }
        Ok(())
    }

    /// Pick distinct sections for one step, each with a random direction
    fn plan_moves(&mut self) -> Vec<SectionMove> {
        let candidates = self.grid.sections(self.data.section_types.kinds());
        let count = (self.data.sections_move_per_cycle as usize).min(candidates.len());
        let sections: Vec<GridSection> = candidates
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();

        sections
            .into_iter()
            .map(|section| SectionMove {
                section,
                direction: if self.rng.random_bool(0.5) {
                    Direction::Forward
                } else {
                    Direction::Backward
                },
            })
            .collect()
    }

    fn enter_post_cycle(&mut self) {
        self.phase = BoardPhase::PostCycle;
        self.hooks.on_cycle_complete();

        self.safe_button_index = self.safe_button.and_then(|b| self.grid.index_of(b));
        if self.safe_button_index.is_none() {
            log::error!("Safe button {:?} missing after cycle", self.safe_button);
            self.on_short_circuit();
            return;
        }
        self.schedule(
            TimerKind::Countdown,
            self.settings.countdown_seconds as f32,
        );
    }

    fn complete_round(&mut self) {
        self.timer = None;
        self.round += 1;
        if self.round < self.data.rounds {
            log::info!("Round {} cleared", self.round);
            self.enter_pre_cycle();
        } else {
            log::info!("Level cleared after {} rounds", self.round);
            self.deactivate_board();
            self.hooks.on_level_success();
        }
    }
}
