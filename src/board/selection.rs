//! Safe button selection
//!
//! Policy: draw uniformly over the whole grid up to `iterations` times and take
//! the first button that was not one of the last `bias` safe buttons. If every
//! draw hits a recent safe button the last draw is used, so a choice is always
//! made within `iterations` draws. With a seeded RNG the choice is fully
//! deterministic.

use std::collections::VecDeque;

use rand::Rng;

use super::grid::ButtonGrid;
use super::state::ButtonId;

/// Uniform draw over every button on the board
pub fn random_button<R: Rng + ?Sized>(grid: &ButtonGrid, rng: &mut R) -> ButtonId {
    let flat = rng.random_range(0..grid.len());
    // grids are never empty, and deserialized grids go through from_rows
    grid.button_at_flat(flat).expect("flat index below grid len")
}

/// Result of one safe button choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeButtonChoice {
    pub button: ButtonId,
    /// Draws used, between 1 and the configured iterations
    pub draws: u32,
}

/// Biased safe button picker with a short memory of previous picks
#[derive(Debug, Clone)]
pub struct SafeButtonPicker {
    bias: usize,
    iterations: u32,
    history: VecDeque<ButtonId>,
}

impl SafeButtonPicker {
    pub fn new(bias: u32, iterations: u32) -> Self {
        Self {
            bias: bias as usize,
            iterations: iterations.max(1),
            history: VecDeque::with_capacity(bias as usize),
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, grid: &ButtonGrid, rng: &mut R) -> SafeButtonChoice {
        let mut draws = 0;
        loop {
            let button = random_button(grid, rng);
            draws += 1;
            if draws >= self.iterations || !self.history.contains(&button) {
                return SafeButtonChoice { button, draws };
            }
        }
    }

    /// Remember `button` as the latest safe button
    pub fn record(&mut self, button: ButtonId) {
        if self.bias == 0 {
            return;
        }
        if self.history.len() == self.bias {
            self.history.pop_front();
        }
        self.history.push_back(button);
    }

    pub fn recent(&self) -> impl Iterator<Item = &ButtonId> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn numbered(cols: usize, rows: usize) -> ButtonGrid {
        let mut next = 0;
        ButtonGrid::new(cols, rows, || {
            next += 1;
            ButtonId(next)
        })
        .unwrap()
    }

    #[test]
    fn test_random_button_is_uniform() {
        let grid = numbered(3, 3);
        let mut rng = Pcg32::seed_from_u64(12345);
        let draws = 10_000;
        let mut counts = [0u32; 9];
        for _ in 0..draws {
            let button = random_button(&grid, &mut rng);
            counts[(button.0 - 1) as usize] += 1;
        }

        let expected = draws as f64 / 9.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 8 degrees of freedom, p = 0.001
        assert!(chi_square < 26.12, "chi-square {chi_square} counts {counts:?}");
    }

    #[test]
    fn test_avoids_recent_safe_buttons() {
        let grid = numbered(2, 1);
        let mut picker = SafeButtonPicker::new(1, 64);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut previous = picker.pick(&grid, &mut rng).button;
        picker.record(previous);
        for _ in 0..50 {
            let choice = picker.pick(&grid, &mut rng);
            assert_ne!(choice.button, previous);
            picker.record(choice.button);
            previous = choice.button;
        }
    }

    #[test]
    fn test_single_button_grid_still_converges() {
        let grid = numbered(1, 1);
        let mut picker = SafeButtonPicker::new(3, 5);
        picker.record(ButtonId(1));
        let mut rng = Pcg32::seed_from_u64(1);
        let choice = picker.pick(&grid, &mut rng);
        assert_eq!(choice.button, ButtonId(1));
        assert_eq!(choice.draws, 5);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut picker = SafeButtonPicker::new(2, 4);
        for n in 1..=5 {
            picker.record(ButtonId(n));
        }
        assert_eq!(picker.recent().copied().collect::<Vec<_>>(), vec![ButtonId(4), ButtonId(5)]);

        let mut unbiased = SafeButtonPicker::new(0, 4);
        unbiased.record(ButtonId(1));
        assert_eq!(unbiased.recent().count(), 0);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let grid = numbered(4, 4);
        let picker = SafeButtonPicker::new(2, 6);
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(picker.pick(&grid, &mut a), picker.pick(&grid, &mut b));
        }
    }

    proptest! {
        #[test]
        fn prop_choice_is_member_within_iterations(
            seed in any::<u64>(),
            cols in 1usize..6,
            rows in 1usize..6,
            bias in 0u32..6,
            iterations in 1u32..10,
            history in prop::collection::vec(1u32..40, 0..6),
        ) {
            let grid = numbered(cols, rows);
            let mut picker = SafeButtonPicker::new(bias, iterations);
            for id in history {
                picker.record(ButtonId(id));
            }
            let mut rng = Pcg32::seed_from_u64(seed);
            let choice = picker.pick(&grid, &mut rng);
            prop_assert!(grid.contains(choice.button));
            prop_assert!(choice.draws >= 1 && choice.draws <= iterations);
        }
    }
}
