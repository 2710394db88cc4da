//! Button grid storage and section rotation
//!
//! The grid is stored row-major: `rows[row][col]`. Indices exposed to callers
//! are `(col, row)` pairs, zero-based. Rotation shifts a whole row or column by
//! one position and wraps the element leaving one end back to the other end,
//! so every rotation is a cyclic permutation of that section.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::state::ButtonId;
use crate::error::BoardError;

/// Direction a section moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward higher indices (down a column, right along a row)
    Forward,
    /// Toward lower indices
    Backward,
}

/// Kind of grid section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSectionType {
    Column,
    Row,
}

/// A full row or column, the unit of rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSection {
    pub kind: GridSectionType,
    pub index: usize,
}

impl GridSection {
    pub fn column(index: usize) -> Self {
        Self {
            kind: GridSectionType::Column,
            index,
        }
    }

    pub fn row(index: usize) -> Self {
        Self {
            kind: GridSectionType::Row,
            index,
        }
    }
}

/// One section shifted one step during a cycle tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMove {
    pub section: GridSection,
    pub direction: Direction,
}

/// True if the element at `index` leaves the sequence when shifted one step
/// in `direction` and must wrap to the opposite end.
///
/// Only the last index moving `Forward` and index 0 moving `Backward` wrap.
/// A single-element sequence wraps in both directions. Indices outside the
/// sequence never wrap.
pub fn is_button_traveling_off_board<T>(sequence: &[T], index: usize, direction: Direction) -> bool {
    if index >= sequence.len() {
        return false;
    }
    match direction {
        Direction::Forward => index == sequence.len() - 1,
        Direction::Backward => index == 0,
    }
}

/// Fixed-size grid of button references
///
/// Serialized as its rows; deserializing goes through [`ButtonGrid::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<ButtonId>>", into = "Vec<Vec<ButtonId>>")]
pub struct ButtonGrid {
    cols: usize,
    rows: Vec<Vec<ButtonId>>,
}

impl ButtonGrid {
    /// Build a `cols` x `rows` grid, filling it row by row from `allocate`
    pub fn new(
        cols: usize,
        rows: usize,
        mut allocate: impl FnMut() -> ButtonId,
    ) -> Result<Self, BoardError> {
        if cols == 0 || rows == 0 {
            return Err(BoardError::EmptyGrid);
        }
        let rows: Vec<Vec<ButtonId>> = (0..rows)
            .map(|_| (0..cols).map(|_| allocate()).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// Wrap buttons spawned elsewhere. Every row must have the same width and
    /// every button must appear once.
    pub fn from_rows(rows: Vec<Vec<ButtonId>>) -> Result<Self, BoardError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(BoardError::EmptyGrid);
        }
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(BoardError::RaggedGrid {
                row,
                expected: cols,
                actual,
            });
        }
        let mut seen = HashSet::with_capacity(cols * rows.len());
        if let Some(&duplicate) = rows.iter().flatten().find(|&&b| !seen.insert(b)) {
            return Err(BoardError::DuplicateButton(duplicate));
        }
        Ok(Self { cols, rows })
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Total number of buttons
    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buttons in the given section kind
    pub fn section_len(&self, kind: GridSectionType) -> usize {
        match kind {
            GridSectionType::Column => self.rows(),
            GridSectionType::Row => self.cols,
        }
    }

    /// Number of sections of the given kind
    pub fn section_count(&self, kind: GridSectionType) -> usize {
        match kind {
            GridSectionType::Column => self.cols,
            GridSectionType::Row => self.rows(),
        }
    }

    /// Every section of the listed kinds, columns first
    pub fn sections(&self, kinds: &[GridSectionType]) -> Vec<GridSection> {
        kinds
            .iter()
            .flat_map(|&kind| {
                (0..self.section_count(kind)).map(move |index| GridSection { kind, index })
            })
            .collect()
    }

    pub fn button_at(&self, col: usize, row: usize) -> Option<ButtonId> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Button at a flattened row-major index
    pub fn button_at_flat(&self, flat: usize) -> Option<ButtonId> {
        self.button_at(flat % self.cols, flat / self.cols)
    }

    /// `(col, row)` of a button, or `None` if it is not on the board
    pub fn index_of(&self, button: ButtonId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row, buttons)| {
            buttons
                .iter()
                .position(|&b| b == button)
                .map(|col| (col, row))
        })
    }

    pub fn contains(&self, button: ButtonId) -> bool {
        self.index_of(button).is_some()
    }

    /// Buttons in column `index`, top to bottom
    pub fn column(&self, index: usize) -> Option<Vec<ButtonId>> {
        if index >= self.cols {
            return None;
        }
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Buttons in row `index`, left to right
    pub fn row(&self, index: usize) -> Option<Vec<ButtonId>> {
        self.rows.get(index).cloned()
    }

    pub fn section(&self, section: GridSection) -> Option<Vec<ButtonId>> {
        match section.kind {
            GridSectionType::Column => self.column(section.index),
            GridSectionType::Row => self.row(section.index),
        }
    }

    /// All buttons, row by row
    pub fn all_buttons(&self) -> Vec<ButtonId> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Button that wraps to the other end if `section` moves in `direction`
    pub fn wrapping_button(&self, section: GridSection, direction: Direction) -> Option<ButtonId> {
        let buttons = self.section(section)?;
        let index = match direction {
            Direction::Forward => buttons.len() - 1,
            Direction::Backward => 0,
        };
        debug_assert!(is_button_traveling_off_board(&buttons, index, direction));
        buttons.get(index).copied()
    }

    /// Shift a whole section one step in `direction`, wrapping at the edge.
    ///
    /// Fails without touching the grid if the section index is out of range.
    pub fn rotate_section(
        &mut self,
        section: GridSection,
        direction: Direction,
    ) -> Result<(), BoardError> {
        let count = self.section_count(section.kind);
        if section.index >= count {
            return Err(BoardError::SectionOutOfRange {
                section,
                len: count,
            });
        }

        match section.kind {
            GridSectionType::Row => rotate_slice(&mut self.rows[section.index], direction),
            GridSectionType::Column => {
                let col = section.index;
                let mut column: Vec<ButtonId> = self.rows.iter().map(|row| row[col]).collect();
                rotate_slice(&mut column, direction);
                for (row, button) in self.rows.iter_mut().zip(column) {
                    row[col] = button;
                }
            }
        }
        Ok(())
    }

    /// Apply a sequence of moves in order
    pub fn apply_moves(&mut self, moves: &[SectionMove]) -> Result<(), BoardError> {
        for mv in moves {
            self.rotate_section(mv.section, mv.direction)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<ButtonId>>> for ButtonGrid {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<ButtonId>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<ButtonGrid> for Vec<Vec<ButtonId>> {
    fn from(grid: ButtonGrid) -> Self {
        grid.rows
    }
}

fn rotate_slice(buttons: &mut [ButtonId], direction: Direction) {
    if buttons.is_empty() {
        return;
    }
    match direction {
        Direction::Forward => buttons.rotate_right(1),
        Direction::Backward => buttons.rotate_left(1),
    }
}
