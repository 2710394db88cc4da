//! Error type shared by board construction, configuration and rotation

use thiserror::Error;

use crate::board::{BoardPhase, ButtonId, GridSection};

/// Errors raised by the board core
#[derive(Debug, Error)]
pub enum BoardError {
    /// A configuration value is out of range
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    /// A grid was built with no buttons
    #[error("button grid must contain at least one button")]
    EmptyGrid,
    /// The same button appears more than once in a grid
    #[error("button {0:?} appears more than once in the grid")]
    DuplicateButton(ButtonId),
    /// A row does not have the same width as the first row
    #[error("grid row {row} has {actual} buttons, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Rotation requested for a section that does not exist
    #[error("section {section:?} is out of range (length {len})")]
    SectionOutOfRange { section: GridSection, len: usize },
    /// Operation is not valid in the current phase
    #[error("{operation} is not valid in phase {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: BoardPhase,
    },
    /// Board must be inactive for this operation
    #[error("board is active")]
    BoardActive,
    #[error("failed to parse board data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read board data: {0}")]
    Io(#[from] std::io::Error),
}
