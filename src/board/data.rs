//! Board data-table rows
//!
//! A row describes one level's board: grid size and cycling ruleset. Rows are
//! loaded once at board construction and never change afterwards. Keys are
//! PascalCase so exported data tables load without renaming.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::grid::GridSectionType;
use crate::error::BoardError;

/// Which kind of section may rotate during a cycle tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionTypes {
    Columns,
    Rows,
    #[default]
    Mixed,
}

impl SectionTypes {
    pub fn kinds(&self) -> &'static [GridSectionType] {
        match self {
            SectionTypes::Columns => &[GridSectionType::Column],
            SectionTypes::Rows => &[GridSectionType::Row],
            SectionTypes::Mixed => &[GridSectionType::Column, GridSectionType::Row],
        }
    }
}

fn default_rounds() -> u32 {
    1
}

/// Data used to build a gameboard and its ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameboardData {
    pub cols: u32,
    pub rows: u32,
    /// Rotation ticks per cycle phase
    pub cycle_count: u32,
    /// Sections rotated on each tick
    pub sections_move_per_cycle: u32,
    /// Speed multiplier for every timed step
    pub time_scale: f32,
    #[serde(default)]
    pub section_types: SectionTypes,
    /// Rounds to clear before the level succeeds
    #[serde(default = "default_rounds")]
    pub rounds: u32,
}

impl Default for GameboardData {
    fn default() -> Self {
        Self {
            cols: 3,
            rows: 3,
            cycle_count: 4,
            sections_move_per_cycle: 1,
            time_scale: 1.0,
            section_types: SectionTypes::Mixed,
            rounds: 1,
        }
    }
}

impl GameboardData {
    /// Reject rows that cannot build a playable board
    pub fn validate(&self) -> Result<(), BoardError> {
        let positive = [
            ("Cols", self.cols),
            ("Rows", self.rows),
            ("CycleCount", self.cycle_count),
            ("SectionsMovePerCycle", self.sections_move_per_cycle),
            ("Rounds", self.rounds),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(BoardError::InvalidConfig {
                    field,
                    reason: "must be positive",
                });
            }
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(BoardError::InvalidConfig {
                field: "TimeScale",
                reason: "must be a positive finite number",
            });
        }
        Ok(())
    }

    /// Parse and validate a single row
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }
}

/// A named row as it appears in a data-table export
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NamedRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(flatten)]
    data: GameboardData,
}

/// Named board rows, in file order
#[derive(Debug, Clone, Default)]
pub struct BoardTable {
    rows: Vec<(String, GameboardData)>,
}

impl BoardTable {
    /// Parse a JSON array of rows. Every row is validated.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let named: Vec<NamedRow> = serde_json::from_str(json)?;
        for row in &named {
            if let Err(e) = row.data.validate() {
                log::error!("Board row '{}' rejected: {}", row.name, e);
                return Err(e);
            }
        }
        Ok(Self {
            rows: named.into_iter().map(|r| (r.name, r.data)).collect(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        log::info!("Loaded {} board rows from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn row(&self, name: &str) -> Option<&GameboardData> {
        self.rows.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(n, _)| n.as_str())
    }

    pub fn first(&self) -> Option<(&str, &GameboardData)> {
        self.rows.first().map(|(n, d)| (n.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
