use std::path::PathBuf;
use thiserror::Error;

pub mod export;
pub mod shots;

pub use export::{write_player_table, write_shots_with_defenders, PlayerColumns};
pub use shots::{ShotTable, DEFAULT_SHOOTER_COLUMN, DEFENDER_COLUMN_CANDIDATES};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("column not found: none of [{}] in header [{}]", .wanted.join(", "), .available.join(", "))]
    MissingColumn {
        wanted: Vec<String>,
        available: Vec<String>,
    },

    #[error("input table has no header row")]
    NoHeader,
}

/// Input and output locations for a table job, plus optional column
/// overrides for the player id columns.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Shooter id column; `player_id` when unset.
    pub shooter_column: Option<String>,
    /// Closest-defender id column; resolved from the known spellings when unset.
    pub defender_column: Option<String>,
}

impl TableConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            shooter_column: None,
            defender_column: None,
        }
    }

    /// Candidate names for the shooter column, most specific first.
    pub fn shooter_candidates(&self) -> Vec<String> {
        match &self.shooter_column {
            Some(name) => vec![name.clone()],
            None => vec![DEFAULT_SHOOTER_COLUMN.to_string()],
        }
    }

    /// Candidate names for the defender column, most specific first.
    pub fn defender_candidates(&self) -> Vec<String> {
        match &self.defender_column {
            Some(name) => vec![name.clone()],
            None => DEFENDER_COLUMN_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
