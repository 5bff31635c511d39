use crate::TableError;
use anyhow::{Context, Result};
use courtside_model::PlayerId;
use csv::StringRecord;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_SHOOTER_COLUMN: &str = "player_id";
pub const DEFENDER_COLUMN_CANDIDATES: [&str; 2] = ["closest_defender_id", "CLOSEST_DEFENDER_PLAYER_ID"];

/// A shot-by-shot input table, kept as raw string cells so every input
/// column can be written back out unchanged.
#[derive(Debug, Clone)]
pub struct ShotTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl ShotTable {
    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("Failed to read shot table {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = table.headers.len(),
            "Read shot table"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(TableError::NoHeader.into());
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .context("Malformed CSV row")?;

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first candidate column present in the header.
    pub fn resolve_column(&self, candidates: &[String]) -> Result<usize, TableError> {
        candidates
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h == name))
            .ok_or_else(|| TableError::MissingColumn {
                wanted: candidates.to_vec(),
                available: self.headers.iter().map(|h| h.to_string()).collect(),
            })
    }

    /// The player id in `column` of every row; `None` for empty or absent cells.
    pub fn column_ids(&self, column: usize) -> Vec<Option<PlayerId>> {
        self.rows
            .iter()
            .map(|row| row.get(column).and_then(PlayerId::parse))
            .collect()
    }

    /// Distinct player ids across `columns`, in first-seen order: all of the
    /// first column, then new ids from the next.
    pub fn unique_ids(&self, columns: &[usize]) -> Vec<PlayerId> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        let mut skipped = 0usize;

        for &column in columns {
            for id in self.column_ids(column) {
                match id {
                    Some(id) => {
                        if seen.insert(id.clone()) {
                            ids.push(id);
                        }
                    }
                    None => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(cells = skipped, "Skipped empty player id cells");
        }
        ids
    }
}
