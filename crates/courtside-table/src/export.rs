use crate::shots::ShotTable;
use anyhow::{Context, Result};
use courtside_model::{AttributeKind, AttributeValue, PlayerId, PlayerRecord};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

pub const DEFENDER_HEIGHT_COLUMN: &str = "closest_def_height";
pub const DEFENDER_WINGSPAN_COLUMN: &str = "closest_def_wingspan";

/// Which attribute columns the player table carries after `player_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerColumns(pub Vec<AttributeKind>);

impl Default for PlayerColumns {
    fn default() -> Self {
        Self(vec![AttributeKind::Height, AttributeKind::Position])
    }
}

impl PlayerColumns {
    pub fn with_wingspan(mut self) -> Self {
        if !self.0.contains(&AttributeKind::Wingspan) {
            self.0.push(AttributeKind::Wingspan);
        }
        self
    }

    pub fn kinds(&self) -> &[AttributeKind] {
        &self.0
    }
}

/// Write one row per player: `player_id` followed by the chosen attributes.
pub fn write_player_table(path: &Path, records: &[PlayerRecord], columns: &PlayerColumns) -> Result<()> {
    let file = create(path)?;
    write_player_rows(file, records, columns)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote player table");
    Ok(())
}

pub fn write_player_rows<W: Write>(
    wtr: W,
    records: &[PlayerRecord],
    columns: &PlayerColumns,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(wtr);

    let mut header = vec!["player_id"];
    header.extend(columns.kinds().iter().map(|k| k.as_str()));
    wtr.write_record(&header)?;

    for record in records {
        let mut row = vec![record.player_id.to_string()];
        row.extend(columns.kinds().iter().map(|k| record.get(*k).to_string()));
        wtr.write_record(&row)?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Write the shot table with closest-defender height and wingspan appended
/// to every row. Rows whose defender has no record get `NA`.
pub fn write_shots_with_defenders(
    path: &Path,
    shots: &ShotTable,
    defender_column: usize,
    records: &[PlayerRecord],
) -> Result<()> {
    let file = create(path)?;
    write_shot_rows(file, shots, defender_column, records)?;
    tracing::info!(path = %path.display(), rows = shots.len(), "Wrote shot table with defender attributes");
    Ok(())
}

pub fn write_shot_rows<W: Write>(
    wtr: W,
    shots: &ShotTable,
    defender_column: usize,
    records: &[PlayerRecord],
) -> Result<()> {
    let by_id: HashMap<&PlayerId, &PlayerRecord> =
        records.iter().map(|r| (&r.player_id, r)).collect();
    let missing = AttributeValue::Missing;

    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(wtr);

    let mut header: Vec<&str> = shots.headers().iter().collect();
    header.push(DEFENDER_HEIGHT_COLUMN);
    header.push(DEFENDER_WINGSPAN_COLUMN);
    wtr.write_record(&header)?;

    let width = shots.headers().len();
    for (defender, row) in shots.column_ids(defender_column).iter().zip(shots.rows()) {
        let record = defender.as_ref().and_then(|id| by_id.get(id));
        let height = record.map_or(&missing, |r| &r.height);
        let wingspan = record.map_or(&missing, |r| &r.wingspan);

        let mut cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        cells.resize(width.max(cells.len()), String::new());
        cells.push(height.to_string());
        cells.push(wingspan.to_string());
        wtr.write_record(&cells)?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

fn create(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
