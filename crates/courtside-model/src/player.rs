use crate::attribute::{AttributeKind, AttributeValue};
use serde::Serialize;
use std::fmt;

/// Opaque player key shared by the shot data and both sites' URL schemes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Build an id from a raw cell, trimming surrounding whitespace.
    /// Returns `None` for empty cells.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

/// The scraped attributes of one player.
///
/// Every attribute starts out `Missing`; the acquisition pipeline fills in
/// the ones it was asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub height: AttributeValue,
    pub position: AttributeValue,
    pub wingspan: AttributeValue,
}

impl PlayerRecord {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            height: AttributeValue::Missing,
            position: AttributeValue::Missing,
            wingspan: AttributeValue::Missing,
        }
    }

    pub fn get(&self, kind: AttributeKind) -> &AttributeValue {
        match kind {
            AttributeKind::Height => &self.height,
            AttributeKind::Position => &self.position,
            AttributeKind::Wingspan => &self.wingspan,
        }
    }

    pub fn set(&mut self, kind: AttributeKind, value: AttributeValue) {
        match kind {
            AttributeKind::Height => self.height = value,
            AttributeKind::Position => self.position = value,
            AttributeKind::Wingspan => self.wingspan = value,
        }
    }

    /// Count of attributes that are not `Missing`.
    pub fn found_count(&self) -> usize {
        AttributeKind::ALL
            .iter()
            .filter(|k| !self.get(**k).is_missing())
            .count()
    }
}
