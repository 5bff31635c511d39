use courtside_model::{AttributeKind, PlayerId};
use std::time::Duration;

pub const SAVANT_BASE_URL: &str = "http://nbasavant.com";
pub const NBA_BASE_URL: &str = "https://www.nba.com";
pub const USER_AGENT: &str = "courtside/0.1 (player attribute scraper)";

/// The two external sites player attributes are scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// nbasavant.com player pages (wingspan).
    Savant,
    /// nba.com player pages (height, position).
    NbaCom,
}

impl Source {
    pub fn name(&self) -> &'static str {
        match self {
            Source::Savant => "nbasavant.com",
            Source::NbaCom => "nba.com",
        }
    }

    /// The source whose player page serves `kind`.
    pub fn for_kind(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Wingspan => Source::Savant,
            AttributeKind::Height | AttributeKind::Position => Source::NbaCom,
        }
    }
}

/// What the pipeline does when a page cannot be retrieved at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    /// Stop the run with the transport error.
    #[default]
    Abort,
    /// Log a warning and record the source's attributes as missing.
    Missing,
}

/// Where and how player pages are fetched.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub savant_base_url: String,
    pub nba_base_url: String,
    pub user_agent: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub on_fetch_error: FetchFailurePolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            savant_base_url: SAVANT_BASE_URL.to_string(),
            nba_base_url: NBA_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
            on_fetch_error: FetchFailurePolicy::Abort,
        }
    }
}

impl SourceConfig {
    /// Build the player page URL for `id` on `source`.
    pub fn player_url(&self, source: Source, id: &PlayerId) -> String {
        match source {
            Source::Savant => format!(
                "{}/player.php?player_id={id}",
                self.savant_base_url.trim_end_matches('/')
            ),
            Source::NbaCom => format!("{}/player/{id}", self.nba_base_url.trim_end_matches('/')),
        }
    }
}
