use crate::extract;
use crate::fetch::{Fetcher, RawDocument};
use crate::source::{FetchFailurePolicy, Source, SourceConfig};
use anyhow::Result;
use courtside_model::{AttributeKind, PlayerId, PlayerRecord};

/// Fetches player pages and turns them into `PlayerRecord`s, one player
/// at a time.
pub struct Pipeline {
    config: SourceConfig,
    fetcher: Fetcher,
}

impl Pipeline {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Fetch the requested attributes of one player.
    ///
    /// Each source is fetched at most once: height and position share a
    /// single nba.com page. Attributes that were not requested stay
    /// `Missing`.
    pub async fn fetch_player(&self, id: &PlayerId, kinds: &[AttributeKind]) -> Result<PlayerRecord> {
        let mut record = PlayerRecord::new(id.clone());

        for source in [Source::NbaCom, Source::Savant] {
            let mut wanted: Vec<AttributeKind> = kinds
                .iter()
                .copied()
                .filter(|k| Source::for_kind(*k) == source)
                .collect();
            wanted.sort();
            wanted.dedup();
            if wanted.is_empty() {
                continue;
            }

            let Some(doc) = self.fetch_source(source, id).await? else {
                continue;
            };
            for kind in wanted {
                let value = extract::extract(&doc, kind);
                if value.is_missing() {
                    tracing::debug!(player = %id, kind = %kind, source = source.name(), "No value on page");
                }
                record.set(kind, value);
            }
        }

        Ok(record)
    }

    /// Fetch every player in order, strictly one after another.
    pub async fn fetch_roster(
        &self,
        ids: &[PlayerId],
        kinds: &[AttributeKind],
    ) -> Result<Vec<PlayerRecord>> {
        let mut records = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            let record = self.fetch_player(id, kinds).await?;
            tracing::info!(
                player = %id,
                progress = format!("{}/{}", index + 1, ids.len()),
                found = record.found_count(),
                "Fetched player"
            );
            records.push(record);
        }
        Ok(records)
    }

    /// Fetch one source page, applying the transport failure policy.
    ///
    /// Returns `Ok(None)` when the page could not be retrieved and the
    /// policy says to record the attributes as missing.
    async fn fetch_source(&self, source: Source, id: &PlayerId) -> Result<Option<RawDocument>> {
        let url = self.config.player_url(source, id);
        match self.fetcher.fetch(&url).await {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => match self.config.on_fetch_error {
                FetchFailurePolicy::Abort => Err(e.context(format!(
                    "Fetching {} page for player {id}",
                    source.name()
                ))),
                FetchFailurePolicy::Missing => {
                    tracing::warn!(
                        player = %id,
                        url = %url,
                        error = format!("{e:#}"),
                        "Page unavailable, recording attributes as missing"
                    );
                    Ok(None)
                }
            },
        }
    }
}
