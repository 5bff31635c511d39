use crate::source::SourceConfig;
use anyhow::{Context, Result};
use scraper::Html;

/// A fetched page parsed into an HTML5 document tree.
pub struct RawDocument {
    html: Html,
}

impl RawDocument {
    /// Parse markup without touching the network.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Retrieves player pages over HTTP.
///
/// Transport failures (connection errors, non-success status, unreadable
/// body) come back as errors; deciding whether they are fatal is left to
/// the caller.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GET `url` and return the response body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        let status = response.status();
        anyhow::ensure!(status.is_success(), "HTTP {status} for {url}");

        response.text().await.context("Failed to read response body")
    }

    /// GET `url` and parse the body into a document.
    pub async fn fetch(&self, url: &str) -> Result<RawDocument> {
        tracing::debug!(url = %url, "Fetching page");
        let body = self.fetch_text(url).await?;
        tracing::debug!(url = %url, bytes = body.len(), "Received HTML");
        Ok(RawDocument::parse(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;
    use std::time::Duration;

    #[test]
    fn test_parse_without_network() {
        let doc = RawDocument::parse("<html><body><p class=\"x\">hi</p></body></html>");
        let sel = Selector::parse("p.x").unwrap();
        let text: String = doc.html().select(&sel).next().unwrap().text().collect();
        assert_eq!(text, "hi");
    }

    #[test]
    fn test_builds_with_timeout() {
        let config = SourceConfig {
            timeout: Some(Duration::from_secs(5)),
            ..SourceConfig::default()
        };
        assert!(Fetcher::new(&config).is_ok());
    }
}
