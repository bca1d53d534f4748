use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use finollama_common::{content_hash, validate_url, ContentRecord, FactCheckPayload};

use crate::error::ExploreError;
use crate::parse::parse_fact_check;
use crate::traits::{ArticleExtractor, ContentFetcher, FactExtractor, RecordStore};

/// How long a stored record is served without touching the network.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/// Which branch produced an [`Exploration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Stored record inside the freshness window; nothing was fetched.
    Fresh,
    /// Page re-fetched, but its text hashed to the stored value; no model call.
    Unchanged,
    /// New or changed text; the model was asked and the record rewritten.
    Computed,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Fresh => "fresh",
            Source::Unchanged => "unchanged",
            Source::Computed => "computed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub url: String,
    pub content: String,
    pub facts: Option<FactCheckPayload>,
    pub source: Source,
}

/// Cache-aside fact checking for one URL per call.
///
/// Freshness is checked first, then the content hash, and only then is the
/// model called. Concurrent misses on the same URL are not coalesced; the
/// last upsert wins.
pub struct Explorer {
    fetcher: Arc<dyn ContentFetcher>,
    extractor: Arc<dyn ArticleExtractor>,
    facts: Arc<dyn FactExtractor>,
    store: Arc<dyn RecordStore>,
    freshness: chrono::Duration,
}

impl Explorer {
    pub fn new(
        fetcher: Arc<dyn ContentFetcher>,
        extractor: Arc<dyn ArticleExtractor>,
        facts: Arc<dyn FactExtractor>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            facts,
            store,
            freshness: chrono::Duration::seconds(DEFAULT_FRESHNESS.as_secs() as i64),
        }
    }

    pub fn with_freshness(mut self, window: Duration) -> Self {
        self.freshness = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX);
        self
    }

    pub async fn explore(&self, raw_url: &str) -> Result<Exploration, ExploreError> {
        self.explore_at(raw_url, Utc::now()).await
    }

    pub async fn explore_at(
        &self,
        raw_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Exploration, ExploreError> {
        let url = validate_url(raw_url)?;

        let cached = self.store.lookup(&url).await.map_err(|e| {
            error!(url = %url, error = %e, "Record lookup failed");
            ExploreError::Store(e)
        })?;

        if let Some(record) = &cached {
            if record.is_fresh(now, self.freshness) {
                info!(url = %url, source = "fresh", "Serving cached fact check");
                return Ok(Exploration {
                    url,
                    content: record.content.clone(),
                    facts: record.facts.clone(),
                    source: Source::Fresh,
                });
            }
        }

        let html = self.fetcher.fetch(&url).await?;
        let text = self.extractor.extract(&html, &url);
        let hash = content_hash(&text);

        // A record whose facts could not be read back is recomputed even when the text matches
        if let Some(record) = cached.filter(|r| r.facts.is_some()) {
            if record.content_hash == hash {
                info!(
                    url = %url,
                    source = "unchanged",
                    hash = &hash[..12],
                    "Content unchanged, reusing facts"
                );
                return Ok(Exploration {
                    url,
                    content: record.content,
                    facts: record.facts,
                    source: Source::Unchanged,
                });
            }
        }

        let reply = self.facts.extract_facts(&text).await?;
        let facts = parse_fact_check(&reply)?;

        let record = ContentRecord {
            url: url.clone(),
            content: text,
            content_hash: hash,
            facts: Some(facts),
            timestamp: now,
        };
        self.store.upsert(&record).await.map_err(|e| {
            error!(url = %url, error = %e, "Record upsert failed");
            ExploreError::Store(e)
        })?;

        info!(
            url = %url,
            source = "computed",
            hash = &record.content_hash[..12],
            facts = record.facts.as_ref().map_or(0, |f| f.facts.len()),
            "Stored new fact check"
        );

        Ok(Exploration {
            url,
            content: record.content,
            facts: record.facts,
            source: Source::Computed,
        })
    }
}
