// Trait abstractions for the explore pipeline's collaborators.
//
// ContentFetcher, ArticleExtractor, FactExtractor and RecordStore each hide
// one external system (the web, the extraction library, the LLM, Postgres) so
// the Explorer can be driven by the mocks in `testing`: no network, no database.

use anyhow::Result;
use async_trait::async_trait;

use ai_client::{AiError, TextModel};
use finollama_archive::{html_to_text, FetchError, PageFetcher, PgContentStore};
use finollama_common::ContentRecord;

use crate::facts::LlmFactExtractor;

// ---------------------------------------------------------------------------
// ContentFetcher: the web
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Raw response body for a 2xx GET of `url`.
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        PageFetcher::fetch(self, url).await
    }
}

// ---------------------------------------------------------------------------
// ArticleExtractor: HTML to main-body text
// ---------------------------------------------------------------------------

pub trait ArticleExtractor: Send + Sync {
    fn extract(&self, html: &str, url: &str) -> String;
}

/// Readability extraction via spider_transformations.
pub struct ReadabilityExtractor;

impl ArticleExtractor for ReadabilityExtractor {
    fn extract(&self, html: &str, url: &str) -> String {
        html_to_text(html, Some(url))
    }
}

// ---------------------------------------------------------------------------
// FactExtractor: the LLM
// ---------------------------------------------------------------------------

#[async_trait]
pub trait FactExtractor: Send + Sync {
    /// Ask the model for a fact check of `text` and return its raw reply.
    async fn extract_facts(&self, text: &str) -> std::result::Result<String, AiError>;
}

#[async_trait]
impl<M: TextModel> FactExtractor for LlmFactExtractor<M> {
    async fn extract_facts(&self, text: &str) -> std::result::Result<String, AiError> {
        LlmFactExtractor::extract_facts(self, text).await
    }
}

// ---------------------------------------------------------------------------
// RecordStore: Postgres
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn lookup(&self, url: &str) -> Result<Option<ContentRecord>>;

    /// Insert or overwrite the record for `record.url`.
    async fn upsert(&self, record: &ContentRecord) -> Result<()>;
}

#[async_trait]
impl RecordStore for PgContentStore {
    async fn lookup(&self, url: &str) -> Result<Option<ContentRecord>> {
        Ok(PgContentStore::lookup(self, url).await?)
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<()> {
        Ok(PgContentStore::upsert(self, record).await?)
    }
}
