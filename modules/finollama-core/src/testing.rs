// Test mocks for the explore pipeline.
//
// Four mocks matching the four trait boundaries:
// - MockFetcher (ContentFetcher): HashMap-based URL→HTML or status
// - MockExtractor (ArticleExtractor): HashMap-based HTML→text
// - MockFactExtractor (FactExtractor): fixed reply or provider failure
// - MockRecordStore (RecordStore): stateful in-memory table
//
// Every mock counts its calls so tests can assert which collaborators ran.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use ai_client::AiError;
use finollama_archive::FetchError;
use finollama_common::ContentRecord;

use crate::traits::{ArticleExtractor, ContentFetcher, FactExtractor, RecordStore};

/// Wrap a JSON document in the fenced block the prompt asks for.
pub fn fenced_reply(json: &str) -> String {
    format!("Here is the fact check:\n```json\n{json}\n```\n")
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Returns registered bodies; unregistered URLs fail as network errors.
/// Builder pattern: `.on_page()`, `.on_status()`.
pub struct MockFetcher {
    pages: Mutex<HashMap<String, Result<String, u16>>>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn on_page(self, url: &str, html: &str) -> Self {
        self.set_page(url, html);
        self
    }

    /// Respond to `url` with a non-2xx status.
    pub fn on_status(self, url: &str, status: u16) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(status));
        self
    }

    /// Change what `url` serves after construction.
    pub fn set_page(&self, url: &str, html: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(html.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.lock().unwrap().get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(FetchError::Network(format!(
                "MockFetcher: no page registered for {url}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// HTML→text lookup. Unregistered HTML is returned trimmed, unchanged.
pub struct MockExtractor {
    texts: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            texts: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn on_html(mut self, html: &str, text: &str) -> Self {
        self.texts.insert(html.to_string(), text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleExtractor for MockExtractor {
    fn extract(&self, html: &str, _url: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts
            .get(html)
            .cloned()
            .unwrap_or_else(|| html.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// MockFactExtractor
// ---------------------------------------------------------------------------

/// Replies with a fixed string, or fails like an unavailable provider.
/// Records every article it was asked about.
pub struct MockFactExtractor {
    reply: Mutex<Option<String>>,
    requests: Mutex<Vec<String>>,
}

impl MockFactExtractor {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Mutex::new(Some(reply.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with a 503 from the provider.
    pub fn failing() -> Self {
        Self {
            reply: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = Some(reply.to_string());
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FactExtractor for MockFactExtractor {
    async fn extract_facts(&self, text: &str) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(text.to_string());
        match self.reply.lock().unwrap().clone() {
            Some(reply) => Ok(reply),
            None => Err(AiError::Api {
                status: 503,
                message: "MockFactExtractor: provider unavailable".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MockRecordStore
// ---------------------------------------------------------------------------

/// In-memory table keyed by URL. Thread-safe via interior Mutex.
pub struct MockRecordStore {
    records: Mutex<HashMap<String, ContentRecord>>,
    lookups: AtomicUsize,
    upserts: AtomicUsize,
    fail_on_write: bool,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
            upserts: AtomicUsize::new(0),
            fail_on_write: false,
        }
    }

    /// Pre-populate a record.
    pub fn with_record(self, record: ContentRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(record.url.clone(), record);
        self
    }

    /// Make `upsert` return an error for every call.
    pub fn failing_writes(mut self) -> Self {
        self.fail_on_write = true;
        self
    }

    pub fn get(&self, url: &str) -> Option<ContentRecord> {
        self.records.lock().unwrap().get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn lookup(&self, url: &str) -> Result<Option<ContentRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().get(url).cloned())
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_write {
            bail!("MockRecordStore: write refused");
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.url.clone(), record.clone());
        Ok(())
    }
}
