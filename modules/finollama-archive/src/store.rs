// Postgres persistence for cached fact checks.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::warn;

use finollama_common::{ContentRecord, FactCheckPayload};

use crate::error::Result;

/// A row from the content_records table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct StoredRecord {
    url: String,
    content: String,
    content_hash: String,
    facts: Option<serde_json::Value>,
    updated_at: DateTime<Utc>,
}

impl From<StoredRecord> for ContentRecord {
    fn from(row: StoredRecord) -> Self {
        let facts = row.facts.and_then(|value| {
            FactCheckPayload::from_value(value)
                .map_err(|e| warn!(url = %row.url, error = %e, "Stored facts no longer parse; ignoring"))
                .ok()
        });
        ContentRecord {
            url: row.url,
            content: row.content,
            content_hash: row.content_hash,
            facts,
            timestamp: row.updated_at,
        }
    }
}

/// At most one record per URL; writes overwrite in place.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Run the embedded SQL migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn lookup(&self, url: &str) -> Result<Option<ContentRecord>> {
        let row = sqlx::query_as::<_, StoredRecord>(
            r#"
            SELECT url, content, content_hash, facts, updated_at
            FROM content_records
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ContentRecord::from))
    }

    /// Insert or overwrite the record for `record.url`. Last writer wins.
    pub async fn upsert(&self, record: &ContentRecord) -> Result<()> {
        let facts = record
            .facts
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO content_records (url, content, content_hash, facts, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (url) DO UPDATE SET
                content = EXCLUDED.content,
                content_hash = EXCLUDED.content_hash,
                facts = EXCLUDED.facts,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&record.url)
        .bind(&record.content)
        .bind(&record.content_hash)
        .bind(&facts)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
