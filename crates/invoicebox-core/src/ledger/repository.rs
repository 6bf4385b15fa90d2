//! SQLite persistence for the sync ledger.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::Result;
use crate::ledger::{LastSync, SyncRecord, SyncStatus};

/// Rows returned by history queries unless the caller asks otherwise.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// SQLite-backed sync ledger.
///
/// One row per processed message, keyed by the message's dedupe key.
/// Re-processing a message overwrites its row instead of inserting a
/// second one, which keeps repeated runs idempotent.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
    pool: Pool<Sqlite>,
}

impl SqliteLedger {
    /// Opens (or creates) the ledger database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub async fn open(db_path: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{db_path}?mode=rwc"))
            .await?;

        let ledger = Self { pool };
        ledger.initialize().await?;
        Ok(ledger)
    }

    /// Creates an in-memory ledger, useful in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let ledger = Self { pool };
        ledger.initialize().await?;
        Ok(ledger)
    }

    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS email_sync_log (
                sync_id INTEGER PRIMARY KEY AUTOINCREMENT,
                email_message_id TEXT NOT NULL UNIQUE,
                email_subject TEXT,
                email_sender TEXT,
                email_date TEXT,
                processed_date TEXT NOT NULL,
                invoice_numbers TEXT,
                status TEXT NOT NULL CHECK(status IN ('success', 'failed'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_email_sync_processed_date
            ON email_sync_log(processed_date)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts or replaces the row for the record's message key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_record(&self, record: &SyncRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO email_sync_log
                (email_message_id, email_subject, email_sender, email_date,
                 processed_date, invoice_numbers, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(email_message_id) DO UPDATE SET
                email_subject = excluded.email_subject,
                email_sender = excluded.email_sender,
                email_date = excluded.email_date,
                processed_date = excluded.processed_date,
                invoice_numbers = excluded.invoice_numbers,
                status = excluded.status
            ",
        )
        .bind(&record.message_id)
        .bind(&record.subject)
        .bind(&record.sender)
        .bind(&record.received_date)
        .bind(record.processed_date.to_rfc3339())
        .bind(&record.invoice_numbers)
        .bind(record.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Looks up the row for a message key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_record(&self, message_id: &str) -> Result<Option<SyncRecord>> {
        let row = sqlx::query(
            r"
            SELECT email_message_id, email_subject, email_sender, email_date,
                   processed_date, invoice_numbers, status
            FROM email_sync_log
            WHERE email_message_id = ?
            ",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().and_then(row_to_record))
    }

    /// Returns the most recent rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_history(&self, limit: u32) -> Result<Vec<SyncRecord>> {
        let rows = sqlx::query(
            r"
            SELECT email_message_id, email_subject, email_sender, email_date,
                   processed_date, invoice_numbers, status
            FROM email_sync_log
            ORDER BY processed_date DESC
            LIMIT ?
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().filter_map(row_to_record).collect())
    }

    /// Projects the newest row for status displays.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn last_sync(&self) -> Result<Option<LastSync>> {
        let newest = self.recent_history(1).await?.into_iter().next();

        Ok(newest.map(|record| LastSync {
            processed_date: record.processed_date,
            status: record.status,
            invoice_count: record.invoice_count(),
            subject: record.subject,
        }))
    }
}

fn row_to_record(row: &SqliteRow) -> Option<SyncRecord> {
    let processed: String = row.get("processed_date");
    let processed_date = DateTime::parse_from_rfc3339(&processed)
        .ok()?
        .with_timezone(&Utc);
    let status: String = row.get("status");

    Some(SyncRecord {
        message_id: row.get("email_message_id"),
        subject: row.get::<Option<String>, _>("email_subject").unwrap_or_default(),
        sender: row.get::<Option<String>, _>("email_sender").unwrap_or_default(),
        received_date: row.get::<Option<String>, _>("email_date").unwrap_or_default(),
        processed_date,
        invoice_numbers: row
            .get::<Option<String>, _>("invoice_numbers")
            .unwrap_or_default(),
        status: SyncStatus::parse(&status),
    })
}
