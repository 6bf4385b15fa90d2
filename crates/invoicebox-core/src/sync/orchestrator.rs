//! End-to-end synchronization runs.
//!
//! A run connects, selects the configured folder, walks the unseen
//! messages, hands admitted attachments to the processing collaborator,
//! and records every completed message in the sync ledger. A failure on
//! one message never abandons the rest of the batch; only a dead
//! connection does.

use async_trait::async_trait;
use invoicebox_imap::{EmailConfig, SeqNum, Session};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::Result;
use crate::ledger::{SqliteLedger, SyncRecord, SyncStatus};
use crate::message::{Attachment, EmailMessage, MessageParser};
use crate::sync::SyncSummary;

/// How a run surfaces its outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Scheduled background run: failures are logged at debug level only.
    Silent,
    /// User-triggered run: failures are logged at error level.
    #[default]
    Interactive,
}

/// Collaborator that turns an admitted attachment into an invoice number.
#[async_trait]
pub trait AttachmentProcessor: Send + Sync {
    /// Processes one attachment.
    ///
    /// `Ok(None)` means the document was readable but carried no
    /// recognizable invoice number.
    async fn process_attachment(&self, attachment: &Attachment) -> Result<Option<String>>;
}

/// Collaborator that answers whether an invoice number is already known.
#[async_trait]
pub trait InvoiceRegistry: Send + Sync {
    /// Returns true when the invoice number already exists.
    ///
    /// Implementations should answer false on lookup failure so ingestion
    /// proceeds rather than silently dropping documents.
    async fn is_duplicate_invoice(&self, invoice_number: &str) -> bool;
}

/// Persistence for per-message sync records.
#[async_trait]
pub trait SyncStore: Send + Sync {
    /// Inserts or replaces the record stored under its message key.
    async fn upsert_record(&self, record: &SyncRecord) -> Result<()>;
}

#[async_trait]
impl SyncStore for SqliteLedger {
    async fn upsert_record(&self, record: &SyncRecord) -> Result<()> {
        Self::upsert_record(self, record).await
    }
}

/// Coordinates one synchronization run end to end.
pub struct SyncOrchestrator<P, R, S> {
    config: EmailConfig,
    parser: MessageParser,
    processor: P,
    registry: R,
    store: S,
}

impl<P, R, S> SyncOrchestrator<P, R, S>
where
    P: AttachmentProcessor,
    R: InvoiceRegistry,
    S: SyncStore,
{
    /// Creates an orchestrator for the given account.
    #[must_use]
    pub fn new(
        config: EmailConfig,
        parser: MessageParser,
        processor: P,
        registry: R,
        store: S,
    ) -> Self {
        Self {
            config,
            parser,
            processor,
            registry,
            store,
        }
    }

    /// Connects to the configured account and runs one pass.
    ///
    /// Never returns an error: a failure that prevents the run from
    /// starting is reported through [`SyncSummary::error_message`].
    pub async fn run(&self, mode: RunMode) -> SyncSummary {
        match Session::connect(self.config.clone()).await {
            Ok(session) => self.run_with_session(session, mode).await,
            Err(error) => fatal_summary(&error, mode),
        }
    }

    /// Runs one pass over an already established session.
    ///
    /// The session is disconnected on every exit path.
    pub async fn run_with_session<T>(&self, mut session: Session<T>, mode: RunMode) -> SyncSummary
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let summary = self.sync(&mut session, mode).await;
        if let Err(error) = session.disconnect().await {
            tracing::debug!(%error, "disconnect after sync failed");
        }
        summary
    }

    async fn sync<T>(&self, session: &mut Session<T>, mode: RunMode) -> SyncSummary
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let folder = session.config().folder.clone();
        if let Err(error) = session.select_folder(&folder).await {
            return fatal_summary(&error, mode);
        }

        let ids = match session.search_unseen().await {
            Ok(ids) => ids,
            Err(error) => return fatal_summary(&error, mode),
        };
        if ids.is_empty() {
            tracing::debug!(folder = %folder, "no unseen messages");
            return SyncSummary::default();
        }
        tracing::info!(folder = %folder, count = ids.len(), "processing unseen messages");

        let mut summary = SyncSummary::default();
        for id in ids {
            summary.messages_processed += 1;
            if let Err(error) = self.process_message(session, id, &mut summary).await {
                summary.errors += 1;
                match mode {
                    RunMode::Silent => {
                        tracing::debug!(sequence = id.get(), %error, "message failed");
                    }
                    RunMode::Interactive => {
                        tracing::error!(sequence = id.get(), %error, "message failed");
                    }
                }
                self.record_failure(id).await;
                if !session.is_connected() {
                    tracing::warn!("connection lost, abandoning the rest of the batch");
                    break;
                }
            }
        }
        summary
    }

    async fn process_message<T>(
        &self,
        session: &mut Session<T>,
        id: SeqNum,
        summary: &mut SyncSummary,
    ) -> Result<()>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let raw = session.fetch_message(id).await?;
        let Some(message) = self.parser.parse(id, &raw)? else {
            tracing::debug!(sequence = id.get(), "no invoice attachments, leaving unseen");
            return Ok(());
        };

        let (accepted, attachment_failed) = self.process_attachments(&message).await;

        if let Err(error) = session.mark_seen(id).await {
            tracing::warn!(sequence = id.get(), %error, "could not mark message seen");
        }

        summary.new_invoices = summary
            .new_invoices
            .saturating_add(u32::try_from(accepted.len()).unwrap_or(u32::MAX));

        let status = if accepted.is_empty() {
            SyncStatus::Failed
        } else {
            SyncStatus::Success
        };
        let record = SyncRecord::new(
            message.dedupe_key(),
            &message.subject,
            &message.sender,
            &message.date,
            &accepted,
            status,
        );
        self.store.upsert_record(&record).await?;

        if attachment_failed {
            summary.errors += 1;
        }
        Ok(())
    }

    async fn process_attachments(&self, message: &EmailMessage) -> (Vec<String>, bool) {
        let mut accepted = Vec::new();
        let mut failed = false;

        for attachment in &message.attachments {
            match self.processor.process_attachment(attachment).await {
                Ok(Some(invoice_number)) => {
                    if self.registry.is_duplicate_invoice(&invoice_number).await {
                        tracing::info!(invoice = %invoice_number, "duplicate invoice skipped");
                    } else {
                        accepted.push(invoice_number);
                    }
                }
                Ok(None) => {
                    tracing::debug!(filename = %attachment.filename, "no invoice number recognized");
                }
                Err(error) => {
                    failed = true;
                    tracing::warn!(filename = %attachment.filename, %error, "attachment processing failed");
                }
            }
        }
        (accepted, failed)
    }

    /// Leaves a failed row for a message that could not be fetched or
    /// parsed. Keyed by sequence number, the only identity we have.
    async fn record_failure(&self, id: SeqNum) {
        let record = SyncRecord::failure(id.get().to_string());
        if let Err(error) = self.store.upsert_record(&record).await {
            tracing::debug!(sequence = id.get(), %error, "could not record failure");
        }
    }
}

fn fatal_summary(error: &invoicebox_imap::Error, mode: RunMode) -> SyncSummary {
    let message = fatal_message(error);
    match mode {
        RunMode::Silent => tracing::debug!(%message, "sync aborted"),
        RunMode::Interactive => tracing::error!(%message, "sync aborted"),
    }
    SyncSummary {
        error_message: Some(message),
        ..SyncSummary::default()
    }
}

/// Keeps authentication and folder failures distinguishable from generic
/// connectivity failures in the reported cause.
fn fatal_message(error: &invoicebox_imap::Error) -> String {
    match error {
        invoicebox_imap::Error::Auth(_) | invoicebox_imap::Error::FolderNotFound(_) => {
            error.to_string()
        }
        other => format!("Connection failed: {other}"),
    }
}
