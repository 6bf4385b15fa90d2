#![allow(clippy::expect_used, clippy::doc_markdown, clippy::uninlined_format_args)]
//! Example: Run one invoice sync pass over a mailbox
//!
//! Connects to an IMAP account, walks the unseen messages in the chosen
//! folder, extracts invoice attachments, and records every processed
//! message in a local SQLite ledger (`invoicebox.db`).
//!
//! The attachment processor here is a stand-in: it accepts every
//! document and derives the invoice number from the file stem. A real
//! deployment plugs OCR or an ERP import in its place.
//!
//! ## Running
//!
//! ```bash
//! cargo run --package invoicebox-core --example sync_inbox
//! ```

use std::io::{self, Write};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use invoicebox_core::{
    Attachment, AttachmentPolicy, AttachmentProcessor, InvoiceRegistry, MessageParser, RunMode,
    SqliteLedger, SyncOrchestrator,
};
use invoicebox_imap::{EmailConfig, Provider, Session};

/// Derives the invoice number from the file stem, standing in for a real
/// OCR or ERP integration.
struct StemProcessor;

#[async_trait::async_trait]
impl AttachmentProcessor for StemProcessor {
    async fn process_attachment(
        &self,
        attachment: &Attachment,
    ) -> invoicebox_core::Result<Option<String>> {
        println!(
            "  processing {} ({} bytes, {})",
            attachment.filename,
            attachment.size(),
            attachment.content_type
        );
        let stem = attachment
            .filename
            .rsplit_once('.')
            .map_or(attachment.filename.as_str(), |(stem, _)| stem);
        Ok(Some(stem.to_uppercase()))
    }
}

struct NeverDuplicate;

#[async_trait::async_trait]
impl InvoiceRegistry for NeverDuplicate {
    async fn is_duplicate_invoice(&self, _invoice_number: &str) -> bool {
        false
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoicebox_core=debug,invoicebox_imap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("InvoiceBox - Mailbox Sync");
    println!("=========================\n");

    let email = prompt("Email address")?;
    let password = prompt("App password")?;
    let folder = prompt("Folder [INBOX]")?;

    let mut config = match Provider::from_email(&email) {
        Some(provider) => {
            println!("\nDetected provider: {}", provider.display_name());
            EmailConfig::for_provider(provider, &email, &password)
        }
        None => {
            let host = prompt("IMAP server host")?;
            EmailConfig::new(host, &email, &password)
        }
    };
    if !folder.is_empty() {
        config = config.folder(folder);
    }

    println!("\nTesting connection to {}:{}...", config.host, config.port);
    Session::test_connection(config.clone()).await?;
    println!("✓ Connection and login OK\n");

    let ledger = SqliteLedger::open("invoicebox.db").await?;
    let orchestrator = SyncOrchestrator::new(
        config,
        MessageParser::new(AttachmentPolicy::default()),
        StemProcessor,
        NeverDuplicate,
        ledger.clone(),
    );

    println!("Syncing...");
    let summary = orchestrator.run(RunMode::Interactive).await;
    println!("✓ Sync finished: {summary}\n");

    let history = ledger.recent_history(10).await?;
    if !history.is_empty() {
        println!("Recent sync history:");
        for record in &history {
            println!(
                "  {}  {:7}  {} invoice(s)  {}",
                record.processed_date.format("%Y-%m-%d %H:%M"),
                record.status.as_str(),
                record.invoice_count(),
                record.subject
            );
        }
    }

    Ok(())
}
