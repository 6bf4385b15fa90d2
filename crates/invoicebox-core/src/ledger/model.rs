//! Sync ledger data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome recorded for one processed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// At least one new invoice was accepted from the message.
    Success,
    /// The message completed without a newly accepted invoice.
    Failed,
}

impl SyncStatus {
    /// Database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    /// Parses the database representation, treating anything unknown as
    /// failed.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("success") {
            Self::Success
        } else {
            Self::Failed
        }
    }
}

/// One ledger row: the outcome of processing a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    /// Stable message key, the Message-ID or a sequence number fallback.
    pub message_id: String,
    /// Decoded subject at processing time.
    pub subject: String,
    /// Decoded sender at processing time.
    pub sender: String,
    /// Raw Date header value.
    pub received_date: String,
    /// When this run processed the message.
    pub processed_date: DateTime<Utc>,
    /// Comma-joined invoice numbers accepted from the message.
    pub invoice_numbers: String,
    /// Whether the message yielded at least one new invoice.
    pub status: SyncStatus,
}

impl SyncRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(
        message_id: impl Into<String>,
        subject: impl Into<String>,
        sender: impl Into<String>,
        received_date: impl Into<String>,
        invoice_numbers: &[String],
        status: SyncStatus,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            subject: subject.into(),
            sender: sender.into(),
            received_date: received_date.into(),
            processed_date: Utc::now(),
            invoice_numbers: invoice_numbers.join(","),
            status,
        }
    }

    /// Creates a failed record for a message that could not be read.
    #[must_use]
    pub fn failure(message_id: impl Into<String>) -> Self {
        Self::new(message_id, "", "", "", &[], SyncStatus::Failed)
    }

    /// Number of invoice numbers recorded on this row.
    #[must_use]
    pub fn invoice_count(&self) -> usize {
        if self.invoice_numbers.is_empty() {
            0
        } else {
            self.invoice_numbers.split(',').count()
        }
    }
}

/// The most recent ledger row, projected for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSync {
    /// When the most recent message was processed.
    pub processed_date: DateTime<Utc>,
    /// Outcome recorded for it.
    pub status: SyncStatus,
    /// Invoices recorded on that row.
    pub invoice_count: usize,
    /// Subject of that message.
    pub subject: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_database_form() {
        assert_eq!(SyncStatus::parse(SyncStatus::Success.as_str()), SyncStatus::Success);
        assert_eq!(SyncStatus::parse(SyncStatus::Failed.as_str()), SyncStatus::Failed);
        assert_eq!(SyncStatus::parse("corrupt"), SyncStatus::Failed);
    }

    #[test]
    fn test_invoice_count_handles_empty_and_joined_lists() {
        let empty = SyncRecord::failure("<m1@example.com>");
        assert_eq!(empty.invoice_count(), 0);

        let one = SyncRecord::new(
            "<m2@example.com>",
            "Invoice",
            "billing@supplier.example",
            "Mon, 4 Aug 2025 09:15:00 +0300",
            &["INV-1".to_string()],
            SyncStatus::Success,
        );
        assert_eq!(one.invoice_count(), 1);
        assert_eq!(one.invoice_numbers, "INV-1");

        let three = SyncRecord::new(
            "<m3@example.com>",
            "Invoices",
            "billing@supplier.example",
            "Mon, 4 Aug 2025 09:15:00 +0300",
            &["INV-1".to_string(), "INV-2".to_string(), "INV-3".to_string()],
            SyncStatus::Success,
        );
        assert_eq!(three.invoice_count(), 3);
        assert_eq!(three.invoice_numbers, "INV-1,INV-2,INV-3");
    }

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = SyncRecord::new(
            "<m4@example.com>",
            "Invoice",
            "billing@supplier.example",
            "Mon, 4 Aug 2025 09:15:00 +0300",
            &["INV-9".to_string()],
            SyncStatus::Success,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["messageId"], "<m4@example.com>");
        assert_eq!(value["receivedDate"], "Mon, 4 Aug 2025 09:15:00 +0300");
        assert_eq!(value["invoiceNumbers"], "INV-9");
        assert_eq!(value["status"], "success");
        assert!(value["processedDate"].is_string());
    }

    #[test]
    fn test_failure_record_is_failed_with_no_invoices() {
        let record = SyncRecord::failure("42");
        assert_eq!(record.status, SyncStatus::Failed);
        assert_eq!(record.invoice_numbers, "");
        assert_eq!(record.subject, "");
    }
}
