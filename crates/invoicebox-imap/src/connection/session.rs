//! High-level IMAP session for mailbox scanning.
//!
//! `Session` wraps the type-state [`Client`] and manages state transitions
//! internally, so callers get a plain mutable-reference API: connect once,
//! then select, search, fetch, and mark messages without tracking which
//! client state they hold. Every network call is bounded by the configured
//! timeouts; a timed-out or broken connection is dropped rather than reused.
//!
//! ## Example
//!
//! ```ignore
//! use invoicebox_imap::{EmailConfig, Session};
//!
//! let config = EmailConfig::new("imap.example.com", "user@example.com", "app-pass")
//!     .folder("Receipts");
//!
//! let mut session = Session::connect(config).await?;
//! session.select_folder("Receipts").await?;
//! for id in session.search_unseen().await? {
//!     let raw = session.fetch_message(id).await?;
//!     // parse, store, then:
//!     session.mark_seen(id).await?;
//! }
//! session.disconnect().await?;
//! ```

use std::future::Future;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;

use super::client::{Authenticated, Client, Selected};
use super::{ImapStream, connect_tls};
use crate::command::{SearchCriteria, StoreAction};
use crate::config::EmailConfig;
use crate::types::{Mailbox, MailboxFolder, MailboxStatus, SeqNum};
use crate::{Error, Result};

/// Current state of the session.
enum SessionState<S> {
    /// Not connected, or the connection was dropped after a failure.
    Disconnected,
    /// Authenticated, no mailbox selected.
    Authenticated(Client<S, Authenticated>),
    /// Mailbox selected.
    Selected(Client<S, Selected>),
}

/// One authenticated IMAP session against a single mailbox.
///
/// The stream type defaults to the TLS transport; tests substitute an
/// in-memory stream via [`Session::establish`].
pub struct Session<S = ImapStream> {
    config: EmailConfig,
    state: SessionState<S>,
}

impl Session<ImapStream> {
    /// Connects to the configured server over TLS and authenticates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the server rejects the credentials, and
    /// a connection-level error (I/O, TLS, DNS, timeout) when the server
    /// cannot be reached.
    pub async fn connect(config: EmailConfig) -> Result<Self> {
        let stream = run_within(
            config.connect_timeout,
            connect_tls(&config.host, config.port),
        )
        .await?;
        Self::establish(stream, config).await
    }

    /// Verifies that the configuration can reach and log in to the server.
    ///
    /// Connects, authenticates, and disconnects immediately.
    pub async fn test_connection(config: EmailConfig) -> Result<()> {
        let mut session = Self::connect(config).await?;
        session.disconnect().await
    }
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Builds a session over an already connected stream.
    ///
    /// Reads the greeting and authenticates. Useful when the caller manages
    /// the transport itself.
    pub async fn establish(stream: S, config: EmailConfig) -> Result<Self> {
        let limit = config.command_timeout;
        let client = run_within(limit, Client::from_stream(stream)).await?;
        let client = run_within(limit, client.login(&config.username, &config.password)).await?;

        tracing::debug!(host = %config.host, username = %config.username, "Authenticated");

        Ok(Self {
            config,
            state: SessionState::Authenticated(client),
        })
    }

    /// Returns true if the session is connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        !matches!(self.state, SessionState::Disconnected)
    }

    /// Returns the display name of the currently selected folder, if any.
    #[must_use]
    pub fn selected_folder(&self) -> Option<String> {
        match &self.state {
            SessionState::Selected(client) => Some(client.mailbox().display_name()),
            _ => None,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Lists all folders on the server.
    ///
    /// Wire names are decoded to display names; a name that fails to decode
    /// is reported with its wire form unchanged.
    pub async fn list_folders(&mut self) -> Result<Vec<MailboxFolder>> {
        let limit = self.config.command_timeout;
        let result = match &mut self.state {
            SessionState::Authenticated(client) => run_within(limit, client.list("", "*")).await,
            SessionState::Selected(_) => {
                return Err(Error::InvalidState("folder already selected".into()));
            }
            SessionState::Disconnected => {
                return Err(Error::InvalidState("not connected".into()));
            }
        };
        let listed = self.drop_connection_on_fatal(result)?;

        Ok(listed
            .into_iter()
            .map(|item| {
                let selectable = item.selectable();
                MailboxFolder::from_wire(item.mailbox.as_str(), selectable)
            })
            .collect())
    }

    /// Selects a folder by display name.
    ///
    /// The name is encoded to its wire form before being sent. Fails with
    /// [`Error::FolderNotFound`] when the server rejects the selection.
    pub async fn select_folder(&mut self, folder: &str) -> Result<MailboxStatus> {
        let mailbox = Mailbox::from_display(folder);
        let limit = self.config.command_timeout;

        let client = match std::mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Authenticated(client) => run_within(limit, client.select(mailbox)).await,
            SessionState::Selected(client) => run_within(limit, client.select(mailbox)).await,
            SessionState::Disconnected => Err(Error::InvalidState("not connected".into())),
        }?;

        let status = client.mailbox_status().clone();
        tracing::debug!(folder, exists = status.exists, "Selected folder");
        self.state = SessionState::Selected(client);
        Ok(status)
    }

    /// Searches the selected folder for unseen messages.
    ///
    /// Applies the configured lookback window when it is nonzero and caps
    /// the result at the configured per-run maximum, keeping server order.
    pub async fn search_unseen(&mut self) -> Result<Vec<SeqNum>> {
        let criteria = unseen_criteria(self.config.lookback_days, Utc::now().date_naive());
        let limit = self.config.command_timeout;

        let result = match &mut self.state {
            SessionState::Selected(client) => run_within(limit, client.search(criteria)).await,
            _ => return Err(Error::InvalidState("no folder selected".into())),
        };
        let mut ids = self.drop_connection_on_fatal(result)?;

        let max = self.config.max_messages;
        if max > 0 {
            ids.truncate(usize::try_from(max).unwrap_or(usize::MAX));
        }

        tracing::debug!(count = ids.len(), "Unseen messages found");
        Ok(ids)
    }

    /// Fetches the full raw bytes of one message.
    pub async fn fetch_message(&mut self, id: SeqNum) -> Result<Vec<u8>> {
        let limit = self.config.command_timeout;
        let result = match &mut self.state {
            SessionState::Selected(client) => run_within(limit, client.fetch(id)).await,
            _ => return Err(Error::InvalidState("no folder selected".into())),
        };
        self.drop_connection_on_fatal(result)
    }

    /// Marks one message as seen.
    ///
    /// Does nothing when the configuration disables mark-as-read.
    pub async fn mark_seen(&mut self, id: SeqNum) -> Result<()> {
        if !self.config.mark_as_read {
            return Ok(());
        }

        let limit = self.config.command_timeout;
        let result = match &mut self.state {
            SessionState::Selected(client) => {
                run_within(limit, client.store_silent(id, StoreAction::mark_seen())).await
            }
            _ => return Err(Error::InvalidState("no folder selected".into())),
        };
        self.drop_connection_on_fatal(result)
    }

    /// Disconnects from the server.
    ///
    /// Safe to call in any state, including after a failed operation or a
    /// previous disconnect.
    pub async fn disconnect(&mut self) -> Result<()> {
        let limit = self.config.command_timeout;
        match std::mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Selected(client) => run_within(limit, client.logout()).await,
            SessionState::Authenticated(client) => run_within(limit, client.logout()).await,
            SessionState::Disconnected => Ok(()),
        }
    }

    /// Drops the connection when a command failed in a way that leaves the
    /// stream unusable, so later calls fail with a clear state error instead
    /// of reading stale bytes.
    fn drop_connection_on_fatal<T>(&mut self, result: Result<T>) -> Result<T> {
        if matches!(result, Err(Error::Timeout(_) | Error::Io(_))) {
            self.state = SessionState::Disconnected;
        }
        result
    }
}

impl<S> std::fmt::Debug for Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.config.host)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

/// Runs a session operation under a time limit.
async fn run_within<T, F>(limit: Duration, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(limit)),
    }
}

/// Builds the search criterion for unseen messages with an optional
/// lookback window.
fn unseen_criteria(lookback_days: u32, today: NaiveDate) -> SearchCriteria {
    if lookback_days == 0 {
        return SearchCriteria::Unseen;
    }
    let since = today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(today);
    SearchCriteria::And(vec![
        SearchCriteria::Unseen,
        SearchCriteria::Since(format_imap_date(since)),
    ])
}

/// Formats a date in the fixed-format IMAP date syntax, e.g. `01-Jan-2024`.
///
/// Month abbreviations are always English regardless of locale.
fn format_imap_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod date_tests {
        use super::*;

        #[test]
        fn test_format_imap_date() {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            assert_eq!(format_imap_date(date), "01-Jan-2024");

            let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
            assert_eq!(format_imap_date(date), "31-Dec-2025");
        }

        #[test]
        fn test_unseen_criteria_without_lookback() {
            let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
            let criteria = unseen_criteria(0, today);
            assert_eq!(criteria, SearchCriteria::Unseen);
        }

        #[test]
        fn test_unseen_criteria_with_lookback() {
            let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
            let criteria = unseen_criteria(30, today);
            assert_eq!(
                criteria,
                SearchCriteria::And(vec![
                    SearchCriteria::Unseen,
                    SearchCriteria::Since("16-May-2024".to_string()),
                ])
            );
        }

        #[test]
        fn test_lookback_crosses_year_boundary() {
            let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
            let criteria = unseen_criteria(30, today);
            assert_eq!(
                criteria,
                SearchCriteria::And(vec![
                    SearchCriteria::Unseen,
                    SearchCriteria::Since("11-Dec-2023".to_string()),
                ])
            );
        }
    }
}
