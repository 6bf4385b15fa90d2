//! Mailbox connection settings.
//!
//! [`EmailConfig`] holds everything a sync run needs to reach one mailbox:
//! server endpoint, credentials, the folder to scan, and fetch limits.
//! [`Provider`] supplies presets for the common hosted services, which all
//! require an app password for IMAP access.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default IMAP over TLS port.
pub const DEFAULT_IMAP_PORT: u16 = 993;

/// Default cap on messages fetched per sync run.
pub const DEFAULT_MAX_MESSAGES: u32 = 50;

/// Default lookback window in days. Zero disables the SINCE filter.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Default TCP connect and TLS handshake timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for a single command round trip.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for one monitored mailbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Username for authentication, usually the email address.
    pub username: String,
    /// Password for authentication. Hosted providers require an app password.
    pub password: String,
    /// Folder to scan, as a display name. Encoded on the wire as needed.
    pub folder: String,
    /// Whether processed messages are marked \Seen.
    pub mark_as_read: bool,
    /// Cap on messages handled per run. Zero means no cap.
    pub max_messages: u32,
    /// Only consider messages newer than this many days. Zero disables the filter.
    pub lookback_days: u32,
    /// TCP connect and TLS handshake timeout.
    pub connect_timeout: Duration,
    /// Timeout for a single command round trip.
    pub command_timeout: Duration,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_IMAP_PORT,
            username: String::new(),
            password: String::new(),
            folder: "INBOX".to_string(),
            mark_as_read: true,
            max_messages: DEFAULT_MAX_MESSAGES,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl EmailConfig {
    /// Creates a configuration for an arbitrary server with default limits.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Creates a configuration from a provider preset.
    #[must_use]
    pub fn for_provider(
        provider: Provider,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: provider.host().to_string(),
            port: provider.port(),
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Sets the server port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the folder to scan, as a display name.
    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Sets whether processed messages are marked \Seen.
    #[must_use]
    pub const fn mark_as_read(mut self, mark: bool) -> Self {
        self.mark_as_read = mark;
        self
    }

    /// Sets the per-run message cap. Zero means no cap.
    #[must_use]
    pub const fn max_messages(mut self, max: u32) -> Self {
        self.max_messages = max;
        self
    }

    /// Sets the lookback window in days. Zero disables the SINCE filter.
    #[must_use]
    pub const fn lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Sets the TCP connect and TLS handshake timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the timeout for a single command round trip.
    #[must_use]
    pub const fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }
}

/// Well-known hosted email providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// Gmail (imap.gmail.com).
    Gmail,
    /// Microsoft Outlook/Office 365.
    Outlook,
    /// Yahoo Mail.
    Yahoo,
}

impl Provider {
    /// Detects the provider from an email address domain.
    #[must_use]
    pub fn from_email(email: &str) -> Option<Self> {
        let domain = email.split('@').nth(1)?;
        match domain.to_lowercase().as_str() {
            "gmail.com" | "googlemail.com" => Some(Self::Gmail),
            "outlook.com" | "hotmail.com" | "live.com" => Some(Self::Outlook),
            "yahoo.com" | "ymail.com" => Some(Self::Yahoo),
            _ => None,
        }
    }

    /// Returns the IMAP server hostname.
    #[must_use]
    pub const fn host(&self) -> &'static str {
        match self {
            Self::Gmail => "imap.gmail.com",
            Self::Outlook => "outlook.office365.com",
            Self::Yahoo => "imap.mail.yahoo.com",
        }
    }

    /// Returns the IMAP server port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        DEFAULT_IMAP_PORT
    }

    /// Returns a display name for the provider.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Gmail => "Gmail",
            Self::Outlook => "Outlook",
            Self::Yahoo => "Yahoo",
        }
    }

    /// Returns where to generate an app password for this provider.
    #[must_use]
    pub const fn app_password_url(&self) -> &'static str {
        match self {
            Self::Gmail => "https://myaccount.google.com/apppasswords",
            Self::Outlook => "https://account.live.com/proofs/AppPassword",
            Self::Yahoo => "https://login.yahoo.com/account/security",
        }
    }

    /// Returns example folder display names for this provider.
    ///
    /// Providers localize folder names, so non-ASCII examples are included.
    #[must_use]
    pub const fn folder_examples(&self) -> &'static [&'static str] {
        match self {
            Self::Gmail => &["INBOX", "[Gmail]/All Mail", "Receipts", "חשבוניות"],
            Self::Outlook => &["INBOX", "Archive", "Invoices"],
            Self::Yahoo => &["INBOX", "Archive"],
        }
    }
}
