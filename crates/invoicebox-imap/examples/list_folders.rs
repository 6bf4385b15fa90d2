#![allow(clippy::expect_used, clippy::doc_markdown, clippy::uninlined_format_args)]
//! Example: List mailbox folders with decoded display names
//!
//! Connects to an IMAP account, lists every folder, and prints the
//! decoded display name next to the raw wire name for folders that use
//! modified UTF-7 (for example Hebrew or German folder names).
//!
//! ## Prerequisites
//!
//! Most providers require an app password for IMAP access:
//!
//! 1. Enable two-step verification on your account
//! 2. Generate an app password for "Mail"
//! 3. Use the app password below (not your regular password)
//!
//! ## Running
//!
//! ```bash
//! cargo run --package invoicebox-imap --example list_folders
//! ```

use std::io::{self, Write};

use invoicebox_imap::{EmailConfig, Provider, Session};

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("InvoiceBox - IMAP Folder Listing");
    println!("=================================\n");

    let email = prompt("Email address")?;
    let password = prompt("App password")?;

    let config = match Provider::from_email(&email) {
        Some(provider) => {
            println!("\nDetected provider: {}", provider.display_name());
            println!("App passwords: {}", provider.app_password_url());
            EmailConfig::for_provider(provider, &email, &password)
        }
        None => {
            let host = prompt("IMAP server host")?;
            EmailConfig::new(host, &email, &password)
        }
    };

    println!("\nConnecting to {}:{}...", config.host, config.port);
    let mut session = Session::connect(config).await?;
    println!("✓ Connected and authenticated\n");

    println!("Folders:");
    let folders = session.list_folders().await?;
    for folder in &folders {
        if folder.name == folder.wire_name {
            println!("  - {}", folder.name);
        } else {
            println!("  - {}  (wire: {})", folder.name, folder.wire_name);
        }
    }
    println!("\n{} folders total", folders.len());

    session.disconnect().await?;
    println!("✓ Disconnected");

    Ok(())
}
