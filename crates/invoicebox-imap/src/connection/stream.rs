//! TLS stream setup for IMAP connections.
//!
//! Connections are always TLS from the first byte (implicit TLS on port
//! 993). There is no plaintext mode and no way to skip certificate
//! verification.

#![allow(clippy::missing_errors_doc)]

use std::sync::Arc;

use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use crate::Result;

/// The stream type used for real server connections.
pub type ImapStream = TlsStream<TcpStream>;

/// Creates a TLS connector trusting the bundled webpki roots.
pub fn create_tls_connector() -> TlsConnector {
    let root_store = rustls::RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}

/// Opens a TCP connection to `host:port` and completes the TLS handshake.
///
/// The hostname is verified against the server certificate.
pub async fn connect_tls(host: &str, port: u16) -> Result<ImapStream> {
    let addr = format!("{host}:{port}");
    let tcp = TcpStream::connect(&addr).await?;

    let connector = create_tls_connector();
    let server_name = ServerName::try_from(host.to_string())?;
    let tls = connector.connect(server_name, tcp).await?;

    Ok(tls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_builds_from_bundled_roots() {
        let _connector = create_tls_connector();
    }

    #[test]
    fn test_invalid_host_name_is_rejected() {
        assert!(ServerName::try_from("bad host".to_string()).is_err());
    }
}
