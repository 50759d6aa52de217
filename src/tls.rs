use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use rustls::ServerConfig;
use rustls_pki_types::{pem::SliceIter, CertificateDer, PrivateKeyDer};

use crate::errors::Error;

/// Build the rustls server config from the PEM certificate chain and key on disk.
pub async fn load_server_config(cert_file: &Path, key_file: &Path) -> Result<ServerConfig, Error> {
    let (certs, key) = load_server_cert_and_key(cert_file, key_file).await?;
    info!("Loaded {} TLS certificate(s) from {}", certs.len(), cert_file.display());

    let config = ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    Ok(config)
}

async fn load_server_cert_and_key(
    cert_file: &Path,
    key_file: &Path,
) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), Error> {
    let cert_contents = tokio::fs::read(cert_file).await?;
    let key_contents = tokio::fs::read(key_file).await?;

    let cert_iterator: SliceIter<CertificateDer<'static>> = SliceIter::new(&cert_contents[..]);
    let certs: Vec<_> = cert_iterator
        .filter_map(|it| {
            if let Err(ref e) = it {
                warn!("Cannot parse TLS certificate: {}", e);
            }
            it.ok()
        })
        .collect();
    if certs.is_empty() {
        return Err(Error::Certificate(format!(
            "No certificate found in {}",
            cert_file.display()
        )));
    }

    let key_iterator: SliceIter<PrivateKeyDer<'static>> = SliceIter::new(&key_contents[..]);
    let mut keys: Vec<PrivateKeyDer<'static>> = key_iterator
        .filter_map(|it| {
            if let Err(ref e) = it {
                warn!("Cannot parse private key: {}", e);
            }
            it.ok()
        })
        .collect();
    if keys.len() != 1 {
        return Err(Error::Certificate(format!(
            "Expected exactly one key in {}, found {}",
            key_file.display(),
            keys.len()
        )));
    }

    Ok((certs, keys.remove(0)))
}
