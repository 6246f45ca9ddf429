//! PKCS#12 bundling for client credentials.

use log::debug;
use p12_keystore::{Certificate as P12Certificate, KeyStore, KeyStoreEntry, PrivateKeyChain};
use rsa::pkcs8::EncodePrivateKey;

use crate::cert::Certificate;
use crate::error::{CertForgeError, Result};
use crate::key::KeyPair;

const DEFAULT_FRIENDLY_NAME: &str = "client";

/// Bundles the client key, its certificate and the CA certificate into a
/// single archive protected end-to-end by `export_passphrase`.
///
/// The entry is labeled with `friendly_name`, defaulting to `"client"`.
pub fn package(
    client_key: &KeyPair,
    client_cert: &Certificate,
    ca_cert: &Certificate,
    export_passphrase: &str,
    friendly_name: Option<&str>,
) -> Result<Vec<u8>> {
    let key_der = client_key
        .private_key()
        .to_pkcs8_der()
        .map_err(|e| CertForgeError::Archive(e.to_string()))?;

    let leaf = P12Certificate::from_der(&client_cert.to_der()?)
        .map_err(|e| CertForgeError::Archive(e.to_string()))?;
    let authority = P12Certificate::from_der(&ca_cert.to_der()?)
        .map_err(|e| CertForgeError::Archive(e.to_string()))?;

    let chain = PrivateKeyChain::new(key_der.as_bytes(), [], vec![leaf, authority]);
    let mut keystore = KeyStore::new();
    keystore.add_entry(
        friendly_name.unwrap_or(DEFAULT_FRIENDLY_NAME),
        KeyStoreEntry::PrivateKeyChain(chain),
    );

    let archive = keystore
        .writer(export_passphrase)
        .write()
        .map_err(|e| CertForgeError::Archive(e.to_string()))?;
    debug!("built a PKCS#12 archive of {} bytes", archive.len());
    Ok(archive)
}
