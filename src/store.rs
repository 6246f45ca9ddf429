//! Path-based collaborators: loading CA material and persisting artifacts.
//!
//! All paths are explicit. Nothing here resolves ambient process state such
//! as the current working directory.

use std::fs;
use std::path::Path;

use log::debug;
use rsa::RsaPrivateKey;

use crate::cert::Certificate;
use crate::encryption;
use crate::error::{CertForgeError, Result};

/// Loads and decrypts the CA private key at `path`.
///
/// A missing path is [`CertForgeError::NotFound`]; a wrong passphrase is
/// [`CertForgeError::Decryption`]. The two stay distinct so an interactive
/// caller knows which input to re-collect.
pub fn load_ca_private_key(path: &Path, passphrase: &str) -> Result<RsaPrivateKey> {
    let pem_text = read_to_string(path)?;
    encryption::decode_private_key(&pem_text, passphrase)
}

/// Loads the CA certificate at `path`.
pub fn load_ca_certificate(path: &Path) -> Result<Certificate> {
    let pem_text = read_to_string(path)?;
    Certificate::from_pem(&pem_text)
}

/// Writes `bytes` to `path`, creating parent directories as needed.
pub fn persist(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn read_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CertForgeError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}
