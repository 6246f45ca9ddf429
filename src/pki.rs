//! End-to-end issuance pipeline with the default role parameters.
//!
//! Defaults follow the surrounding tooling: CA serial `01` / 2 years,
//! server serial `02` / 3 years, client serial `03` / 3 years, 2048-bit
//! keys unless overridden. Each issuance runs build, sign and encode
//! strictly in that order.

use crate::cert::{
    Certificate, CertificateWithPrivateKey, CertRole, UnsignedCertificate, profile,
};
use crate::encryption;
use crate::error::{CertForgeError, Result};
use crate::issuer;
use crate::key::KeyPair;
use crate::pkcs12;
use crate::san;
use crate::subject::DistinguishedName;

/// Per-issuance overrides. `Default` follows the role's own parameters.
#[derive(Debug, Clone, Default)]
pub struct IssueOptions {
    pub ttl_years: Option<i32>,
    pub serial: Option<Vec<u8>>,
    pub key_bits: Option<usize>,
}

/// A freshly issued certificate with its artifacts ready for persistence.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    pub cert_pem: String,
    pub key_pem: String,
    pub certificate: Certificate,
    pub key: KeyPair,
}

impl IssuedCertificate {
    /// The certificate/key pair viewed as a signing CA.
    pub fn into_authority(self) -> CertificateWithPrivateKey {
        CertificateWithPrivateKey {
            cert: self.certificate,
            key: self.key,
        }
    }
}

/// Builds and self-signs the root CA.
///
/// The returned key PEM is encrypted when `passphrase` is non-empty.
pub fn issue_root_ca(
    subject: DistinguishedName,
    passphrase: &str,
    opts: &IssueOptions,
) -> Result<IssuedCertificate> {
    let (ttl, serial, bits) = resolve(CertRole::Ca, opts);
    let (key, template) =
        UnsignedCertificate::with_fresh_key(ttl, subject, CertRole::Ca.extensions()?, serial, bits)?;
    let cert = issuer::self_sign(&template, &key)?;
    finish(key, cert, passphrase)
}

/// Builds a server certificate carrying the given alternative names and
/// signs it with the CA.
pub fn issue_server(
    ca: &CertificateWithPrivateKey,
    subject: DistinguishedName,
    uri_list: &str,
    ip_list: &str,
    passphrase: &str,
    opts: &IssueOptions,
) -> Result<IssuedCertificate> {
    let (ttl, serial, bits) = resolve(CertRole::Server, opts);
    let mut extensions = CertRole::Server.extensions()?;
    extensions.push(san::build_san_extension(uri_list, ip_list)?);
    let (key, template) =
        UnsignedCertificate::with_fresh_key(ttl, subject, extensions, serial, bits)?;
    let cert = issuer::ca_sign(&template, &ca.key, &ca.cert)?;
    finish(key, cert, passphrase)
}

/// Builds a client certificate, signs it with the CA, and bundles the key,
/// certificate and CA certificate into a PKCS#12 archive under
/// `export_passphrase`.
pub fn issue_client(
    ca: &CertificateWithPrivateKey,
    subject: DistinguishedName,
    passphrase: &str,
    export_passphrase: &str,
    friendly_name: Option<&str>,
    opts: &IssueOptions,
) -> Result<(IssuedCertificate, Vec<u8>)> {
    let (ttl, serial, bits) = resolve(CertRole::Client, opts);
    let (key, template) = UnsignedCertificate::with_fresh_key(
        ttl,
        subject,
        CertRole::Client.extensions()?,
        serial,
        bits,
    )?;
    let cert = issuer::ca_sign(&template, &ca.key, &ca.cert)?;
    let archive = pkcs12::package(&key, &cert, &ca.cert, export_passphrase, friendly_name)?;
    let issued = finish(key, cert, passphrase)?;
    Ok((issued, archive))
}

/// Parses the tooling-facing hex serial strings (`"01"`, `"02"`, ...).
pub fn serial_from_hex(serial: &str) -> Result<Vec<u8>> {
    hex::decode(serial)
        .map_err(|e| CertForgeError::InvalidInput(format!("bad serial {serial:?}: {e}")))
}

fn resolve(role: CertRole, opts: &IssueOptions) -> (i32, Vec<u8>, usize) {
    (
        opts.ttl_years.unwrap_or_else(|| role.default_ttl_years()),
        opts.serial.clone().unwrap_or_else(|| role.default_serial()),
        opts.key_bits.unwrap_or(profile::DEFAULT_KEY_BITS),
    )
}

fn finish(key: KeyPair, certificate: Certificate, passphrase: &str) -> Result<IssuedCertificate> {
    let cert_pem = certificate.to_pem()?;
    let key_pem = encryption::encode_private_key(key.private_key(), passphrase)?;
    Ok(IssuedCertificate {
        cert_pem,
        key_pem,
        certificate,
        key,
    })
}
