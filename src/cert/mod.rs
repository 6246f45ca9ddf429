pub mod extensions;
pub mod params;
pub mod profile;

use der::{Decode, Encode, EncodePem};
use time::OffsetDateTime;
use x509_cert::certificate::CertificateInner;

use crate::error::{CertForgeError, Result};
use crate::key::{KeyPair, PublicKey};
use crate::pem_utils;
use crate::subject::DistinguishedName;

pub use params::{ExtensionParam, UnsignedCertificate, Validity};
pub use profile::CertRole;

/// Represents the supported signature algorithms for certificates.
///
/// RSA is the only key type issued here, always hashed with SHA-256.
#[derive(Debug, Clone)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption.
    Sha256WithRsa,
}

impl From<SignatureAlgorithm> for x509_cert::spki::AlgorithmIdentifierOwned {
    fn from(value: SignatureAlgorithm) -> Self {
        match value {
            SignatureAlgorithm::Sha256WithRsa => x509_cert::spki::AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
                parameters: Some(der::Any::null()),
            },
        }
    }
}

/// Represents a signed X.509 certificate.
///
/// Immutable once signed; re-signing requires building a new
/// [`UnsignedCertificate`].
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))
    }

    /// Decodes a certificate from DER bytes.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: CertificateInner::from_der(der)?,
        })
    }

    /// Decodes a certificate from a PEM string.
    pub fn from_pem(pem_text: &str) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem_text, pem_utils::CERTIFICATE)?;
        Self::from_der(&der)
    }

    /// The subject distinguished name, in DER order.
    pub fn subject(&self) -> Result<DistinguishedName> {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.subject)
    }

    /// The issuer distinguished name, in DER order.
    pub fn issuer(&self) -> Result<DistinguishedName> {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.issuer)
    }

    /// The subject's public key.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_x509spki(&self.inner.tbs_certificate.subject_public_key_info)
    }

    pub fn serial_number(&self) -> Vec<u8> {
        self.inner
            .tbs_certificate
            .serial_number
            .as_bytes()
            .to_vec()
    }

    pub fn not_before(&self) -> OffsetDateTime {
        x509_time_to_offset(&self.inner.tbs_certificate.validity.not_before)
    }

    pub fn not_after(&self) -> OffsetDateTime {
        x509_time_to_offset(&self.inner.tbs_certificate.validity.not_after)
    }

    /// DER bytes of the subject public key info, used for key/certificate
    /// consistency checks.
    pub(crate) fn spki_der(&self) -> Result<Vec<u8>> {
        Ok(self
            .inner
            .tbs_certificate
            .subject_public_key_info
            .to_der()?)
    }
}

fn x509_time_to_offset(time: &x509_cert::time::Time) -> OffsetDateTime {
    match time {
        x509_cert::time::Time::UtcTime(ut) => OffsetDateTime::from(ut.to_system_time()),
        x509_cert::time::Time::GeneralTime(gt) => OffsetDateTime::from(gt.to_system_time()),
    }
}

/// A certificate together with its private key, e.g. a CA ready to sign.
#[derive(Debug, Clone)]
pub struct CertificateWithPrivateKey {
    pub cert: Certificate,
    pub key: KeyPair,
}
