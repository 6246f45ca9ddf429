use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CertForgeError>;

/// Represents errors that can occur in the certforge library.
///
/// Each variant corresponds to one failure mode of the issuance pipeline,
/// from subject parsing through PKCS#12 packaging.
#[derive(Debug, Error)]
pub enum CertForgeError {
    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A distinguished-name segment that could not be parsed.
    #[error("Malformed subject segment: {0:?}")]
    InvalidSubject(String),

    /// A CA key or certificate path that does not exist.
    #[error("No such file: {0}")]
    NotFound(PathBuf),

    /// An encrypted private key that could not be decrypted.
    #[error("Failed to decrypt private key: {0}")]
    Decryption(String),

    /// A CA private key that does not belong to the CA certificate, or a
    /// signature that does not verify.
    #[error("Key mismatch: {0}")]
    KeyMismatch(String),

    /// Error during PKCS#12 packaging.
    #[error("PKCS#12 packaging failed: {0}")]
    Archive(String),

    /// Error from RSA operations.
    #[error("RSA error: {0}")]
    RsaError(String),

    /// Error from RSA PKCS1 operations.
    #[error("RSA PKCS1 error: {0}")]
    RsaPkcs1Error(String),

    /// Error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<der::Error> for CertForgeError {
    fn from(err: der::Error) -> Self {
        CertForgeError::DecodingError(err.to_string())
    }
}

impl From<rsa::Error> for CertForgeError {
    fn from(err: rsa::Error) -> Self {
        CertForgeError::RsaError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for CertForgeError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        CertForgeError::RsaPkcs1Error(err.to_string())
    }
}

impl From<pem::PemError> for CertForgeError {
    fn from(err: pem::PemError) -> Self {
        CertForgeError::DecodingError(err.to_string())
    }
}
