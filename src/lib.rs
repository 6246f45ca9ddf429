//! # certforge - an offline chain of trust
//!
//! certforge issues a small chain-of-trust of X.509 certificates - a
//! self-signed root CA plus CA-signed server and client certificates -
//! entirely offline, with no external certificate authority or OpenSSL
//! toolchain. It is built for throwaway credentials in local and test
//! environments, on the pure-Rust RustCrypto stack.
//!
//! ## What it does
//!
//! - **Subjects**: one-line distinguished names (`/C=US/O=Acme/CN=Test CA`)
//!   parsed into ordered attributes
//! - **Roles**: fixed extension sets for CA, server and client certificates
//! - **Alternative names**: comma-separated URI and IP lists as a SAN
//!   extension
//! - **Keys**: RSA key pairs, 2048 bits and up
//! - **Signing**: self-signed roots and CA-signed leaves, SHA-256 with RSA
//! - **Key protection**: passphrase-encrypted private key PEM in the legacy
//!   DES-EDE3-CBC format understood by common PEM tooling
//! - **Client bundles**: password-protected PKCS#12 archives carrying the
//!   client key, client certificate and CA certificate
//!
//! ## Quick Start
//!
//! ### Issuing a chain with the default role parameters
//!
//! ```rust,no_run
//! use certforge::pki::{self, IssueOptions};
//! use certforge::subject::DistinguishedName;
//!
//! # fn main() -> Result<(), certforge::error::CertForgeError> {
//! let subject = DistinguishedName::parse("/C=US/O=Example/CN=Example Root CA")?;
//! let ca = pki::issue_root_ca(subject, "ca passphrase", &IssueOptions::default())?;
//! println!("{}", ca.cert_pem);
//!
//! let authority = ca.into_authority();
//! let server_subject = DistinguishedName::parse("/CN=localhost")?;
//! let server = pki::issue_server(
//!     &authority,
//!     server_subject,
//!     "localhost",
//!     "127.0.0.1",
//!     "",
//!     &IssueOptions::default(),
//! )?;
//! println!("{}", server.cert_pem);
//! # Ok(())
//! # }
//! ```
//!
//! ### Building and signing by hand
//!
//! ```rust,no_run
//! use certforge::cert::{CertRole, UnsignedCertificate};
//! use certforge::issuer;
//! use certforge::subject::DistinguishedName;
//!
//! # fn main() -> Result<(), certforge::error::CertForgeError> {
//! let subject = DistinguishedName::parse("/CN=Test CA")?;
//! let (key, template) = UnsignedCertificate::with_fresh_key(
//!     2,
//!     subject,
//!     CertRole::Ca.extensions()?,
//!     CertRole::Ca.default_serial(),
//!     2048,
//! )?;
//! let certificate = issuer::self_sign(&template, &key)?;
//! println!("{}", certificate.to_pem()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as a [`error::CertForgeError`]; the crate never
//! recovers silently and never retries. Interactive concerns - prompting,
//! bounded retry loops, terminal output - belong to the caller.
//!
//! ## Module Organization
//!
//! - [`subject`]: distinguished-name parsing and X.509 name conversion
//! - [`san`]: subject-alternative-name construction from URI/IP lists
//! - [`cert`]: certificate templates, role extension sets, signed
//!   certificates
//! - [`issuer`]: self-signing and CA-signing
//! - [`key`]: RSA key pair generation and signing primitives
//! - [`encryption`]: passphrase-protected private key PEM codec
//! - [`pkcs12`]: client credential bundling
//! - [`store`]: path-based loading and persistence of CA material
//! - [`pki`]: end-to-end issuance with the default role parameters
//! - [`error`]: error types
//! - [`tbs_certificate`]: low-level certificate structure assembly

pub mod cert;
pub mod encryption;
pub mod error;
pub mod issuer;
pub mod key;
pub mod pem_utils;
pub mod pkcs12;
pub mod pki;
pub mod san;
pub mod store;
pub mod subject;
pub mod tbs_certificate;
