use der::Encode;
use log::debug;
use x509_cert::certificate::CertificateInner;

use crate::cert::{
    Certificate, CertificateWithPrivateKey, SignatureAlgorithm, UnsignedCertificate,
};
use crate::error::{CertForgeError, Result};
use crate::key::KeyPair;
use crate::subject::DistinguishedName;
use crate::tbs_certificate::TbsCertificate;

/// Represents an entity capable of signing certificate templates.
pub trait Issuer {
    /// Returns the distinguished name written into the issued certificate's
    /// issuer field.
    fn issuer_name(&self) -> Result<DistinguishedName>;

    /// Returns the signing key of the issuer.
    fn signing_key(&self) -> &KeyPair;

    /// Signs `template`, fixing issuer and signature.
    ///
    /// Subject, validity, serial and extensions are taken from the template
    /// verbatim; the result is immutable. No partially signed certificate
    /// is ever observable.
    fn issue(&self, template: &UnsignedCertificate) -> Result<Certificate> {
        let signature_algorithm = SignatureAlgorithm::Sha256WithRsa;
        let issuer = self.issuer_name()?;

        let tbs = TbsCertificate {
            serial_number: template.serial_number.clone(),
            signature_algorithm: signature_algorithm.clone(),
            issuer,
            not_before: template.validity.not_before,
            not_after: template.validity.not_after,
            subject: template.subject.clone(),
            subject_public_key: template.public_key.clone(),
            extensions: template.extensions.clone(),
        };

        let tbs_inner = tbs.to_tbs_certificate_inner()?;
        let signature = self.signing_key().sign_data(&tbs_inner.to_der()?)?;
        debug!(
            "signed certificate with serial {:02x?}",
            template.serial_number
        );

        Ok(Certificate {
            inner: CertificateInner {
                tbs_certificate: tbs_inner,
                signature_algorithm: signature_algorithm.into(),
                signature: der::asn1::BitString::from_bytes(&signature)?,
            },
        })
    }
}

// Issuer for the root certificate: issuer == subject, signed with the
// subject's own key.
struct SelfIssuer<'a> {
    name: DistinguishedName,
    key: &'a KeyPair,
}

impl Issuer for SelfIssuer<'_> {
    fn issuer_name(&self) -> Result<DistinguishedName> {
        Ok(self.name.clone())
    }

    fn signing_key(&self) -> &KeyPair {
        self.key
    }
}

/// Issuer backed by a CA certificate and its private key.
pub struct CaIssuer<'a> {
    key: &'a KeyPair,
    cert: &'a Certificate,
}

impl<'a> CaIssuer<'a> {
    /// Fails with [`CertForgeError::KeyMismatch`] when `key` is not the
    /// private half of `cert`'s subject public key. A mismatched pair would
    /// otherwise sign certificates that never verify downstream.
    pub fn new(key: &'a KeyPair, cert: &'a Certificate) -> Result<Self> {
        let cert_spki = cert.spki_der()?;
        let key_spki = key.public_key().as_spki()?.to_der()?;
        if cert_spki != key_spki {
            return Err(CertForgeError::KeyMismatch(
                "CA private key does not match the CA certificate's public key".to_string(),
            ));
        }
        Ok(CaIssuer { key, cert })
    }
}

impl Issuer for CaIssuer<'_> {
    fn issuer_name(&self) -> Result<DistinguishedName> {
        self.cert.subject()
    }

    fn signing_key(&self) -> &KeyPair {
        self.key
    }
}

impl Issuer for CertificateWithPrivateKey {
    fn issuer_name(&self) -> Result<DistinguishedName> {
        // The name of the issuer is the subject of the certificate
        self.cert.subject()
    }

    fn signing_key(&self) -> &KeyPair {
        &self.key
    }
}

/// Self-signs `template` with `key`; used only for the root CA.
///
/// The issued certificate's issuer equals the template's subject.
pub fn self_sign(template: &UnsignedCertificate, key: &KeyPair) -> Result<Certificate> {
    SelfIssuer {
        name: template.subject.clone(),
        key,
    }
    .issue(template)
}

/// Signs `template` as a CA, setting issuer to the CA certificate's subject.
pub fn ca_sign(
    template: &UnsignedCertificate,
    ca_key: &KeyPair,
    ca_cert: &Certificate,
) -> Result<Certificate> {
    CaIssuer::new(ca_key, ca_cert)?.issue(template)
}
