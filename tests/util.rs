use std::sync::OnceLock;

use certforge::cert::{CertRole, CertificateWithPrivateKey, UnsignedCertificate};
use certforge::issuer;
use certforge::subject::DistinguishedName;

/// A self-signed root shared by every test in the binary. Key generation is
/// the slow part, so it runs once.
pub fn test_ca() -> &'static CertificateWithPrivateKey {
    static CA: OnceLock<CertificateWithPrivateKey> = OnceLock::new();
    CA.get_or_init(|| {
        let subject = DistinguishedName::parse("/CN=Test CA").unwrap();
        let (key, template) = UnsignedCertificate::with_fresh_key(
            2,
            subject,
            CertRole::Ca.extensions().unwrap(),
            CertRole::Ca.default_serial(),
            2048,
        )
        .unwrap();
        let cert = issuer::self_sign(&template, &key).unwrap();
        CertificateWithPrivateKey { cert, key }
    })
}
