mod util;

use std::sync::OnceLock;

use certforge::cert::extensions::{AltNameEntry, SubjectAltName, ToAndFromX509Extension};
use certforge::cert::{CertRole, UnsignedCertificate, Validity};
use certforge::error::CertForgeError;
use certforge::issuer;
use certforge::pki::{self, IssueOptions, IssuedCertificate};
use certforge::subject::DistinguishedName;
use der::Encode;

struct IssuedFixtures {
    server: IssuedCertificate,
    client: IssuedCertificate,
    archive: Vec<u8>,
}

fn fixtures() -> &'static IssuedFixtures {
    static FIXTURES: OnceLock<IssuedFixtures> = OnceLock::new();
    FIXTURES.get_or_init(|| {
        let ca = util::test_ca();
        let server = pki::issue_server(
            ca,
            DistinguishedName::parse("/CN=Test Server").unwrap(),
            "localhost",
            "127.0.0.1",
            "",
            &IssueOptions::default(),
        )
        .unwrap();
        let (client, archive) = pki::issue_client(
            ca,
            DistinguishedName::parse("/CN=Test Client").unwrap(),
            "",
            "export",
            Some("test client"),
            &IssueOptions::default(),
        )
        .unwrap();
        IssuedFixtures {
            server,
            client,
            archive,
        }
    })
}

#[test]
fn self_signed_root_issuer_equals_subject() {
    let ca = util::test_ca();
    assert_eq!(
        ca.cert.inner.tbs_certificate.issuer,
        ca.cert.inner.tbs_certificate.subject
    );
    assert_eq!(ca.cert.subject().unwrap().to_string(), "/CN=Test CA");
}

#[test]
fn self_signed_root_verifies_against_its_own_key() {
    let ca = util::test_ca();
    let tbs = ca.cert.inner.tbs_certificate.to_der().unwrap();
    let signature = ca.cert.inner.signature.as_bytes().unwrap();
    ca.cert
        .public_key()
        .unwrap()
        .verify(&tbs, signature)
        .unwrap();
}

#[test]
fn ca_signed_server_carries_the_ca_issuer() {
    let ca = util::test_ca();
    let server = &fixtures().server;
    assert_eq!(
        server.certificate.inner.tbs_certificate.issuer,
        ca.cert.inner.tbs_certificate.subject
    );
}

#[test]
fn ca_signed_server_verifies_only_against_the_ca_key() {
    let ca = util::test_ca();
    let server = &fixtures().server;
    let tbs = server.certificate.inner.tbs_certificate.to_der().unwrap();
    let signature = server.certificate.inner.signature.as_bytes().unwrap();
    ca.cert
        .public_key()
        .unwrap()
        .verify(&tbs, signature)
        .unwrap();
    // the server's own key is unrelated to the signature
    assert!(
        server
            .certificate
            .public_key()
            .unwrap()
            .verify(&tbs, signature)
            .is_err()
    );
}

#[test]
fn server_san_holds_one_uri_and_one_ip() {
    let server = &fixtures().server;
    let extensions = server
        .certificate
        .inner
        .tbs_certificate
        .extensions
        .as_ref()
        .unwrap();
    let san_ext = extensions
        .iter()
        .find(|e| e.extn_id == SubjectAltName::OID)
        .expect("SAN extension missing");
    let san = SubjectAltName::from_x509_extension_value(san_ext.extn_value.as_bytes()).unwrap();
    assert_eq!(
        san.entries,
        vec![
            AltNameEntry::Uri("localhost".to_string()),
            AltNameEntry::Ip("127.0.0.1".parse().unwrap()),
        ]
    );
}

#[test]
fn leaf_ttl_is_three_calendar_years() {
    let server = &fixtures().server;
    let not_before = server.certificate.not_before();
    let not_after = server.certificate.not_after();
    assert_eq!(not_after.year() - not_before.year(), 3);
    assert_eq!(not_after.month(), not_before.month());
    assert_eq!(not_after.day(), not_before.day());
}

#[test]
fn default_serials_follow_the_roles() {
    let ca = util::test_ca();
    assert_eq!(ca.cert.serial_number(), vec![0x01]);
    assert_eq!(fixtures().server.certificate.serial_number(), vec![0x02]);
    assert_eq!(fixtures().client.certificate.serial_number(), vec![0x03]);
}

#[test]
fn client_archive_is_a_der_sequence() {
    let fixtures = fixtures();
    assert!(!fixtures.archive.is_empty());
    assert_eq!(fixtures.archive[0], 0x30);
    assert_eq!(
        fixtures.client.certificate.inner.tbs_certificate.issuer,
        util::test_ca().cert.inner.tbs_certificate.subject
    );
}

#[test]
fn issued_pems_have_the_expected_labels() {
    let fixtures = fixtures();
    assert!(fixtures.server.cert_pem.contains("BEGIN CERTIFICATE"));
    assert!(fixtures.server.key_pem.contains("BEGIN RSA PRIVATE KEY"));
    // issued with an empty passphrase, so no encryption headers
    assert!(!fixtures.server.key_pem.contains("Proc-Type"));
}

#[test]
fn ca_sign_rejects_a_mismatched_key() {
    let ca = util::test_ca();
    let server = &fixtures().server;
    let template = UnsignedCertificate::builder()
        .subject(DistinguishedName::parse("/CN=anything").unwrap())
        .public_key(ca.key.public_key())
        .serial_number(vec![0x10])
        .validity(Validity::for_years(1))
        .extensions(CertRole::Client.extensions().unwrap())
        .build();
    let result = issuer::ca_sign(&template, &server.key, &ca.cert);
    assert!(matches!(result, Err(CertForgeError::KeyMismatch(_))));
}
