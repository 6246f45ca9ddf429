use crate::error::{CertForgeError, Result};

/// PEM label for X.509 certificates.
pub const CERTIFICATE: &str = "CERTIFICATE";

/// PEM label for PKCS#1 private keys.
pub const RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";

/// Convert DER-encoded data into a PEM-encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(&pem, pem::EncodeConfig::new())
}

/// Convert a PEM-encoded string to DER-encoded bytes, checking the label.
pub fn pem_to_der(pem_str: &str, expected_label: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_str)?;
    if pem.tag() != expected_label {
        return Err(CertForgeError::DecodingError(format!(
            "expected a {expected_label:?} PEM block, found {:?}",
            pem.tag()
        )));
    }
    Ok(pem.into_contents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_checks_the_label() {
        let pem = der_to_pem(&[0x30, 0x00], CERTIFICATE);
        assert_eq!(pem_to_der(&pem, CERTIFICATE).unwrap(), vec![0x30, 0x00]);
        assert!(pem_to_der(&pem, RSA_PRIVATE_KEY).is_err());
    }
}
