//! Private-key PEM codec with optional passphrase protection.
//!
//! The encrypted form is the classic OpenSSL "traditional" scheme still
//! understood by widely deployed PEM tooling: the PKCS#1 DER wrapped with
//! DES-EDE3-CBC, the cipher key derived from the passphrase with the
//! EVP_BytesToKey MD5 construction, and `Proc-Type`/`DEK-Info` headers
//! carrying the cipher name and IV.

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use log::debug;
use md5::{Digest, Md5};
use rand_core::{OsRng, RngCore};
use rsa::RsaPrivateKey;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};

use crate::error::{CertForgeError, Result};
use crate::pem_utils;

type TdesCbcEnc = cbc::Encryptor<des::TdesEde3>;
type TdesCbcDec = cbc::Decryptor<des::TdesEde3>;

const PROC_TYPE: &str = "Proc-Type";
const DEK_INFO: &str = "DEK-Info";
const CIPHER_NAME: &str = "DES-EDE3-CBC";
const IV_LEN: usize = 8;
const KEY_LEN: usize = 24;

/// Encodes `key` as a PEM string.
///
/// A non-empty passphrase produces the encrypted legacy form; an empty
/// passphrase produces a plain PKCS#1 blob. `decode_private_key` reverses
/// either form given the same passphrase.
pub fn encode_private_key(key: &RsaPrivateKey, passphrase: &str) -> Result<String> {
    let der = key.to_pkcs1_der()?;
    if passphrase.is_empty() {
        return Ok(pem_utils::der_to_pem(
            der.as_bytes(),
            pem_utils::RSA_PRIVATE_KEY,
        ));
    }

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    let cipher_key = derive_key(passphrase.as_bytes(), &iv);

    let ciphertext = TdesCbcEnc::new_from_slices(&cipher_key, &iv)
        .map_err(|e| CertForgeError::EncodingError(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(der.as_bytes());
    debug!("private key encrypted with {CIPHER_NAME}");

    let mut pem = pem::Pem::new(pem_utils::RSA_PRIVATE_KEY, ciphertext);
    pem.headers_mut().add(PROC_TYPE, "4,ENCRYPTED");
    pem.headers_mut().add(
        DEK_INFO,
        &format!("{CIPHER_NAME},{}", hex::encode_upper(iv)),
    );
    Ok(pem::encode(&pem))
}

/// Decodes a PEM private key, decrypting when the blob carries the
/// `Proc-Type: 4,ENCRYPTED` marker.
///
/// An encrypted blob with an absent or wrong passphrase fails with
/// [`CertForgeError::Decryption`].
pub fn decode_private_key(pem_text: &str, passphrase: &str) -> Result<RsaPrivateKey> {
    let pem = pem::parse(pem_text)?;
    if pem.tag() != pem_utils::RSA_PRIVATE_KEY {
        return Err(CertForgeError::DecodingError(format!(
            "unexpected PEM label {:?}",
            pem.tag()
        )));
    }

    let encrypted = pem
        .headers()
        .get(PROC_TYPE)
        .is_some_and(|v| v.contains("ENCRYPTED"));
    if !encrypted {
        return RsaPrivateKey::from_pkcs1_der(pem.contents()).map_err(CertForgeError::from);
    }

    if passphrase.is_empty() {
        return Err(CertForgeError::Decryption(
            "key is encrypted but no passphrase was given".to_string(),
        ));
    }

    let dek_info = pem.headers().get(DEK_INFO).ok_or_else(|| {
        CertForgeError::DecodingError("encrypted key without a DEK-Info header".to_string())
    })?;
    let (cipher, iv_hex) = dek_info.split_once(',').ok_or_else(|| {
        CertForgeError::DecodingError(format!("malformed DEK-Info header: {dek_info:?}"))
    })?;
    if cipher != CIPHER_NAME {
        return Err(CertForgeError::DecodingError(format!(
            "unsupported key cipher {cipher:?}"
        )));
    }
    let iv = hex::decode(iv_hex.trim())
        .map_err(|e| CertForgeError::DecodingError(format!("bad DEK-Info IV: {e}")))?;
    if iv.len() != IV_LEN {
        return Err(CertForgeError::DecodingError(format!(
            "DEK-Info IV must be {IV_LEN} bytes, got {}",
            iv.len()
        )));
    }

    let cipher_key = derive_key(passphrase.as_bytes(), &iv);
    let plaintext = TdesCbcDec::new_from_slices(&cipher_key, &iv)
        .map_err(|e| CertForgeError::DecodingError(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(pem.contents())
        .map_err(|_| CertForgeError::Decryption("wrong passphrase".to_string()))?;

    // Garbage from a wrong passphrase that happens to unpad cleanly still
    // fails to parse as PKCS#1.
    RsaPrivateKey::from_pkcs1_der(&plaintext)
        .map_err(|_| CertForgeError::Decryption("wrong passphrase".to_string()))
}

// EVP_BytesToKey with MD5, one digest block per round, salt = the first
// eight IV bytes.
fn derive_key(passphrase: &[u8], iv: &[u8]) -> [u8; KEY_LEN] {
    let salt = &iv[..IV_LEN];
    let mut key = [0u8; KEY_LEN];
    let mut previous: Vec<u8> = Vec::new();
    let mut written = 0;
    while written < KEY_LEN {
        let mut digest = Md5::new();
        digest.update(&previous);
        digest.update(passphrase);
        digest.update(salt);
        previous = digest.finalize().to_vec();
        let take = previous.len().min(KEY_LEN - written);
        key[written..written + take].copy_from_slice(&previous[..take]);
        written += take;
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    // The codec is modulus-agnostic; a small key keeps the tests fast.
    fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 1024).unwrap())
    }

    #[test]
    fn plain_round_trip() {
        let key = test_key();
        let pem_text = encode_private_key(key, "").unwrap();
        assert!(pem_text.contains("BEGIN RSA PRIVATE KEY"));
        assert!(!pem_text.contains("Proc-Type"));
        let decoded = decode_private_key(&pem_text, "").unwrap();
        assert_eq!(&decoded, key);
    }

    #[test]
    fn encrypted_round_trip() {
        let key = test_key();
        let pem_text = encode_private_key(key, "secret").unwrap();
        assert!(pem_text.contains("Proc-Type: 4,ENCRYPTED"));
        assert!(pem_text.contains("DEK-Info: DES-EDE3-CBC,"));
        let decoded = decode_private_key(&pem_text, "secret").unwrap();
        assert_eq!(&decoded, key);
    }

    #[test]
    fn wrong_passphrase_fails() {
        let key = test_key();
        let pem_text = encode_private_key(key, "secret").unwrap();
        assert!(matches!(
            decode_private_key(&pem_text, "wrong"),
            Err(CertForgeError::Decryption(_))
        ));
    }

    #[test]
    fn missing_passphrase_fails() {
        let key = test_key();
        let pem_text = encode_private_key(key, "secret").unwrap();
        assert!(matches!(
            decode_private_key(&pem_text, ""),
            Err(CertForgeError::Decryption(_))
        ));
    }

    #[test]
    fn plain_blob_ignores_a_supplied_passphrase() {
        let key = test_key();
        let pem_text = encode_private_key(key, "").unwrap();
        let decoded = decode_private_key(&pem_text, "irrelevant").unwrap();
        assert_eq!(&decoded, key);
    }
}
