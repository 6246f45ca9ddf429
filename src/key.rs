use der::Encode;
use log::debug;
use rand_core::OsRng;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{CertForgeError, Result};

/// Smallest RSA modulus accepted for newly generated keys.
pub const MIN_RSA_BITS: usize = 2048;

/// An RSA key pair backing one certificate.
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: Box<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl KeyPair {
    /// Generate an RSA key pair with the specified number of bits.
    ///
    /// Sizes below [`MIN_RSA_BITS`] are rejected.
    pub fn generate(bits: usize) -> Result<Self> {
        if bits < MIN_RSA_BITS {
            return Err(CertForgeError::InvalidInput(format!(
                "RSA modulus of {bits} bits is below the {MIN_RSA_BITS}-bit floor"
            )));
        }
        debug!("generating {bits}-bit RSA key pair");
        let mut rng = OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair {
            private: Box::new(private),
            public,
        })
    }

    /// Wraps an existing private key, recomputing its public half.
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        KeyPair {
            private: Box::new(private),
            public,
        }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.public.clone())
    }

    /// Signs `data` with SHA-256 and PKCS#1 v1.5 padding.
    pub fn sign_data(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signing_key = SigningKey::<Sha256>::new((*self.private).clone());
        let signature = signing_key
            .try_sign(data)
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))?;
        Ok(signature.to_vec())
    }
}

/// The public half of a [`KeyPair`], as placed into certificates.
#[derive(Debug, Clone)]
pub struct PublicKey(pub(crate) RsaPublicKey);

impl PublicKey {
    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        key_pair.public_key()
    }

    /// Converts to SubjectPublicKeyInfo form.
    pub fn as_spki(&self) -> Result<SubjectPublicKeyInfoOwned> {
        SubjectPublicKeyInfoOwned::from_key(self.0.clone())
            .map_err(|e| CertForgeError::EncodingError(e.to_string()))
    }

    /// Reads a public key back out of SubjectPublicKeyInfo form.
    pub fn from_x509spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let der = spki.to_der()?;
        let key = RsaPublicKey::from_public_key_der(&der)
            .map_err(|e| CertForgeError::DecodingError(e.to_string()))?;
        Ok(PublicKey(key))
    }

    /// Verifies a SHA-256 PKCS#1 v1.5 signature over `data`.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let verifying_key = VerifyingKey::<Sha256>::new(self.0.clone());
        let signature = Signature::try_from(signature)
            .map_err(|e| CertForgeError::DecodingError(e.to_string()))?;
        verifying_key
            .verify(data, &signature)
            .map_err(|e| CertForgeError::KeyMismatch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_small_moduli() {
        let result = KeyPair::generate(1024);
        assert!(matches!(result, Err(CertForgeError::InvalidInput(_))));
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let key_pair = KeyPair::generate(2048).unwrap();
        let signature = key_pair.sign_data(b"payload").unwrap();
        key_pair.public_key().verify(b"payload", &signature).unwrap();
        assert!(key_pair.public_key().verify(b"other", &signature).is_err());
    }
}
