use super::extensions::{
    BasicConstraints, ExtendedKeyUsage, ExtendedKeyUsageOption, KeyUsage, KeyUsages,
};
use super::params::ExtensionParam;
use crate::error::Result;

/// Default RSA modulus for newly issued certificates.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// The roles this crate issues certificates for.
///
/// Each role maps to a fixed extension set and to the default serial and
/// TTL the surrounding tooling assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertRole {
    Ca,
    Server,
    Client,
}

impl CertRole {
    /// The fixed extension set for this role.
    ///
    /// A fresh vector is built on every call, so appending (e.g. a SAN for
    /// a server certificate) never touches a shared table.
    pub fn extensions(&self) -> Result<Vec<ExtensionParam>> {
        match self {
            CertRole::Ca => Ok(vec![
                ExtensionParam::from_extension(
                    BasicConstraints {
                        is_ca: true,
                        max_path_length: None,
                    },
                    true,
                )?,
                ExtensionParam::from_extension(
                    KeyUsage(KeyUsages::KeyCertSign | KeyUsages::CRLSign),
                    true,
                )?,
            ]),
            CertRole::Server | CertRole::Client => Ok(vec![
                ExtensionParam::from_extension(
                    BasicConstraints {
                        is_ca: false,
                        max_path_length: None,
                    },
                    true,
                )?,
                ExtensionParam::from_extension(
                    KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment),
                    true,
                )?,
                ExtensionParam::from_extension(
                    ExtendedKeyUsage {
                        usage: vec![
                            ExtendedKeyUsageOption::ServerAuth,
                            ExtendedKeyUsageOption::ClientAuth,
                        ],
                    },
                    true,
                )?,
            ]),
        }
    }

    /// Default serial assigned by the surrounding tooling.
    pub fn default_serial(&self) -> Vec<u8> {
        match self {
            CertRole::Ca => vec![0x01],
            CertRole::Server => vec![0x02],
            CertRole::Client => vec![0x03],
        }
    }

    /// Default TTL in calendar years.
    pub fn default_ttl_years(&self) -> i32 {
        match self {
            CertRole::Ca => 2,
            CertRole::Server | CertRole::Client => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::extensions::ToAndFromX509Extension;

    #[test]
    fn ca_set_marks_the_certificate_as_authority() {
        let extensions = CertRole::Ca.extensions().unwrap();
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions[0].oid, BasicConstraints::OID);
        assert!(extensions[0].critical);
        let bc: BasicConstraints = extensions[0].to_extension().unwrap();
        assert!(bc.is_ca);
        let ku: KeyUsage = extensions[1].to_extension().unwrap();
        assert_eq!(ku.0, KeyUsages::KeyCertSign | KeyUsages::CRLSign);
    }

    #[test]
    fn leaf_sets_carry_both_auth_usages() {
        for role in [CertRole::Server, CertRole::Client] {
            let extensions = role.extensions().unwrap();
            assert_eq!(extensions.len(), 3);
            let bc: BasicConstraints = extensions[0].to_extension().unwrap();
            assert!(!bc.is_ca);
            let eku: ExtendedKeyUsage = extensions[2].to_extension().unwrap();
            assert_eq!(
                eku.usage,
                vec![
                    ExtendedKeyUsageOption::ServerAuth,
                    ExtendedKeyUsageOption::ClientAuth
                ]
            );
        }
    }

    #[test]
    fn appending_does_not_leak_into_the_table() {
        let mut first = CertRole::Server.extensions().unwrap();
        first.push(first[0].clone());
        assert_eq!(CertRole::Server.extensions().unwrap().len(), 3);
    }

    #[test]
    fn role_defaults_match_the_issuing_tool() {
        assert_eq!(CertRole::Ca.default_serial(), vec![0x01]);
        assert_eq!(CertRole::Server.default_serial(), vec![0x02]);
        assert_eq!(CertRole::Client.default_serial(), vec![0x03]);
        assert_eq!(CertRole::Ca.default_ttl_years(), 2);
        assert_eq!(CertRole::Server.default_ttl_years(), 3);
        assert_eq!(CertRole::Client.default_ttl_years(), 3);
    }
}
