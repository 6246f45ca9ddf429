use core::fmt;
use core::str::FromStr;

use const_oid::ObjectIdentifier;
use der::asn1::{Ia5StringRef, PrintableStringRef};
use x509_cert::name::RdnSequence;

use crate::error::{CertForgeError, Result};

/// One attribute of a distinguished name, e.g. `CN=Test CA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAttribute {
    pub attr_type: String,
    pub value: String,
}

/// An ordered distinguished name.
///
/// Order is significant: attributes are encoded left-to-right in the DER
/// name. Duplicate attribute types are allowed and preserved in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub attributes: Vec<SubjectAttribute>,
}

impl DistinguishedName {
    /// Parses a one-line distinguished name of the form `/C=US/O=aaa/CN=x`.
    ///
    /// The leading empty segment is discarded. A segment without `=` fails
    /// with [`CertForgeError::InvalidSubject`] naming the segment. An empty
    /// input yields an empty name.
    pub fn parse(input: &str) -> Result<Self> {
        let mut attributes = Vec::new();
        for segment in input.split('/') {
            if segment.is_empty() {
                continue;
            }
            let (attr_type, value) = segment
                .split_once('=')
                .ok_or_else(|| CertForgeError::InvalidSubject(segment.to_string()))?;
            attributes.push(SubjectAttribute {
                attr_type: attr_type.to_string(),
                value: value.to_string(),
            });
        }
        Ok(DistinguishedName { attributes })
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Converts the distinguished name to an X.509-compatible format.
    ///
    /// The RFC 4514 string representation hands RDNs to the encoder
    /// back-to-front, so the attribute list is reversed here to keep the
    /// DER order equal to the parse order.
    pub fn as_x509_name(&self) -> Result<RdnSequence> {
        if self.attributes.is_empty() {
            return Ok(RdnSequence::default());
        }
        let rfc4514 = self
            .attributes
            .iter()
            .rev()
            .map(|attr| format!("{}={}", short_name(&attr.attr_type), attr.value))
            .collect::<Vec<_>>()
            .join(",");
        RdnSequence::from_str(&rfc4514)
            .map_err(|e| CertForgeError::EncodingError(format!("bad subject {rfc4514:?}: {e}")))
    }

    /// Creates a `DistinguishedName` from an X.509-compatible format,
    /// reading attributes in their DER order.
    pub fn from_x509_name(name: &RdnSequence) -> Result<Self> {
        let mut attributes = Vec::new();
        for rdn in name.0.iter() {
            for attr in rdn.0.iter() {
                attributes.push(SubjectAttribute {
                    attr_type: attr_type_name(&attr.oid),
                    value: decode_attr_value(&attr.value)?,
                });
            }
        }
        Ok(DistinguishedName { attributes })
    }
}

impl FromStr for DistinguishedName {
    type Err = CertForgeError;

    fn from_str(s: &str) -> Result<Self> {
        DistinguishedName::parse(s)
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in &self.attributes {
            write!(f, "/{}={}", attr.attr_type, attr.value)?;
        }
        Ok(())
    }
}

/// Normalizes long-form attribute names to the short form the X.509 name
/// encoder understands. Unknown names pass through unchanged.
fn short_name(attr_type: &str) -> &str {
    match attr_type {
        "commonName" => "CN",
        "countryName" => "C",
        "stateOrProvinceName" => "ST",
        "localityName" => "L",
        "organizationName" => "O",
        "organizationalUnitName" => "OU",
        "streetAddress" => "STREET",
        "domainComponent" => "DC",
        other => other,
    }
}

fn attr_type_name(oid: &ObjectIdentifier) -> String {
    match *oid {
        const_oid::db::rfc4519::CN => "CN".to_string(),
        const_oid::db::rfc4519::C => "C".to_string(),
        const_oid::db::rfc4519::ST => "ST".to_string(),
        const_oid::db::rfc4519::L => "L".to_string(),
        const_oid::db::rfc4519::O => "O".to_string(),
        const_oid::db::rfc4519::OU => "OU".to_string(),
        const_oid::db::rfc4519::STREET => "STREET".to_string(),
        const_oid::db::rfc4519::DC => "DC".to_string(),
        _ => oid.to_string(),
    }
}

fn decode_attr_value(value: &der::Any) -> Result<String> {
    if let Ok(s) = value.decode_as::<String>() {
        return Ok(s);
    }
    if let Ok(s) = value.decode_as::<PrintableStringRef>() {
        return Ok(s.to_string());
    }
    if let Ok(s) = value.decode_as::<Ia5StringRef>() {
        return Ok(s.to_string());
    }
    Err(CertForgeError::DecodingError(
        "unsupported attribute value encoding".to_string(),
    ))
}
