use std::net::IpAddr;

use crate::cert::extensions::{AltNameEntry, SubjectAltName};
use crate::cert::params::ExtensionParam;
use crate::error::{CertForgeError, Result};

/// Builds the subject-alternative-name entries from comma-separated URI and
/// IP lists.
///
/// Whitespace around tokens is trimmed. A list that is empty or
/// all-whitespace contributes no entries; an empty token inside a non-empty
/// list is rejected rather than silently producing an empty entry. Output
/// order is all URIs in input order, then all IPs in input order.
pub fn build_alt_names(uri_list: &str, ip_list: &str) -> Result<SubjectAltName> {
    let mut entries = Vec::new();
    for token in split_list(uri_list)? {
        entries.push(AltNameEntry::Uri(token));
    }
    for token in split_list(ip_list)? {
        let ip: IpAddr = token
            .parse()
            .map_err(|_| CertForgeError::InvalidInput(format!("not an IP address: {token:?}")))?;
        entries.push(AltNameEntry::Ip(ip));
    }
    if entries.is_empty() {
        return Err(CertForgeError::InvalidInput(
            "no alternative names given".to_string(),
        ));
    }
    Ok(SubjectAltName { entries })
}

/// Same as [`build_alt_names`], packaged as the single extension descriptor
/// appended to a server extension set.
pub fn build_san_extension(uri_list: &str, ip_list: &str) -> Result<ExtensionParam> {
    ExtensionParam::from_extension(build_alt_names(uri_list, ip_list)?, false)
}

fn split_list(list: &str) -> Result<Vec<String>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() {
                Err(CertForgeError::InvalidInput(
                    "empty token in alternative name list".to_string(),
                ))
            } else {
                Ok(token.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uris_come_before_ips_in_input_order() {
        let san = build_alt_names("a.com,b.com", "127.0.0.1").unwrap();
        assert_eq!(
            san.entries,
            vec![
                AltNameEntry::Uri("a.com".to_string()),
                AltNameEntry::Uri("b.com".to_string()),
                AltNameEntry::Ip("127.0.0.1".parse().unwrap()),
            ]
        );
    }

    #[test]
    fn tokens_are_trimmed() {
        let san = build_alt_names(" a.com , b.com ", " ::1 ").unwrap();
        assert_eq!(san.entries.len(), 3);
        assert_eq!(san.entries[0], AltNameEntry::Uri("a.com".to_string()));
        assert_eq!(san.entries[2], AltNameEntry::Ip("::1".parse().unwrap()));
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(
            build_alt_names("a.com,,b.com", ""),
            Err(CertForgeError::InvalidInput(_))
        ));
    }

    #[test]
    fn unparseable_ip_is_rejected() {
        assert!(matches!(
            build_alt_names("", "999.0.0.1"),
            Err(CertForgeError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_lists_are_rejected_as_a_whole() {
        assert!(build_alt_names("", " ").is_err());
    }

    #[test]
    fn ip_only_list_is_fine() {
        let san = build_alt_names("", "127.0.0.1,10.0.0.1").unwrap();
        assert_eq!(san.entries.len(), 2);
    }
}
