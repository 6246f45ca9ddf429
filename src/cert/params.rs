use bon::Builder;
use const_oid::ObjectIdentifier;
use time::{Date, Month, OffsetDateTime};

use super::extensions::ToAndFromX509Extension;
use crate::error::Result;
use crate::key::{KeyPair, PublicKey};
use crate::subject::DistinguishedName;

/// Certificate validity period.
///
/// Represents the `notBefore` and `notAfter` fields of a certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period starting now and ending `years` calendar
    /// years later.
    pub fn for_years(years: i32) -> Self {
        Self::for_years_from(OffsetDateTime::now_utc(), years)
    }

    /// Creates a validity period anchored at `not_before`.
    ///
    /// The increment is a calendar-year one: month and day are preserved,
    /// and a Feb 29 anchor rolls to Mar 1 when the target year is not a
    /// leap year.
    pub fn for_years_from(not_before: OffsetDateTime, years: i32) -> Self {
        Self {
            not_before,
            not_after: add_years(not_before, years),
        }
    }
}

fn add_years(anchor: OffsetDateTime, years: i32) -> OffsetDateTime {
    let target = anchor.year() + years;
    anchor.replace_year(target).unwrap_or_else(|_| {
        let rollover = Date::from_calendar_date(target, Month::March, 1)
            .expect("March 1 is a valid date in every year");
        anchor.replace_date(rollover)
    })
}

/// Represents an X.509 extension descriptor.
///
/// Contains the OID, criticality, and DER-encoded value of an extension.
#[derive(Clone, Debug)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }

    /// Decodes an `ExtensionParam` into a specific extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        E::from_x509_extension_value(&self.value)
    }
}

/// An unsigned certificate template: everything but issuer and signature.
///
/// Subject, serial and extensions are carried verbatim from the caller;
/// signing is the only way to turn this into a [`super::Certificate`].
#[derive(Clone, Debug, Builder)]
pub struct UnsignedCertificate {
    pub subject: DistinguishedName,
    pub public_key: PublicKey,
    pub serial_number: Vec<u8>,
    pub validity: Validity,
    #[builder(default)]
    pub extensions: Vec<ExtensionParam>,
}

impl UnsignedCertificate {
    /// Generates a fresh key pair and builds the template in one step,
    /// with notBefore = now and notAfter = notBefore + `ttl_years`.
    ///
    /// The template never touches a CA; it has no issuer or signature yet.
    /// Serial uniqueness across one CA's certificates is the caller's
    /// responsibility.
    pub fn with_fresh_key(
        ttl_years: i32,
        subject: DistinguishedName,
        extensions: Vec<ExtensionParam>,
        serial_number: Vec<u8>,
        key_bits: usize,
    ) -> Result<(KeyPair, Self)> {
        let key_pair = KeyPair::generate(key_bits)?;
        let template = UnsignedCertificate::builder()
            .subject(subject)
            .public_key(key_pair.public_key())
            .serial_number(serial_number)
            .validity(Validity::for_years(ttl_years))
            .extensions(extensions)
            .build();
        Ok((key_pair, template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::PrimitiveDateTime;

    fn utc(year: i32, month: Month, day: u8) -> OffsetDateTime {
        PrimitiveDateTime::new(
            Date::from_calendar_date(year, month, day).unwrap(),
            time::Time::MIDNIGHT,
        )
        .assume_utc()
    }

    #[test]
    fn ttl_is_a_calendar_year_increment() {
        let validity = Validity::for_years_from(utc(2026, Month::August, 6), 3);
        assert_eq!(validity.not_after.year(), 2029);
        assert_eq!(validity.not_after.month(), Month::August);
        assert_eq!(validity.not_after.day(), 6);
    }

    #[test]
    fn feb_29_anchor_rolls_to_march_1() {
        let validity = Validity::for_years_from(utc(2024, Month::February, 29), 1);
        assert_eq!(validity.not_after.year(), 2025);
        assert_eq!(validity.not_after.month(), Month::March);
        assert_eq!(validity.not_after.day(), 1);
    }

    #[test]
    fn feb_29_anchor_stays_when_target_is_leap() {
        let validity = Validity::for_years_from(utc(2024, Month::February, 29), 4);
        assert_eq!(validity.not_after.year(), 2028);
        assert_eq!(validity.not_after.month(), Month::February);
        assert_eq!(validity.not_after.day(), 29);
    }
}
