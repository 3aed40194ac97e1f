//! Store and forward control information, \[AI\] 29.4.3.5/6/14.
//!
//! SDS-TRANSFER and SDS-REPORT PDUs can carry an optional store-and-forward
//! control element. This library parses it on incoming PDUs; sending with
//! store/forward control is not supported.

use std::fmt;
use std::time::Duration;

use tetralib_core::{Error, Result};

/// The optional store-and-forward control element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreForwardControl {
    pub validity_period: ValidityPeriod,
    pub forward_address: ForwardAddress,
}

impl StoreForwardControl {
    /// Parse the control element from the head of `bytes`.
    ///
    /// The declared forward-address type dictates how many bytes the element
    /// occupies; a declared tail that is missing is an error.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::Parse("store forward control too short".to_string()));
        }

        let validity_period = ValidityPeriod::decode(bytes[0] >> 3);
        let address_type = bytes[0] & 0x07;

        let forward_address = match address_type {
            0 => {
                let sna = bytes.get(1).ok_or_else(|| {
                    Error::Parse(format!("store forward control with SNA too short: {}", bytes.len()))
                })?;
                ForwardAddress::Sna(*sna)
            }
            1 | 2 => {
                if bytes.len() < 4 {
                    return Err(Error::Parse(format!(
                        "store forward control with SSI too short: {}",
                        bytes.len()
                    )));
                }
                let mut ssi = [0u8; 3];
                ssi.copy_from_slice(&bytes[1..4]);
                if address_type == 1 {
                    ForwardAddress::Ssi(ssi)
                } else {
                    ForwardAddress::Tsi(ssi)
                }
            }
            3 => ForwardAddress::ExternalSubscriber(parse_external_subscriber(&bytes[1..])?),
            _ => ForwardAddress::None,
        };

        Ok(StoreForwardControl {
            validity_period,
            forward_address,
        })
    }

    /// Length of the encoded control element in bytes.
    pub fn encoded_len(&self) -> usize {
        match &self.forward_address {
            ForwardAddress::Sna(_) => 2,
            ForwardAddress::Ssi(_) | ForwardAddress::Tsi(_) => 4,
            ForwardAddress::ExternalSubscriber(number) => 2 + (number.len() + 1) / 2,
            ForwardAddress::None => 1,
        }
    }
}

/// Where a message should be forwarded when the destination is unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardAddress {
    /// Short number address.
    Sna(u8),
    /// Short subscriber identity (24 bits).
    Ssi([u8; 3]),
    /// TETRA subscriber identity (SSI part).
    Tsi([u8; 3]),
    /// External (PSTN/PABX) subscriber number.
    ExternalSubscriber(ExternalSubscriberNumber),
    /// No forward address present.
    None,
}

/// An external subscriber number: a sequence of BCD digits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExternalSubscriberNumber(Vec<u8>);

impl ExternalSubscriberNumber {
    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ExternalSubscriberNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{:X}", digit)?;
        }
        Ok(())
    }
}

/// Parse an external subscriber number: one length byte (digit count)
/// followed by the packed BCD digits, most significant nibble first.
fn parse_external_subscriber(bytes: &[u8]) -> Result<ExternalSubscriberNumber> {
    let digit_count = *bytes.first().ok_or_else(|| {
        Error::Parse("store forward control with external subscriber number too short".to_string())
    })? as usize;
    let byte_count = (digit_count + 1) / 2;
    let tail = bytes.get(1..1 + byte_count).ok_or_else(|| {
        Error::Parse(format!(
            "store forward control with external subscriber number too short: {} digits declared, {} bytes available",
            digit_count,
            bytes.len() - 1
        ))
    })?;

    let mut digits = Vec::with_capacity(digit_count);
    for &b in tail {
        digits.push(b >> 4);
        if digits.len() < digit_count {
            digits.push(b & 0x0F);
        }
    }
    Ok(ExternalSubscriberNumber(digits))
}

/// Validity period of a stored message, \[AI\] table 29.25.
///
/// The 5-bit code maps to duration buckets: 10-second steps up to one
/// minute, then whole minutes, 10-minute steps, hours, 6-hour steps, and
/// 48-hour steps up to 12 days; code 31 means no expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityPeriod {
    Bounded(Duration),
    Infinite,
}

impl ValidityPeriod {
    /// Decode a 5-bit validity period code.
    pub fn decode(code: u8) -> Self {
        let seconds = match code {
            0 => 0,
            1..=6 => code as u64 * 10,
            7..=10 => (code as u64 - 5) * 60,
            11..=16 => (code as u64 - 10) * 600,
            17..=21 => (code as u64 - 15) * 3600,
            22..=24 => (code as u64 - 20) * 6 * 3600,
            25..=30 => (code as u64 - 24) * 48 * 3600,
            _ => return ValidityPeriod::Infinite,
        };
        ValidityPeriod::Bounded(Duration::from_secs(seconds))
    }

    /// Encode this validity period into its 5-bit code, choosing the
    /// smallest bucket whose upper bound covers the duration. Any positive
    /// remainder within a bucket rounds up.
    pub fn encode(&self) -> u8 {
        let duration = match self {
            ValidityPeriod::Infinite => return 31,
            ValidityPeriod::Bounded(d) => *d,
        };

        let bucket = |unit_secs: u64, offset: u8| -> u8 {
            let mut steps = duration.as_secs() / unit_secs;
            if duration > Duration::from_secs(steps * unit_secs) {
                steps += 1;
            }
            steps as u8 + offset
        };

        if duration.is_zero() {
            0
        } else if duration <= Duration::from_secs(60) {
            bucket(10, 0)
        } else if duration <= Duration::from_secs(5 * 60) {
            bucket(60, 5)
        } else if duration <= Duration::from_secs(3600) {
            bucket(600, 10)
        } else if duration <= Duration::from_secs(6 * 3600) {
            bucket(3600, 15)
        } else if duration <= Duration::from_secs(24 * 3600) {
            bucket(6 * 3600, 20)
        } else if duration <= Duration::from_secs(12 * 24 * 3600) {
            bucket(48 * 3600, 24)
        } else {
            31
        }
    }
}
