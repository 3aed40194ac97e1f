//! The `+CTSDSR:` unsolicited response header, \[PEI\] 6.13.3.
//!
//! Grammar (the token includes its colon):
//!
//! ```text
//! +CTSDSR: <AIservice>[,<srcIdent>,<srcType>],<dstIdent>[,<dstType>],<bits>[,<e2ee>]
//! ```
//!
//! Three or four fields carry only the destination; six or seven fields add
//! the source identity and optionally the end-to-end encryption flag. The
//! last field is always the PDU length in bits.

use std::fmt;

use tetralib_core::{Error, Identity, Result};

/// Air interface service identifier, \[PEI\] 6.17.3 (the subset relevant for
/// SDS handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiService {
    /// SDS type 1 (16 bit user data).
    Sds1,
    /// SDS type 2 (32 bit user data).
    Sds2,
    /// SDS type 3 (64 bit user data).
    Sds3,
    /// SDS transport layer service.
    SdsTl,
    /// Pre-coded status service.
    Status,
}

impl AiService {
    fn parse(token: &str) -> Result<Self> {
        match token {
            "9" => Ok(AiService::Sds1),
            "10" => Ok(AiService::Sds2),
            "11" => Ok(AiService::Sds3),
            "12" => Ok(AiService::SdsTl),
            "13" => Ok(AiService::Status),
            other => Err(Error::Unsupported(format!(
                "AI service {other} is not supported"
            ))),
        }
    }
}

impl fmt::Display for AiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AiService::Sds1 => "9",
            AiService::Sds2 => "10",
            AiService::Sds3 => "11",
            AiService::SdsTl => "12",
            AiService::Status => "13",
        };
        f.write_str(tag)
    }
}

/// The information provided with the `+CTSDSR:` unsolicited response
/// indicating an incoming SDS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub service: AiService,
    pub source: Option<Identity>,
    pub destination: Identity,
    /// Length of the following PDU in bits.
    pub pdu_bits: usize,
}

impl Header {
    /// Parse a header line. The line must include the `+CTSDSR:` token.
    pub fn parse(line: &str) -> Result<Self> {
        let fields_str = line
            .strip_prefix("+CTSDSR:")
            .ok_or_else(|| Error::Parse(format!("invalid header, +CTSDSR expected: {line}")))?;

        let fields: Vec<&str> = fields_str.split(',').map(str::trim).collect();
        let (service, source, destination) = match fields.len() {
            3 | 4 => (AiService::parse(fields[0])?, None, Identity::from(fields[1])),
            6 | 7 => (
                AiService::parse(fields[0])?,
                Some(Identity::from(fields[1])),
                Identity::from(fields[3]),
            ),
            _ => {
                return Err(Error::Parse(format!(
                    "invalid header, wrong field count: {line}"
                )))
            }
        };

        let bits_field = fields[fields.len() - 1];
        let pdu_bits = bits_field.parse::<usize>().map_err(|e| {
            Error::Parse(format!("invalid PDU bit count {bits_field}: {e}"))
        })?;

        Ok(Header {
            service,
            source,
            destination,
            pdu_bits,
        })
    }

    /// Size of the following PDU in bytes.
    pub fn pdu_bytes(&self) -> usize {
        (self.pdu_bits + 7) / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimum_set() {
        let header = Header::parse("+CTSDSR: 12,1234567,16").unwrap();
        assert_eq!(header.service, AiService::SdsTl);
        assert_eq!(header.source, None);
        assert_eq!(header.destination, Identity::from("1234567"));
        assert_eq!(header.pdu_bits, 16);
    }

    #[test]
    fn parse_minimum_set_with_identity_type() {
        let header = Header::parse("+CTSDSR: 12,1234567,0,16").unwrap();
        assert_eq!(header.source, None);
        assert_eq!(header.destination, Identity::from("1234567"));
        assert_eq!(header.pdu_bits, 16);
    }

    #[test]
    fn parse_with_source_identity() {
        let header = Header::parse("+CTSDSR: 12,1234567,0,2345678,0,16").unwrap();
        assert_eq!(header.source, Some(Identity::from("1234567")));
        assert_eq!(header.destination, Identity::from("2345678"));
        assert_eq!(header.pdu_bits, 16);
    }

    #[test]
    fn parse_with_end_to_end_encryption_flag() {
        let header = Header::parse("+CTSDSR: 12,1234567,0,2345678,0,16,1").unwrap();
        assert_eq!(header.source, Some(Identity::from("1234567")));
        assert_eq!(header.destination, Identity::from("2345678"));
        assert_eq!(header.pdu_bits, 16);
    }

    #[test]
    fn parse_status_service() {
        let header = Header::parse("+CTSDSR: 13,1234567,0,2345678,0,16").unwrap();
        assert_eq!(header.service, AiService::Status);
    }

    #[test]
    fn parse_rejects_empty_and_missing_prefix() {
        assert!(Header::parse("").is_err());
        assert!(Header::parse("+CREG: 1").is_err());
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert!(Header::parse("+CTSDSR: 12,1234567").is_err());
        assert!(Header::parse("+CTSDSR: 12,1,2,3,4").is_err());
    }

    #[test]
    fn parse_rejects_bad_bit_count() {
        assert!(Header::parse("+CTSDSR: 12,1234567,abc").is_err());
    }

    #[test]
    fn pdu_bytes_rounds_up() {
        let header = Header::parse("+CTSDSR: 12,1234567,13").unwrap();
        assert_eq!(header.pdu_bytes(), 2);
        let header = Header::parse("+CTSDSR: 12,1234567,16").unwrap();
        assert_eq!(header.pdu_bytes(), 2);
    }
}
