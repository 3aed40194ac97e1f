//! Service data units carried inside SDS-TRANSFER PDUs.
//!
//! - [`TextSdu`] -- plain text with an optional timestamp (\[AI\] 29.5.3.3)
//! - [`ConcatenatedTextSdu`] -- text preceded by a user data header that
//!   identifies the part's place in a concatenated message (\[AI\] 29.5.10.3)
//! - [`ConcatenatedSdsSdu`] -- an opaque fragment of a concatenated SDS
//!   (the concatenation transfer SDU)

use tetralib_core::{Error, Result};

use crate::pdu::{EncodePdu, PduBuffer, ProtocolIdentifier};
use crate::text::{decode_payload_text, encode_payload_text, TextEncoding};
use crate::timestamp::Timestamp;

/// Meta information preceding the text of textual SDUs: one byte with the
/// timestamp-present flag and the coding scheme, optionally followed by the
/// 3-byte timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextHeader {
    pub encoding: TextEncoding,
    pub timestamp: Option<Timestamp>,
}

impl TextHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let first = *bytes
            .first()
            .ok_or_else(|| Error::Parse("text header too short: 0".to_string()))?;

        let encoding = TextEncoding(first & 0x7F);
        let timestamp = if first & 0x80 != 0 {
            if bytes.len() < 4 {
                return Err(Error::Parse(format!(
                    "text header with timestamp too short: {}",
                    bytes.len()
                )));
            }
            Some(Timestamp::decode(&bytes[1..4])?)
        } else {
            None
        };

        Ok(TextHeader {
            encoding,
            timestamp,
        })
    }

    /// Length of this header in bytes (1, or 4 with a timestamp).
    pub fn encoded_len(&self) -> usize {
        if self.timestamp.is_some() {
            4
        } else {
            1
        }
    }
}

impl EncodePdu for TextHeader {
    fn encode(&self, buf: &mut PduBuffer) {
        match &self.timestamp {
            Some(timestamp) => {
                buf.put_u8(self.encoding.0 | 0x80);
                buf.put_slice(&timestamp.encode());
            }
            None => buf.put_u8(self.encoding.0),
        }
    }
}

/// The user data of a text message.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSdu {
    pub header: TextHeader,
    pub text: String,
}

impl TextSdu {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let header = TextHeader::parse(bytes)?;
        let text = decode_payload_text(header.encoding, &bytes[header.encoded_len()..]);
        Ok(TextSdu { header, text })
    }

    /// Length of this encoded SDU in bytes.
    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + crate::text::text_bytes(self.header.encoding, self.text.chars().count())
    }
}

impl EncodePdu for TextSdu {
    fn encode(&self, buf: &mut PduBuffer) {
        self.header.encode(buf);
        encode_payload_text(buf, &self.text, self.header.encoding);
    }
}

/// User data header information element identifiers relevant for
/// concatenated text, \[AI\] table 29.47.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdhElementId {
    /// 3-byte element with a one-byte message reference.
    ShortReference,
    /// 4-byte element with a two-byte message reference.
    LongReference,
}

impl UdhElementId {
    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(UdhElementId::ShortReference),
            0x08 => Ok(UdhElementId::LongReference),
            other => Err(Error::Unsupported(format!(
                "UDH information element {other:#04x} is not supported"
            ))),
        }
    }

    fn byte(self) -> u8 {
        match self {
            UdhElementId::ShortReference => 0x00,
            UdhElementId::LongReference => 0x08,
        }
    }
}

/// The user data header of a concatenated text message, \[AI\] 29.5.10.3.
///
/// The message reference here identifies the whole concatenated message; it
/// is the same in every part, unlike the per-part transfer reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatenatedTextUdh {
    pub header_length: u8,
    pub element_id: UdhElementId,
    pub element_length: u8,
    pub message_reference: u16,
    pub total_number: u8,
    pub sequence_number: u8,
}

impl ConcatenatedTextUdh {
    /// A short-reference UDH for part `sequence_number` of `total_number`.
    pub fn short(message_reference: u8, total_number: u8, sequence_number: u8) -> Self {
        ConcatenatedTextUdh {
            header_length: 5,
            element_id: UdhElementId::ShortReference,
            element_length: 3,
            message_reference: message_reference as u16,
            total_number,
            sequence_number,
        }
    }

    /// A long-reference UDH for part `sequence_number` of `total_number`.
    pub fn long(message_reference: u16, total_number: u8, sequence_number: u8) -> Self {
        ConcatenatedTextUdh {
            header_length: 6,
            element_id: UdhElementId::LongReference,
            element_length: 4,
            message_reference,
            total_number,
            sequence_number,
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 6 {
            return Err(Error::Parse(format!(
                "concatenated text UDH too short: {}",
                bytes.len()
            )));
        }

        let header_length = bytes[0];
        let element_id = UdhElementId::from_byte(bytes[1])?;
        let element_length = bytes[2];

        let (message_reference, numbers_start) = match element_id {
            UdhElementId::ShortReference => {
                if element_length != 3 {
                    return Err(Error::Parse(format!(
                        "UDH information element length invalid, got {element_length} but expected 3"
                    )));
                }
                (bytes[3] as u16, 4)
            }
            UdhElementId::LongReference => {
                if element_length != 4 {
                    return Err(Error::Parse(format!(
                        "UDH information element length invalid, got {element_length} but expected 4"
                    )));
                }
                if bytes.len() < 7 {
                    return Err(Error::Parse(format!(
                        "concatenated text UDH with long reference too short: {}",
                        bytes.len()
                    )));
                }
                (((bytes[4] as u16) << 8) | bytes[3] as u16, 5)
            }
        };

        let total_number = bytes[numbers_start];
        let sequence_number = bytes[numbers_start + 1];
        if total_number < 1 || sequence_number < 1 || sequence_number > total_number {
            return Err(Error::Parse(format!(
                "invalid concatenation part numbering: {sequence_number} of {total_number}"
            )));
        }

        Ok(ConcatenatedTextUdh {
            header_length,
            element_id,
            element_length,
            message_reference,
            total_number,
            sequence_number,
        })
    }

    /// Length of this header in bytes, including the length byte itself.
    pub fn encoded_len(&self) -> usize {
        self.header_length as usize + 1
    }
}

impl EncodePdu for ConcatenatedTextUdh {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_u8(self.header_length);
        buf.put_u8(self.element_id.byte());
        buf.put_u8(self.element_length);
        buf.put_u8(self.message_reference as u8);
        if self.element_id == UdhElementId::LongReference {
            buf.put_u8((self.message_reference >> 8) as u8);
        }
        buf.put_u8(self.total_number);
        buf.put_u8(self.sequence_number);
    }
}

/// The user data of a concatenated text message: a text SDU preceded by the
/// concatenation user data header.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatenatedTextSdu {
    pub text: TextSdu,
    pub udh: ConcatenatedTextUdh,
}

impl ConcatenatedTextSdu {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let header = TextHeader::parse(bytes)?;
        let udh_start = header.encoded_len();
        let udh = ConcatenatedTextUdh::parse(bytes.get(udh_start..).ok_or_else(|| {
            Error::Parse(format!("concatenated text SDU too short: {}", bytes.len()))
        })?)?;

        let text_start = udh_start + udh.encoded_len();
        let payload = bytes.get(text_start..).ok_or_else(|| {
            Error::Parse(format!(
                "concatenated text SDU shorter than its headers: {}",
                bytes.len()
            ))
        })?;

        Ok(ConcatenatedTextSdu {
            text: TextSdu {
                header,
                text: decode_payload_text(header.encoding, payload),
            },
            udh,
        })
    }
}

impl EncodePdu for ConcatenatedTextSdu {
    fn encode(&self, buf: &mut PduBuffer) {
        self.text.header.encode(buf);
        self.udh.encode(buf);
        encode_payload_text(buf, &self.text.text, self.text.header.encoding);
    }
}

/// A fragment of a concatenated SDS (concatenation transfer SDU, protocol
/// 0x8C).
///
/// The concatenation reference is 4 bits, or 12 bits when the extension flag
/// is set. The first fragment carries the protocol identifier of the payload
/// it transports; the payload bytes of every fragment are opaque at this
/// level and are reassembled by the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatenatedSdsSdu {
    pub reference: u16,
    pub extended_reference: bool,
    pub total_number: u8,
    pub sequence_number: u8,
    /// Protocol identifier of the transported payload; only present in the
    /// first fragment, where the payload data begins with it.
    pub payload_protocol: Option<ProtocolIdentifier>,
    pub payload: Vec<u8>,
}

impl ConcatenatedSdsSdu {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let first = *bytes
            .first()
            .ok_or_else(|| Error::Parse("concatenated SDS SDU too short: 0".to_string()))?;

        if first & 0xE0 != 0 {
            return Err(Error::Parse(format!(
                "concatenation transfer expects zero control bits, got {:#04x}",
                first
            )));
        }

        let extended_reference = first & 0x10 != 0;
        let mut reference = (first & 0x0F) as u16;
        let mut index = 1;
        if extended_reference {
            let extension = *bytes.get(index).ok_or_else(|| {
                Error::Parse(format!("concatenated SDS SDU too short: {}", bytes.len()))
            })?;
            reference = (reference << 8) | extension as u16;
            index += 1;
        }

        if bytes.len() < index + 2 {
            return Err(Error::Parse(format!(
                "concatenated SDS SDU too short: {}",
                bytes.len()
            )));
        }
        let total_number = bytes[index];
        let sequence_number = bytes[index + 1];
        index += 2;
        if total_number < 1 || sequence_number < 1 || sequence_number > total_number {
            return Err(Error::Parse(format!(
                "invalid concatenation part numbering: {sequence_number} of {total_number}"
            )));
        }

        // The first fragment's payload starts with the transported protocol
        // identifier; it stays part of the payload data.
        let payload = bytes[index..].to_vec();
        let payload_protocol = if sequence_number == 1 {
            payload.first().map(|&pid| ProtocolIdentifier(pid))
        } else {
            None
        };

        Ok(ConcatenatedSdsSdu {
            reference,
            extended_reference,
            total_number,
            sequence_number,
            payload_protocol,
            payload,
        })
    }
}

impl EncodePdu for ConcatenatedSdsSdu {
    fn encode(&self, buf: &mut PduBuffer) {
        if self.extended_reference {
            buf.put_u8(0x10 | ((self.reference >> 8) as u8 & 0x0F));
            buf.put_u8(self.reference as u8);
        } else {
            buf.put_u8(self.reference as u8 & 0x0F);
        }
        buf.put_u8(self.total_number);
        buf.put_u8(self.sequence_number);
        buf.put_slice(&self.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetralib_core::hex_to_binary;

    #[test]
    fn text_header_without_timestamp_is_one_byte() {
        let header = TextHeader::parse(&[0x01, 0x74]).unwrap();
        assert_eq!(header.encoding, TextEncoding::ISO8859_1);
        assert!(header.timestamp.is_none());
        assert_eq!(header.encoded_len(), 1);
    }

    #[test]
    fn text_header_with_timestamp_is_four_bytes() {
        let header = TextHeader::parse(&[0x81, 0x04, 0x5A, 0x8F]).unwrap();
        assert_eq!(header.encoding, TextEncoding::ISO8859_1);
        let stamp = header.timestamp.unwrap();
        assert_eq!(stamp.datetime.hour(), 10);
        assert_eq!(stamp.datetime.minute(), 15);
        assert_eq!(header.encoded_len(), 4);
    }

    #[test]
    fn text_header_with_timestamp_rejects_short_input() {
        assert!(TextHeader::parse(&[0x81, 0x04, 0x5A]).is_err());
    }

    #[test]
    fn parse_concatenated_text_sdu() {
        // Part 1 of 2, with timestamp, short UDH reference 0xC9.
        let bytes = hex_to_binary("81045A8F050003C90201746573746D657373616765").unwrap();
        let sdu = ConcatenatedTextSdu::parse(&bytes).unwrap();

        assert_eq!(sdu.text.text, "testmessage");
        assert_eq!(sdu.udh.header_length, 5);
        assert_eq!(sdu.udh.element_id, UdhElementId::ShortReference);
        assert_eq!(sdu.udh.element_length, 3);
        assert_eq!(sdu.udh.message_reference, 0xC9);
        assert_eq!(sdu.udh.total_number, 2);
        assert_eq!(sdu.udh.sequence_number, 1);
    }

    #[test]
    fn udh_long_reference_is_little_endian() {
        let udh = ConcatenatedTextUdh::parse(&[0x06, 0x08, 0x04, 0x34, 0x12, 0x03, 0x02]).unwrap();
        assert_eq!(udh.element_id, UdhElementId::LongReference);
        assert_eq!(udh.message_reference, 0x1234);
        assert_eq!(udh.total_number, 3);
        assert_eq!(udh.sequence_number, 2);
        assert_eq!(udh.encoded_len(), 7);
    }

    #[test]
    fn udh_rejects_bad_element_length() {
        assert!(ConcatenatedTextUdh::parse(&[0x05, 0x00, 0x04, 0xC9, 0x02, 0x01]).is_err());
    }

    #[test]
    fn udh_rejects_bad_numbering() {
        // sequence 3 of 2
        assert!(ConcatenatedTextUdh::parse(&[0x05, 0x00, 0x03, 0xC9, 0x02, 0x03]).is_err());
        // total 0
        assert!(ConcatenatedTextUdh::parse(&[0x05, 0x00, 0x03, 0xC9, 0x00, 0x01]).is_err());
    }

    #[test]
    fn udh_round_trip() {
        let udh = ConcatenatedTextUdh::short(0xC9, 2, 1);
        let mut buf = PduBuffer::new();
        udh.encode(&mut buf);
        assert_eq!(buf.as_slice(), &[0x05, 0x00, 0x03, 0xC9, 0x02, 0x01]);
        assert_eq!(ConcatenatedTextUdh::parse(buf.as_slice()).unwrap(), udh);

        let udh = ConcatenatedTextUdh::long(0x1234, 3, 2);
        let mut buf = PduBuffer::new();
        udh.encode(&mut buf);
        assert_eq!(ConcatenatedTextUdh::parse(buf.as_slice()).unwrap(), udh);
    }

    #[test]
    fn concatenated_sds_first_fragment_peeks_payload_protocol() {
        let sdu = ConcatenatedSdsSdu::parse(&[0x03, 0x02, 0x01, 0xC3, 0x0D, 0x19]).unwrap();
        assert_eq!(sdu.reference, 3);
        assert!(!sdu.extended_reference);
        assert_eq!(sdu.total_number, 2);
        assert_eq!(sdu.sequence_number, 1);
        assert_eq!(sdu.payload_protocol, Some(ProtocolIdentifier::CALLOUT));
        // The protocol identifier stays part of the payload data.
        assert_eq!(sdu.payload, vec![0xC3, 0x0D, 0x19]);
    }

    #[test]
    fn concatenated_sds_later_fragment_has_no_payload_protocol() {
        let sdu = ConcatenatedSdsSdu::parse(&[0x03, 0x02, 0x02, 0x65, 0x73]).unwrap();
        assert_eq!(sdu.sequence_number, 2);
        assert_eq!(sdu.payload_protocol, None);
        assert_eq!(sdu.payload, vec![0x65, 0x73]);
    }

    #[test]
    fn concatenated_sds_extended_reference() {
        let sdu = ConcatenatedSdsSdu::parse(&[0x1A, 0xBC, 0x02, 0x02, 0x00]).unwrap();
        assert!(sdu.extended_reference);
        assert_eq!(sdu.reference, 0xABC);
    }

    #[test]
    fn concatenated_sds_rejects_nonzero_control_bits() {
        assert!(ConcatenatedSdsSdu::parse(&[0x23, 0x02, 0x01, 0x00]).is_err());
    }

    #[test]
    fn concatenated_sds_round_trip() {
        let sdu = ConcatenatedSdsSdu {
            reference: 0xABC,
            extended_reference: true,
            total_number: 2,
            sequence_number: 2,
            payload_protocol: None,
            payload: vec![0xDE, 0xAD],
        };
        let mut buf = PduBuffer::new();
        sdu.encode(&mut buf);
        assert_eq!(ConcatenatedSdsSdu::parse(buf.as_slice()).unwrap(), sdu);
    }
}
