//! Callout alerts (protocol 0xC3).
//!
//! Pager-style alerts sent to alarm groups. The SDU starts with a TLV
//! prologue carrying the callout number and priority, followed by fixed
//! fields: the sender sub-address, the receiver sub-address list, a
//! mandatory `0xFF` separator, and the alert text in ISO 8859-1.

use tetralib_core::{Error, Result};

use crate::pdu::{EncodePdu, PduBuffer};
use crate::text::{decode_payload_text, encode_payload_text, TextEncoding};

/// TLV tag of the callout number element.
const CALLOUT_NUMBER_TAG: u8 = 0x0D;
/// Separator between the receiver sub-address list and the alert text.
const TEXT_SEPARATOR: u8 = 0xFF;

/// A callout alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutAlert {
    /// The callout number identifying the alarm.
    pub number: u32,
    /// Alert priority (4 bits).
    pub priority: u8,
    pub sender_sub_address: u16,
    pub receiver_sub_addresses: Vec<u16>,
    /// Alert text, ISO 8859-1 on the wire.
    pub text: String,
}

impl CalloutAlert {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut index = 0;
        let mut number = 0u32;
        let mut priority = 0u8;

        // TLV prologue; terminated by the first unknown tag, which is not
        // consumed.
        loop {
            let Some(&tag) = bytes.get(index) else {
                return Err(Error::Parse(
                    "callout alert truncated in TLV prologue".to_string(),
                ));
            };
            if tag != CALLOUT_NUMBER_TAG {
                break;
            }
            index += 1;

            // Packed byte: length of the continuation in the upper nibble,
            // the number's most significant nibble in the lower one.
            let packed = *bytes.get(index).ok_or_else(callout_number_truncated)?;
            index += 1;
            let continuation_len = (packed >> 4) as usize;
            number = (packed & 0x0F) as u32;
            for _ in 0..continuation_len {
                let byte = *bytes.get(index).ok_or_else(callout_number_truncated)?;
                number = (number << 8) | byte as u32;
                index += 1;
            }

            priority = bytes.get(index).ok_or_else(callout_number_truncated)? & 0x0F;
            index += 1;
        }

        let sender = bytes.get(index..index + 2).ok_or_else(|| {
            Error::Parse("callout alert truncated before sender sub-address".to_string())
        })?;
        let sender_sub_address = u16::from_be_bytes([sender[0], sender[1]]);
        index += 2;

        let receiver_bytes = *bytes.get(index).ok_or_else(|| {
            Error::Parse("callout alert truncated before receiver sub-addresses".to_string())
        })? as usize;
        index += 1;
        if receiver_bytes % 2 != 0 {
            return Err(Error::Parse(format!(
                "odd receiver sub-address length: {receiver_bytes}"
            )));
        }
        let receivers = bytes.get(index..index + receiver_bytes).ok_or_else(|| {
            Error::Parse("callout alert receiver sub-address list truncated".to_string())
        })?;
        let receiver_sub_addresses = receivers
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        index += receiver_bytes;

        match bytes.get(index) {
            Some(&TEXT_SEPARATOR) => index += 1,
            _ => {
                return Err(Error::Parse(
                    "callout alert separator missing".to_string(),
                ))
            }
        }

        Ok(CalloutAlert {
            number,
            priority,
            sender_sub_address,
            receiver_sub_addresses,
            text: decode_payload_text(TextEncoding::ISO8859_1, &bytes[index..]),
        })
    }
}

impl EncodePdu for CalloutAlert {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_u8(CALLOUT_NUMBER_TAG);

        // Continuation bytes needed beyond the number's most significant
        // nibble. The encodable range is 28 bits.
        let number = self.number & 0x0FFF_FFFF;
        let mut continuation_len = 0usize;
        while number >> (4 + 8 * continuation_len) != 0 {
            continuation_len += 1;
        }
        buf.put_u8(((continuation_len as u8) << 4) | ((number >> (8 * continuation_len)) as u8 & 0x0F));
        for i in (0..continuation_len).rev() {
            buf.put_u8((number >> (8 * i)) as u8);
        }
        buf.put_u8(self.priority & 0x0F);

        buf.put_slice(&self.sender_sub_address.to_be_bytes());
        buf.put_u8((self.receiver_sub_addresses.len() * 2) as u8);
        for receiver in &self.receiver_sub_addresses {
            buf.put_slice(&receiver.to_be_bytes());
        }
        buf.put_u8(TEXT_SEPARATOR);
        encode_payload_text(buf, &self.text, TextEncoding::ISO8859_1);
    }
}

fn callout_number_truncated() -> Error {
    Error::Parse("callout alert truncated in callout number element".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_alert_with_receiver_list() {
        // Callout number 0x967, priority 1, sender 0x1111, 14 receivers,
        // text "Test".
        let bytes: Vec<u8> = vec![
            0x0D, 0x19, 0x67, 0x11, // TLV: number + priority
            0x11, 0x11, // sender sub-address
            0x1C, // 28 bytes of receiver sub-addresses
            0x00, 0x0B, 0x00, 0x0C, 0x00, 0x0D, 0x00, 0x0E, 0x13, 0xBC, 0x13, 0xBD, 0x13, 0xED,
            0x13, 0xF0, 0x13, 0xF1, 0x13, 0xF4, 0x13, 0xF6, 0x14, 0x19, 0x14, 0x23, 0x14, 0x66,
            0xFF, // separator
            0x54, 0x65, 0x73, 0x74, // "Test"
        ];

        let alert = CalloutAlert::parse(&bytes).unwrap();
        assert_eq!(alert.number, 0x967);
        assert_eq!(alert.priority, 1);
        assert_eq!(alert.sender_sub_address, 0x1111);
        assert_eq!(alert.receiver_sub_addresses.len(), 14);
        assert_eq!(alert.receiver_sub_addresses[0], 0x000B);
        assert_eq!(alert.receiver_sub_addresses[13], 0x1466);
        assert_eq!(alert.text, "Test");
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let bytes = vec![0x0D, 0x09, 0x01, 0x11, 0x11, 0x00, 0x54];
        assert!(CalloutAlert::parse(&bytes).is_err());
    }

    #[test]
    fn parse_rejects_truncated_receiver_list() {
        let bytes = vec![0x0D, 0x09, 0x01, 0x11, 0x11, 0x04, 0x00, 0x0B];
        assert!(CalloutAlert::parse(&bytes).is_err());
    }

    #[test]
    fn round_trip() {
        let alert = CalloutAlert {
            number: 0x967,
            priority: 1,
            sender_sub_address: 0x1111,
            receiver_sub_addresses: vec![0x000B, 0x13BC],
            text: "Probealarm".to_string(),
        };

        let mut buf = PduBuffer::new();
        alert.encode(&mut buf);
        assert_eq!(CalloutAlert::parse(buf.as_slice()).unwrap(), alert);
    }

    #[test]
    fn round_trip_small_number_has_no_continuation() {
        let alert = CalloutAlert {
            number: 7,
            priority: 3,
            sender_sub_address: 1,
            receiver_sub_addresses: Vec::new(),
            text: String::new(),
        };

        let mut buf = PduBuffer::new();
        alert.encode(&mut buf);
        // tag, packed (len 0, number 7), priority, sender, empty receiver
        // list, separator
        assert_eq!(
            buf.as_slice(),
            &[0x0D, 0x07, 0x03, 0x00, 0x01, 0x00, 0xFF]
        );
        assert_eq!(CalloutAlert::parse(buf.as_slice()).unwrap(), alert);
    }
}
