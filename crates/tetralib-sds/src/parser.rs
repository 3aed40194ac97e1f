//! Incoming message parsing: header line + hex PDU line to a typed payload.
//!
//! [`parse_incoming_message`] applies the default protocol dispatch. The
//! [`Parser`] type carries a protocol-identifier-to-parser map that
//! applications can extend or override, e.g. to handle a vendor-specific
//! protocol identifier.

use std::collections::HashMap;

use tracing::warn;

use tetralib_core::{hex_to_binary, Error, Result};

use crate::header::{AiService, Header};
use crate::pdu::{
    describe_unsupported, parse_sds_tl_message, parse_sds_tl_pdu, parse_status, Payload,
    ProtocolIdentifier, SimpleTextMessage,
};

/// An incoming message: the `+CTSDSR:` header and the decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub header: Header,
    pub payload: Payload,
}

/// Parse an incoming message with the given header line and PDU hex line,
/// using the default protocol dispatch.
///
/// The message may be a status, a simple text message, a text message, part
/// of a concatenated message, or a report/acknowledge.
pub fn parse_incoming_message(header_line: &str, pdu_hex: &str) -> Result<IncomingMessage> {
    let header = Header::parse(header_line)?;
    let pdu_bytes = prepare_pdu_bytes(&header, pdu_hex)?;

    let payload = match header.service {
        AiService::SdsTl => parse_sds_tl_pdu(&pdu_bytes)?,
        AiService::Status => parse_status(&pdu_bytes)?,
        service => {
            return Err(Error::Unsupported(format!(
                "AI service {service} is not supported"
            )))
        }
    };

    Ok(IncomingMessage { header, payload })
}

type PayloadParser = Box<dyn Fn(&[u8]) -> Result<Payload> + Send + Sync>;

/// An SDS parser with per-protocol payload parsers.
///
/// [`Parser::new`] registers the default parsers for simple text messaging
/// (0x02, 0x09), SDS-TL text messaging (0x82, 0x89, 0x8A), concatenated SDS
/// messaging (0x8C), and callout alerts (0xC3). Individual protocols can be
/// overridden with [`Parser::set`].
pub struct Parser {
    parsers: HashMap<u8, PayloadParser>,
}

impl Parser {
    pub fn new() -> Self {
        let mut parser = Parser {
            parsers: HashMap::new(),
        };

        let simple = |bytes: &[u8]| -> Result<Payload> {
            Ok(Payload::SimpleText(SimpleTextMessage::parse(bytes)?))
        };
        parser.set(ProtocolIdentifier::SIMPLE_TEXT_MESSAGING, simple);
        parser.set(ProtocolIdentifier::SIMPLE_IMMEDIATE_TEXT_MESSAGING, simple);
        parser.set(ProtocolIdentifier::TEXT_MESSAGING, parse_sds_tl_message);
        parser.set(ProtocolIdentifier::IMMEDIATE_TEXT_MESSAGING, parse_sds_tl_message);
        parser.set(ProtocolIdentifier::USER_DATA_HEADER_MESSAGING, parse_sds_tl_message);
        parser.set(ProtocolIdentifier::CONCATENATED_SDS_MESSAGING, transfer_only);
        parser.set(ProtocolIdentifier::CALLOUT, transfer_only);

        parser
    }

    /// Set an individual payload parser for the given protocol identifier.
    pub fn set<F>(&mut self, protocol: ProtocolIdentifier, parse: F)
    where
        F: Fn(&[u8]) -> Result<Payload> + Send + Sync + 'static,
    {
        self.parsers.insert(protocol.0, Box::new(parse));
    }

    /// Parse an incoming message with the given header line and PDU hex
    /// line, using this parser's protocol dispatch.
    pub fn parse_incoming_message(&self, header_line: &str, pdu_hex: &str) -> Result<IncomingMessage> {
        let header = Header::parse(header_line)?;
        let pdu_bytes = prepare_pdu_bytes(&header, pdu_hex)?;

        let payload = match header.service {
            AiService::SdsTl => self.parse_sds_tl(&pdu_bytes)?,
            AiService::Status => parse_status(&pdu_bytes)?,
            service => {
                return Err(Error::Unsupported(format!(
                    "AI service {service} is not supported"
                )))
            }
        };

        Ok(IncomingMessage { header, payload })
    }

    fn parse_sds_tl(&self, bytes: &[u8]) -> Result<Payload> {
        let pid = *bytes
            .first()
            .ok_or_else(|| Error::Parse("empty payload".to_string()))?;
        let parse = self.parsers.get(&pid).ok_or_else(|| describe_unsupported(pid))?;
        parse(bytes)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrapper enforcing that a protocol only carries SDS-TRANSFER messages.
fn transfer_only(bytes: &[u8]) -> Result<Payload> {
    match parse_sds_tl_pdu(bytes)? {
        payload @ Payload::Transfer(_) => Ok(payload),
        other => Err(Error::Unsupported(format!(
            "unexpected non-transfer payload: {other:?}"
        ))),
    }
}

/// Decode the hex PDU line and align it with the header's declared length.
///
/// A PDU longer than declared is truncated (with a warning); a shorter one
/// is an error.
fn prepare_pdu_bytes(header: &Header, pdu_hex: &str) -> Result<Vec<u8>> {
    let mut pdu_bytes = hex_to_binary(pdu_hex)
        .map_err(|e| Error::Parse(format!("cannot decode hex PDU data: {e}")))?;

    let declared = header.pdu_bytes();
    if pdu_bytes.len() < declared {
        return Err(Error::Parse(format!(
            "PDU shorter than the declared {} bits: {} bytes",
            header.pdu_bits,
            pdu_bytes.len()
        )));
    }
    if pdu_bytes.len() > declared {
        warn!(
            declared,
            actual = pdu_bytes.len(),
            "truncating PDU to its declared length"
        );
        pdu_bytes.truncate(declared);
    }

    Ok(pdu_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{Status, UserData};
    use crate::text::TextEncoding;
    use tetralib_core::Identity;

    #[test]
    fn parse_status_message() {
        let message =
            parse_incoming_message("+CTSDSR: 13,1234567,0,2345678,0,16", "8004").unwrap();

        assert_eq!(message.header.service, AiService::Status);
        assert_eq!(message.header.source, Some(Identity::from("1234567")));
        assert_eq!(message.header.destination, Identity::from("2345678"));
        assert_eq!(message.payload, Payload::Status(Status(0x8004)));
    }

    #[test]
    fn parse_simple_text_message() {
        let message = parse_incoming_message(
            "+CTSDSR: 12,1234567,0,2345678,0,104",
            "0201746573746D657373616765",
        )
        .unwrap();

        match message.payload {
            Payload::SimpleText(text) => {
                assert_eq!(text.encoding, TextEncoding::ISO8859_1);
                assert_eq!(text.text, "testmessage");
                assert!(!text.immediate());
            }
            other => panic!("expected simple text message, got {other:?}"),
        }
    }

    #[test]
    fn parse_simple_text_message_without_text() {
        let message =
            parse_incoming_message("+CTSDSR: 12,1234567,0,2345678,0,16", "0201").unwrap();
        match message.payload {
            Payload::SimpleText(text) => assert_eq!(text.text, ""),
            other => panic!("expected simple text message, got {other:?}"),
        }
    }

    #[test]
    fn parse_immediate_simple_text_message() {
        let message = parse_incoming_message(
            "+CTSDSR: 12,1234567,0,2345678,0,104",
            "0901746573746D657373616765",
        )
        .unwrap();
        match message.payload {
            Payload::SimpleText(text) => assert!(text.immediate()),
            other => panic!("expected simple text message, got {other:?}"),
        }
    }

    #[test]
    fn parse_concatenated_text_message_part() {
        let message = parse_incoming_message(
            "+CTSDSR: 12,1234567,0,2345678,0,192",
            "8A02C981045A8F050003C90201746573746D657373616765",
        )
        .unwrap();

        match message.payload {
            Payload::Transfer(transfer) => match transfer.user_data {
                UserData::ConcatenatedText(sdu) => {
                    assert_eq!(sdu.udh.message_reference, 0xC9);
                    assert_eq!(sdu.udh.total_number, 2);
                    assert_eq!(sdu.udh.sequence_number, 1);
                    assert_eq!(sdu.text.text, "testmessage");
                }
                other => panic!("expected concatenated text SDU, got {other:?}"),
            },
            other => panic!("expected SDS-TRANSFER, got {other:?}"),
        }
    }

    #[test]
    fn parse_short_report_on_status_service() {
        let message =
            parse_incoming_message("+CTSDSR: 13,1234567,0,2345678,0,16", "7ACA").unwrap();
        assert!(matches!(message.payload, Payload::ShortReport(_)));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(parse_incoming_message("", "").is_err());
    }

    #[test]
    fn parse_rejects_short_pdu() {
        // 104 bits declared but only two bytes of PDU data.
        assert!(parse_incoming_message("+CTSDSR: 12,1234567,0,2345678,0,104", "0201").is_err());
    }

    #[test]
    fn parse_truncates_overlong_pdu() {
        // 16 bits declared; the trailing bytes are ignored.
        let message =
            parse_incoming_message("+CTSDSR: 13,1234567,0,2345678,0,16", "8004FFFF").unwrap();
        assert_eq!(message.payload, Payload::Status(Status(0x8004)));
    }

    #[test]
    fn parser_override_takes_precedence() {
        let mut parser = Parser::new();
        parser.set(ProtocolIdentifier::SIMPLE_TEXT_MESSAGING, |bytes: &[u8]| {
            Ok(Payload::SimpleText(SimpleTextMessage::new(
                false,
                TextEncoding::ISO8859_1,
                format!("intercepted {} bytes", bytes.len()),
            )))
        });

        let message = parser
            .parse_incoming_message("+CTSDSR: 12,1234567,0,2345678,0,16", "0201")
            .unwrap();
        match message.payload {
            Payload::SimpleText(text) => assert_eq!(text.text, "intercepted 2 bytes"),
            other => panic!("expected simple text message, got {other:?}"),
        }
    }

    #[test]
    fn parser_rejects_unregistered_protocol() {
        let parser = Parser::new();
        let result = parser.parse_incoming_message("+CTSDSR: 12,1234567,0,2345678,0,16", "4200");
        assert!(matches!(result, Err(Error::Unsupported(_))));
    }
}
