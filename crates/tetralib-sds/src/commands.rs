//! Outbound AT command formatting for the SDS service, \[PEI\] 6.13/6.14.

use tokio_util::sync::CancellationToken;

use tetralib_core::{binary_to_hex, Error, Identity, Requester, Result};

use crate::pdu::{EncodePdu, PduBuffer};

/// CRLF line ending for AT commands.
pub const CRLF: &str = "\x0d\x0a";
/// Ctrl-Z terminator for PDU payloads.
pub const CTRL_Z: &str = "\x1a";

/// Select the SDS-TL AI service with ISSI addressing and E2EE, \[PEI\] 6.14.6.
pub const SWITCH_TO_SDS_TL: &str = "AT+CTSDS=12,0,0,0,1";
/// Select the status AI service with ISSI addressing, \[PEI\] 6.14.6.
pub const SWITCH_TO_STATUS: &str = "AT+CTSDS=13,0";

/// Format the `AT+CMGS` request sending the given PDU to `destination`,
/// \[PEI\] 6.13.2.
///
/// The request embeds its own framing: CRLF between the command line and the
/// hex PDU, ctrl-Z after it. The AT channel writes such requests verbatim.
pub fn send_message(destination: &Identity, message: &dyn EncodePdu) -> String {
    let mut pdu = PduBuffer::new();
    message.encode(&mut pdu);
    format!(
        "AT+CMGS={},{}{}{}{}",
        destination,
        pdu.bits(),
        CRLF,
        binary_to_hex(pdu.as_slice()),
        CTRL_Z
    )
}

/// Ask the terminal how many bits a message PDU may have, \[PEI\] 6.13.2.
///
/// Issues `AT+CMGS=?` and extracts the upper bound of the final
/// parenthesised range in the response, e.g. `1184` from
/// `+CMGS: (...),(8-1184)`.
pub async fn request_max_message_pdu_bits(
    token: &CancellationToken,
    requester: &dyn Requester,
) -> Result<usize> {
    let responses = requester.request(token, "AT+CMGS=?").await?;
    let first = responses
        .first()
        .ok_or_else(|| Error::Parse("no response received".to_string()))?;

    parse_max_pdu_bits(first)
        .ok_or_else(|| Error::Parse(format!("unexpected response: {first}")))
}

fn parse_max_pdu_bits(line: &str) -> Option<usize> {
    let response = line.trim().to_uppercase();
    let body = response.strip_prefix("+CMGS: ")?;
    let body = body.strip_suffix(')')?;
    let open = body.rfind('(')?;
    if open == 0 {
        // The range list must follow at least one describing field.
        return None;
    }
    let (min_part, max_part) = body[open + 1..].split_once('-')?;
    if !min_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    max_part.parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{DeliveryStatus, MessageReference, SdsReport, ProtocolIdentifier};

    #[test]
    fn send_message_formats_cmgs_with_embedded_framing() {
        let report = SdsReport {
            protocol: ProtocolIdentifier::TEXT_MESSAGING,
            ack_required: false,
            delivery_status: DeliveryStatus::RECEIPT_ACK_BY_DESTINATION,
            message_reference: MessageReference(0xC9),
            store_forward_control: None,
            user_data: Vec::new(),
        };

        assert_eq!(
            send_message(&Identity::from("1234567"), &report),
            "AT+CMGS=1234567,32\r\n821000C9\x1a"
        );
    }

    #[tokio::test]
    async fn max_pdu_bits_happy_path() {
        let requester = tetralib_core::RequesterFn(|request: String| async move {
            assert_eq!(request, "AT+CMGS=?");
            Ok(vec![
                "+CMGS: (0-16777214,00000001-10231638316777214,1-255,0-999999999999999999999999),(8-1184)"
                    .to_string(),
                String::new(),
                "OK".to_string(),
            ])
        });

        let token = CancellationToken::new();
        let bits = request_max_message_pdu_bits(&token, &requester)
            .await
            .unwrap();
        assert_eq!(bits, 1184);
    }

    #[tokio::test]
    async fn max_pdu_bits_empty_response_is_an_error() {
        let requester =
            tetralib_core::RequesterFn(|_request: String| async move { Ok(Vec::<String>::new()) });
        let token = CancellationToken::new();
        assert!(request_max_message_pdu_bits(&token, &requester)
            .await
            .is_err());
    }

    #[test]
    fn parse_max_pdu_bits_variants() {
        assert_eq!(parse_max_pdu_bits("+CMGS: .+(8-1184)"), Some(1184));
        assert_eq!(parse_max_pdu_bits("+CMGS: (8-1184)"), None);
        assert_eq!(parse_max_pdu_bits("+CMGS: x(8-)"), None);
        assert_eq!(parse_max_pdu_bits("ERROR"), None);
        assert_eq!(parse_max_pdu_bits("+CMGS: x(a-12)"), None);
    }
}
