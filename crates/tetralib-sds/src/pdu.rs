//! SDS-TL PDU types and codec, \[AI\] 29.4.
//!
//! A PDU's first byte is its protocol identifier; SDS-TL PDUs carry the
//! message type in the upper nibble of the second byte (TRANSFER, REPORT,
//! ACK). Parsers are total on well-formed input and return typed values;
//! encoders append to a [`PduBuffer`], threading the bit count needed for the
//! `AT+CMGS` length field.

use bytes::{BufMut, BytesMut};
use tracing::debug;

use tetralib_core::{Error, Result};

use crate::callout::CalloutAlert;
use crate::sdu::{ConcatenatedSdsSdu, ConcatenatedTextSdu, TextHeader, TextSdu};
use crate::store_forward::StoreForwardControl;
use crate::text::{decode_payload_text, encode_payload_text, TextEncoding};

/// Accumulator threaded through all PDU encoders: the encoded bytes plus
/// their bit count.
///
/// The bit count is informational (it feeds the `AT+CMGS` length field) and
/// equals `8 * len` for all supported payloads.
#[derive(Debug, Default)]
pub struct PduBuffer {
    bytes: BytesMut,
    bits: usize,
}

impl PduBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u8(&mut self, byte: u8) {
        self.bytes.put_u8(byte);
        self.bits += 8;
    }

    pub fn put_slice(&mut self, slice: &[u8]) {
        self.bytes.put_slice(slice);
        self.bits += slice.len() * 8;
    }

    /// Number of bits encoded so far.
    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

/// Anything that can append its wire form to a [`PduBuffer`].
pub trait EncodePdu {
    fn encode(&self, buf: &mut PduBuffer);
}

/// Protocol identifier, the first byte of every SDS PDU (\[AI\] 29.4.3.9,
/// table 29.21).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolIdentifier(pub u8);

impl ProtocolIdentifier {
    pub const SIMPLE_TEXT_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x02);
    pub const SIMPLE_IMMEDIATE_TEXT_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x09);
    pub const SIMPLE_CONCATENATED_SDS_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x0C);
    pub const TEXT_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x82);
    pub const IMMEDIATE_TEXT_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x89);
    pub const USER_DATA_HEADER_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x8A);
    pub const CONCATENATED_SDS_MESSAGING: ProtocolIdentifier = ProtocolIdentifier(0x8C);
    pub const CALLOUT: ProtocolIdentifier = ProtocolIdentifier(0xC3);
}

impl EncodePdu for ProtocolIdentifier {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_u8(self.0);
    }
}

/// Message reference, \[AI\] 29.4.3.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MessageReference(pub u8);

impl EncodePdu for MessageReference {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_u8(self.0);
    }
}

/// Delivery status, \[AI\] 29.4.3.2 and table 29.16.
///
/// The upper three bits classify the status: success, temporary error,
/// failed, flow control, end-to-end control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStatus(pub u8);

impl DeliveryStatus {
    // Success

    pub const RECEIPT_ACK_BY_DESTINATION: DeliveryStatus = DeliveryStatus(0x00);
    pub const RECEIPT_REPORT_ACK: DeliveryStatus = DeliveryStatus(0x01);
    pub const CONSUMED_BY_DESTINATION: DeliveryStatus = DeliveryStatus(0x02);
    pub const CONSUMED_REPORT_ACK: DeliveryStatus = DeliveryStatus(0x03);
    pub const MESSAGE_FORWARDED_TO_EXTERNAL_NETWORK: DeliveryStatus = DeliveryStatus(0x04);
    pub const SENT_TO_GROUP_ACK_PRESENTED: DeliveryStatus = DeliveryStatus(0x05);
    pub const CONCATENATION_PART_RECEIPT_ACK_BY_DESTINATION: DeliveryStatus = DeliveryStatus(0x06);

    // Temporary error

    pub const CONGESTION: DeliveryStatus = DeliveryStatus(0x20);
    pub const MESSAGE_STORED: DeliveryStatus = DeliveryStatus(0x21);
    pub const DESTINATION_NOT_REACHABLE_MESSAGE_STORED: DeliveryStatus = DeliveryStatus(0x22);

    // Data transfer failed

    pub const NETWORK_OVERLOAD: DeliveryStatus = DeliveryStatus(0x40);
    pub const SERVICE_PERMANENTLY_NOT_AVAILABLE: DeliveryStatus = DeliveryStatus(0x41);
    pub const SERVICE_TEMPORARY_NOT_AVAILABLE: DeliveryStatus = DeliveryStatus(0x42);
    pub const SOURCE_NOT_AUTHORIZED: DeliveryStatus = DeliveryStatus(0x43);
    pub const DESTINATION_NOT_AUTHORIZED: DeliveryStatus = DeliveryStatus(0x44);
    pub const UNKNOWN_DESTINATION_GATEWAY_SERVICE_ADDRESS: DeliveryStatus = DeliveryStatus(0x45);
    pub const UNKNOWN_FORWARD_ADDRESS: DeliveryStatus = DeliveryStatus(0x46);
    pub const GROUP_ADDRESS_WITH_INDIVIDUAL_SERVICE: DeliveryStatus = DeliveryStatus(0x47);
    pub const VALIDITY_PERIOD_EXPIRED_NOT_RECEIVED: DeliveryStatus = DeliveryStatus(0x48);
    pub const VALIDITY_PERIOD_EXPIRED_NOT_CONSUMED: DeliveryStatus = DeliveryStatus(0x49);
    pub const DELIVERY_FAILED: DeliveryStatus = DeliveryStatus(0x4A);
    pub const DESTINATION_NOT_REGISTERED: DeliveryStatus = DeliveryStatus(0x4B);
    pub const DESTINATION_QUEUE_FULL: DeliveryStatus = DeliveryStatus(0x4C);
    pub const MESSAGE_TOO_LONG: DeliveryStatus = DeliveryStatus(0x4D);
    pub const DESTINATION_DOES_NOT_SUPPORT_SDS_TL: DeliveryStatus = DeliveryStatus(0x4E);
    pub const DESTINATION_HOST_NOT_CONNECTED: DeliveryStatus = DeliveryStatus(0x4F);
    pub const PROTOCOL_NOT_SUPPORTED: DeliveryStatus = DeliveryStatus(0x50);
    pub const DATA_CODING_SCHEME_NOT_SUPPORTED: DeliveryStatus = DeliveryStatus(0x51);
    pub const DESTINATION_MEMORY_FULL_MESSAGE_DISCARDED: DeliveryStatus = DeliveryStatus(0x52);
    pub const DESTINATION_NOT_ACCEPTING_SDS: DeliveryStatus = DeliveryStatus(0x53);
    pub const CONCATENATED_MESSAGE_TOO_LONG: DeliveryStatus = DeliveryStatus(0x54);
    pub const DESTINATION_ADDRESS_PROHIBITED: DeliveryStatus = DeliveryStatus(0x56);
    pub const CANNOT_ROUTE_TO_EXTERNAL_NETWORK: DeliveryStatus = DeliveryStatus(0x57);
    pub const UNKNOWN_EXTERNAL_SUBSCRIBER_NUMBER: DeliveryStatus = DeliveryStatus(0x58);
    pub const NEGATIVE_REPORT_ACKNOWLEDGEMENT: DeliveryStatus = DeliveryStatus(0x59);
    pub const DESTINATION_NOT_REACHABLE: DeliveryStatus = DeliveryStatus(0x5A);
    pub const TEXT_DISTRIBUTION_ERROR: DeliveryStatus = DeliveryStatus(0x5B);
    pub const CORRUPT_INFORMATION_ELEMENT: DeliveryStatus = DeliveryStatus(0x5C);
    pub const NOT_ALL_CONCATENATION_PARTS_RECEIVED: DeliveryStatus = DeliveryStatus(0x5D);
    pub const DESTINATION_ENGAGED_IN_ANOTHER_SERVICE_BY_SWMI: DeliveryStatus = DeliveryStatus(0x5E);
    pub const DESTINATION_ENGAGED_IN_ANOTHER_SERVICE_BY_DESTINATION: DeliveryStatus =
        DeliveryStatus(0x5F);

    // Flow control

    pub const DESTINATION_MEMORY_FULL: DeliveryStatus = DeliveryStatus(0x60);
    pub const DESTINATION_MEMORY_AVAILABLE: DeliveryStatus = DeliveryStatus(0x61);
    pub const START_PENDING_MESSAGES: DeliveryStatus = DeliveryStatus(0x62);
    pub const NO_PENDING_MESSAGES: DeliveryStatus = DeliveryStatus(0x63);

    // End-to-end control

    pub const STOP_SENDING: DeliveryStatus = DeliveryStatus(0x80);
    pub const START_SENDING: DeliveryStatus = DeliveryStatus(0x81);

    /// Whether this status reports a success.
    pub fn is_success(self) -> bool {
        self.0 & 0xE0 == 0x00
    }

    /// Whether this status reports a temporary error.
    pub fn is_temporary_error(self) -> bool {
        self.0 & 0xE0 == 0x20
    }

    /// Whether this status reports a failed data transfer.
    pub fn is_delivery_failed(self) -> bool {
        self.0 & 0xE0 == 0x40
    }

    /// Whether this status carries flow control information.
    pub fn is_flow_control(self) -> bool {
        self.0 & 0xE0 == 0x60
    }

    /// Whether this status carries end-to-end control information.
    pub fn is_end_to_end_control(self) -> bool {
        self.0 & 0xE0 == 0x80
    }
}

impl EncodePdu for DeliveryStatus {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_u8(self.0);
    }
}

/// Delivery report request, \[AI\] 29.4.3.3 and table 29.17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryReportRequest {
    #[default]
    None,
    Received,
    Consumed,
    ReceivedAndConsumed,
}

impl DeliveryReportRequest {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => DeliveryReportRequest::None,
            1 => DeliveryReportRequest::Received,
            2 => DeliveryReportRequest::Consumed,
            _ => DeliveryReportRequest::ReceivedAndConsumed,
        }
    }

    fn bits(self) -> u8 {
        match self {
            DeliveryReportRequest::None => 0,
            DeliveryReportRequest::Received => 1,
            DeliveryReportRequest::Consumed => 2,
            DeliveryReportRequest::ReceivedAndConsumed => 3,
        }
    }
}

/// Short report type, \[AI\] 29.4.3.10 and table 29.22.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortReportType {
    ProtocolOrEncodingNotSupported,
    DestinationMemoryFull,
    MessageReceived,
    MessageConsumed,
}

impl ShortReportType {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => ShortReportType::ProtocolOrEncodingNotSupported,
            1 => ShortReportType::DestinationMemoryFull,
            2 => ShortReportType::MessageReceived,
            _ => ShortReportType::MessageConsumed,
        }
    }

    fn bits(self) -> u8 {
        match self {
            ShortReportType::ProtocolOrEncodingNotSupported => 0,
            ShortReportType::DestinationMemoryFull => 1,
            ShortReportType::MessageReceived => 2,
            ShortReportType::MessageConsumed => 3,
        }
    }
}

/// A pre-coded status, \[AI\] 14.8.34.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub u16);

impl Status {
    pub const STATUS_0: Status = Status(0x8002);
    pub const STATUS_1: Status = Status(0x8003);
    pub const STATUS_2: Status = Status(0x8004);
    pub const STATUS_3: Status = Status(0x8005);
    pub const STATUS_4: Status = Status(0x8006);
    pub const STATUS_5: Status = Status(0x8007);
    pub const STATUS_6: Status = Status(0x8008);
    pub const STATUS_7: Status = Status(0x8009);
    pub const STATUS_8: Status = Status(0x800A);
    pub const STATUS_9: Status = Status(0x800B);

    /// This status as its two-byte big-endian wire form.
    pub fn bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl EncodePdu for Status {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_slice(&self.bytes());
    }
}

/// The payload of an incoming SDS, discriminated by PDU dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Status(Status),
    SimpleText(SimpleTextMessage),
    Transfer(SdsTransfer),
    Report(SdsReport),
    Acknowledge(SdsAcknowledge),
    ShortReport(SdsShortReport),
}

/// The service data unit carried inside an SDS-TRANSFER PDU.
#[derive(Debug, Clone, PartialEq)]
pub enum UserData {
    Text(TextSdu),
    ConcatenatedText(ConcatenatedTextSdu),
    ConcatenatedSds(ConcatenatedSdsSdu),
    CalloutAlert(CalloutAlert),
    Opaque(Vec<u8>),
}

impl EncodePdu for UserData {
    fn encode(&self, buf: &mut PduBuffer) {
        match self {
            UserData::Text(sdu) => sdu.encode(buf),
            UserData::ConcatenatedText(sdu) => sdu.encode(buf),
            UserData::ConcatenatedSds(sdu) => sdu.encode(buf),
            UserData::CalloutAlert(alert) => alert.encode(buf),
            UserData::Opaque(bytes) => buf.put_slice(bytes),
        }
    }
}

/// Parse an SDS-TL PDU, dispatching on the protocol identifier.
///
/// PIDs 0x8C (concatenated SDS) and 0xC3 (callout) only ever carry
/// SDS-TRANSFER messages; a non-zero message type in their second byte is
/// rejected instead of being mis-parsed as a report.
pub fn parse_sds_tl_pdu(bytes: &[u8]) -> Result<Payload> {
    if bytes.is_empty() {
        return Err(Error::Parse("empty payload".to_string()));
    }

    match ProtocolIdentifier(bytes[0]) {
        ProtocolIdentifier::SIMPLE_TEXT_MESSAGING
        | ProtocolIdentifier::SIMPLE_IMMEDIATE_TEXT_MESSAGING => {
            Ok(Payload::SimpleText(SimpleTextMessage::parse(bytes)?))
        }
        ProtocolIdentifier::TEXT_MESSAGING
        | ProtocolIdentifier::IMMEDIATE_TEXT_MESSAGING
        | ProtocolIdentifier::USER_DATA_HEADER_MESSAGING => parse_sds_tl_message(bytes),
        ProtocolIdentifier::CONCATENATED_SDS_MESSAGING | ProtocolIdentifier::CALLOUT => {
            parse_transfer_only(bytes)
        }
        pid => Err(Error::Unsupported(format!(
            "protocol {:#04x} is not supported",
            pid.0
        ))),
    }
}

/// Dispatch an SDS-TL PDU on the message type nibble.
pub fn parse_sds_tl_message(bytes: &[u8]) -> Result<Payload> {
    if bytes.len() < 2 {
        return Err(Error::Parse(format!("payload too short: {}", bytes.len())));
    }

    match bytes[1] >> 4 {
        0 => Ok(Payload::Transfer(SdsTransfer::parse(bytes)?)),
        1 => Ok(Payload::Report(SdsReport::parse(bytes)?)),
        2 => Ok(Payload::Acknowledge(SdsAcknowledge::parse(bytes)?)),
        message_type => Err(Error::Unsupported(format!(
            "SDS-TL message type {message_type:#x} is not supported"
        ))),
    }
}

fn parse_transfer_only(bytes: &[u8]) -> Result<Payload> {
    if bytes.len() < 2 {
        return Err(Error::Parse(format!("payload too short: {}", bytes.len())));
    }

    match bytes[1] >> 4 {
        0 => Ok(Payload::Transfer(SdsTransfer::parse(bytes)?)),
        message_type => Err(Error::Unsupported(format!(
            "protocol {:#04x} only carries SDS-TRANSFER, got message type {message_type:#x}",
            bytes[0]
        ))),
    }
}

/// Parse a status-service PDU: a two-byte pre-coded status, or an
/// SDS-SHORT-REPORT when the short-report identifier bits are set.
pub fn parse_status(bytes: &[u8]) -> Result<Payload> {
    if bytes.len() < 2 {
        return Err(Error::Parse(format!("status value too short: {bytes:02X?}")));
    }

    if bytes[0] & SDS_SHORT_REPORT_PDU_IDENTIFIER == SDS_SHORT_REPORT_PDU_IDENTIFIER {
        return Ok(Payload::ShortReport(SdsShortReport::parse(bytes)?));
    }

    Ok(Payload::Status(Status(u16::from_be_bytes([
        bytes[0], bytes[1],
    ]))))
}

/// A simple (non-SDS-TL) text message, \[AI\] 29.5.2.3.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTextMessage {
    pub protocol: ProtocolIdentifier,
    pub encoding: TextEncoding,
    pub text: String,
}

impl SimpleTextMessage {
    pub fn new(immediate: bool, encoding: TextEncoding, text: impl Into<String>) -> Self {
        let protocol = if immediate {
            ProtocolIdentifier::SIMPLE_IMMEDIATE_TEXT_MESSAGING
        } else {
            ProtocolIdentifier::SIMPLE_TEXT_MESSAGING
        };
        SimpleTextMessage {
            protocol,
            encoding,
            text: text.into(),
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 2 {
            return Err(Error::Parse(format!(
                "simple text message PDU too short: {}",
                bytes.len()
            )));
        }

        let encoding = TextEncoding(bytes[1] & 0x7F);
        Ok(SimpleTextMessage {
            protocol: ProtocolIdentifier(bytes[0]),
            encoding,
            text: decode_payload_text(encoding, &bytes[2..]),
        })
    }

    /// Whether this message should be displayed immediately by the terminal
    /// equipment.
    pub fn immediate(&self) -> bool {
        self.protocol == ProtocolIdentifier::SIMPLE_IMMEDIATE_TEXT_MESSAGING
    }
}

impl EncodePdu for SimpleTextMessage {
    fn encode(&self, buf: &mut PduBuffer) {
        self.protocol.encode(buf);
        buf.put_u8(self.encoding.0);
        encode_payload_text(buf, &self.text, self.encoding);
    }
}

/// The SDS-TRANSFER PDU, \[AI\] 29.4.2.4.
#[derive(Debug, Clone, PartialEq)]
pub struct SdsTransfer {
    pub protocol: ProtocolIdentifier,
    pub delivery_report_request: DeliveryReportRequest,
    /// Service selection / short form report flag. A zero bit on the wire
    /// means short-form reports are in use.
    pub short_form_report: bool,
    pub message_reference: MessageReference,
    pub store_forward_control: Option<StoreForwardControl>,
    pub user_data: UserData,
}

impl SdsTransfer {
    /// A new SDS-TRANSFER carrying a plain text message.
    pub fn text_message(
        message_reference: MessageReference,
        immediate: bool,
        delivery_report: DeliveryReportRequest,
        encoding: TextEncoding,
        text: impl Into<String>,
    ) -> Self {
        let protocol = if immediate {
            ProtocolIdentifier::IMMEDIATE_TEXT_MESSAGING
        } else {
            ProtocolIdentifier::TEXT_MESSAGING
        };
        SdsTransfer {
            protocol,
            delivery_report_request: delivery_report,
            short_form_report: false,
            message_reference,
            store_forward_control: None,
            user_data: UserData::Text(TextSdu {
                header: TextHeader {
                    encoding,
                    timestamp: None,
                },
                text: text.into(),
            }),
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::Parse(format!(
                "SDS-TRANSFER PDU too short: {}",
                bytes.len()
            )));
        }

        let protocol = ProtocolIdentifier(bytes[0]);
        let delivery_report_request = DeliveryReportRequest::from_bits((bytes[1] & 0x0C) >> 2);
        let short_form_report = bytes[1] & 0x02 == 0;
        let has_store_forward = bytes[1] & 0x01 != 0;
        let message_reference = MessageReference(bytes[2]);

        let mut user_data_start = 3;
        let store_forward_control = if has_store_forward {
            let sfc = StoreForwardControl::parse(&bytes[3..])?;
            user_data_start += sfc.encoded_len();
            Some(sfc)
        } else {
            None
        };

        let sdu_bytes = bytes.get(user_data_start..).ok_or_else(|| {
            Error::Parse(format!(
                "SDS-TRANSFER PDU too short for its user data: {}",
                bytes.len()
            ))
        })?;

        let user_data = match protocol {
            ProtocolIdentifier::TEXT_MESSAGING | ProtocolIdentifier::IMMEDIATE_TEXT_MESSAGING => {
                UserData::Text(TextSdu::parse(sdu_bytes)?)
            }
            ProtocolIdentifier::USER_DATA_HEADER_MESSAGING => {
                UserData::ConcatenatedText(ConcatenatedTextSdu::parse(sdu_bytes)?)
            }
            ProtocolIdentifier::CONCATENATED_SDS_MESSAGING => {
                UserData::ConcatenatedSds(ConcatenatedSdsSdu::parse(sdu_bytes)?)
            }
            ProtocolIdentifier::CALLOUT => UserData::CalloutAlert(CalloutAlert::parse(sdu_bytes)?),
            pid => {
                return Err(Error::Unsupported(format!(
                    "protocol {:#04x} is not supported as SDS-TRANSFER content",
                    pid.0
                )))
            }
        };

        Ok(SdsTransfer {
            protocol,
            delivery_report_request,
            short_form_report,
            message_reference,
            store_forward_control,
            user_data,
        })
    }

    /// Whether the sender requested a report upon receipt.
    pub fn received_report_requested(&self) -> bool {
        matches!(
            self.delivery_report_request,
            DeliveryReportRequest::Received | DeliveryReportRequest::ReceivedAndConsumed
        )
    }

    /// Whether the sender requested a report upon consumption.
    pub fn consumed_report_requested(&self) -> bool {
        matches!(
            self.delivery_report_request,
            DeliveryReportRequest::Consumed | DeliveryReportRequest::ReceivedAndConsumed
        )
    }

    /// Whether this message should be displayed immediately by the terminal
    /// equipment.
    pub fn immediate(&self) -> bool {
        self.protocol == ProtocolIdentifier::IMMEDIATE_TEXT_MESSAGING
    }
}

impl EncodePdu for SdsTransfer {
    fn encode(&self, buf: &mut PduBuffer) {
        self.protocol.encode(buf);

        // Message type 0 in the upper nibble; store/forward control is not
        // encoded on the outbound path.
        let mut byte1 = self.delivery_report_request.bits() << 2;
        if !self.short_form_report {
            byte1 |= 0x02;
        }
        buf.put_u8(byte1);

        self.message_reference.encode(buf);
        self.user_data.encode(buf);
    }
}

/// The SDS-REPORT PDU, \[AI\] 29.4.2.2.
#[derive(Debug, Clone, PartialEq)]
pub struct SdsReport {
    pub protocol: ProtocolIdentifier,
    pub ack_required: bool,
    pub delivery_status: DeliveryStatus,
    pub message_reference: MessageReference,
    pub store_forward_control: Option<StoreForwardControl>,
    pub user_data: Vec<u8>,
}

impl SdsReport {
    /// A new SDS-REPORT answering the given SDS-TRANSFER, without
    /// store/forward control information.
    pub fn for_transfer(
        transfer: &SdsTransfer,
        ack_required: bool,
        delivery_status: DeliveryStatus,
    ) -> Self {
        SdsReport {
            protocol: transfer.protocol,
            ack_required,
            delivery_status,
            message_reference: transfer.message_reference,
            store_forward_control: None,
            user_data: Vec::new(),
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::Parse(format!(
                "SDS-REPORT PDU too short: {}",
                bytes.len()
            )));
        }

        let ack_required = bytes[1] & 0x08 != 0;
        let has_store_forward = bytes[1] & 0x01 != 0;

        let mut user_data_start = 4;
        let store_forward_control = if has_store_forward {
            let sfc = StoreForwardControl::parse(&bytes[4..])?;
            user_data_start += sfc.encoded_len();
            Some(sfc)
        } else {
            None
        };

        let user_data = bytes.get(user_data_start..).unwrap_or_default().to_vec();

        Ok(SdsReport {
            protocol: ProtocolIdentifier(bytes[0]),
            ack_required,
            delivery_status: DeliveryStatus(bytes[2]),
            message_reference: MessageReference(bytes[3]),
            store_forward_control,
            user_data,
        })
    }
}

impl EncodePdu for SdsReport {
    fn encode(&self, buf: &mut PduBuffer) {
        self.protocol.encode(buf);

        let mut byte1 = 1u8 << 4;
        if self.ack_required {
            byte1 |= 0x08;
        }
        buf.put_u8(byte1);

        self.delivery_status.encode(buf);
        self.message_reference.encode(buf);
    }
}

/// The SDS-ACK PDU, \[AI\] 29.4.2.1.
#[derive(Debug, Clone, PartialEq)]
pub struct SdsAcknowledge {
    pub protocol: ProtocolIdentifier,
    pub delivery_status: DeliveryStatus,
    pub message_reference: MessageReference,
}

impl SdsAcknowledge {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::Parse(format!(
                "SDS-ACK PDU too short: {}",
                bytes.len()
            )));
        }

        Ok(SdsAcknowledge {
            protocol: ProtocolIdentifier(bytes[0]),
            delivery_status: DeliveryStatus(bytes[2]),
            message_reference: MessageReference(bytes[3]),
        })
    }
}

/// PDU identifier bits marking an SDS-SHORT-REPORT.
pub const SDS_SHORT_REPORT_PDU_IDENTIFIER: u8 = 0x7A;

/// The SDS-SHORT-REPORT PDU, \[AI\] 29.4.2.3.
#[derive(Debug, Clone, PartialEq)]
pub struct SdsShortReport {
    pub report_type: ShortReportType,
    pub message_reference: MessageReference,
}

impl SdsShortReport {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 {
            return Err(Error::Parse(format!(
                "SDS-SHORT-REPORT PDU invalid length {}",
                bytes.len()
            )));
        }
        if bytes[0] & SDS_SHORT_REPORT_PDU_IDENTIFIER != SDS_SHORT_REPORT_PDU_IDENTIFIER {
            return Err(Error::Parse(format!(
                "SDS-SHORT-REPORT PDU invalid identifier {:#04x}",
                bytes[0] & SDS_SHORT_REPORT_PDU_IDENTIFIER
            )));
        }

        Ok(SdsShortReport {
            report_type: ShortReportType::from_bits(bytes[0] & 0x03),
            message_reference: MessageReference(bytes[1]),
        })
    }
}

impl EncodePdu for SdsShortReport {
    fn encode(&self, buf: &mut PduBuffer) {
        buf.put_u8(0x7C | self.report_type.bits());
        self.message_reference.encode(buf);
    }
}

/// Log-and-describe helper used by the incoming message parsers.
pub(crate) fn describe_unsupported(pid: u8) -> Error {
    debug!(pid, "no SDS payload parser for protocol");
    Error::Unsupported(format!("no SDS payload parser registered for protocol {pid:#04x}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetralib_core::hex_to_binary;

    fn encode_all(values: &[&dyn EncodePdu]) -> (Vec<u8>, usize) {
        let mut buf = PduBuffer::new();
        for value in values {
            value.encode(&mut buf);
        }
        let bits = buf.bits();
        (buf.into_vec(), bits)
    }

    #[test]
    fn parse_text_message_transfer_without_timestamp() {
        let bytes = hex_to_binary("82029C01746573746D657373616765").unwrap();
        let payload = parse_sds_tl_pdu(&bytes).unwrap();

        match payload {
            Payload::Transfer(transfer) => {
                assert_eq!(transfer.protocol, ProtocolIdentifier::TEXT_MESSAGING);
                assert_eq!(transfer.message_reference, MessageReference(0x9C));
                assert_eq!(
                    transfer.delivery_report_request,
                    DeliveryReportRequest::None
                );
                assert!(transfer.store_forward_control.is_none());
                assert!(!transfer.immediate());
                match transfer.user_data {
                    UserData::Text(sdu) => {
                        assert_eq!(sdu.header.encoding, TextEncoding::ISO8859_1);
                        assert!(sdu.header.timestamp.is_none());
                        assert_eq!(sdu.text, "testmessage");
                    }
                    other => panic!("expected text SDU, got {other:?}"),
                }
            }
            other => panic!("expected SDS-TRANSFER, got {other:?}"),
        }
    }

    #[test]
    fn parse_immediate_text_message_transfer() {
        let bytes = hex_to_binary("89029C01746573746D657373616765").unwrap();
        match parse_sds_tl_pdu(&bytes).unwrap() {
            Payload::Transfer(transfer) => assert!(transfer.immediate()),
            other => panic!("expected SDS-TRANSFER, got {other:?}"),
        }
    }

    #[test]
    fn parse_transfer_with_store_forward_to_ssi() {
        let bytes = hex_to_binary("82039C5101020301746573746D657373616765").unwrap();
        match parse_sds_tl_pdu(&bytes).unwrap() {
            Payload::Transfer(transfer) => {
                let sfc = transfer.store_forward_control.expect("store/forward control");
                assert_eq!(
                    sfc.forward_address,
                    crate::store_forward::ForwardAddress::Ssi([1, 2, 3])
                );
                match transfer.user_data {
                    UserData::Text(sdu) => assert_eq!(sdu.text, "testmessage"),
                    other => panic!("expected text SDU, got {other:?}"),
                }
            }
            other => panic!("expected SDS-TRANSFER, got {other:?}"),
        }
    }

    #[test]
    fn parse_transfer_with_timestamp() {
        let bytes = hex_to_binary("82029C81045A8F746573746D657373616765").unwrap();
        match parse_sds_tl_pdu(&bytes).unwrap() {
            Payload::Transfer(transfer) => match transfer.user_data {
                UserData::Text(sdu) => {
                    let stamp = sdu.header.timestamp.expect("timestamp");
                    assert_eq!(u8::from(stamp.datetime.month()), 4);
                    assert_eq!(stamp.datetime.day(), 11);
                    assert_eq!(stamp.datetime.hour(), 10);
                    assert_eq!(stamp.datetime.minute(), 15);
                    assert_eq!(sdu.text, "testmessage");
                }
                other => panic!("expected text SDU, got {other:?}"),
            },
            other => panic!("expected SDS-TRANSFER, got {other:?}"),
        }
    }

    #[test]
    fn parse_report() {
        let bytes = hex_to_binary("821800CA").unwrap();
        match parse_sds_tl_pdu(&bytes).unwrap() {
            Payload::Report(report) => {
                assert!(report.ack_required);
                assert_eq!(
                    report.delivery_status,
                    DeliveryStatus::RECEIPT_ACK_BY_DESTINATION
                );
                assert_eq!(report.message_reference, MessageReference(0xCA));
            }
            other => panic!("expected SDS-REPORT, got {other:?}"),
        }
    }

    #[test]
    fn parse_acknowledge() {
        let bytes = hex_to_binary("822001C9").unwrap();
        match parse_sds_tl_pdu(&bytes).unwrap() {
            Payload::Acknowledge(ack) => {
                assert_eq!(ack.delivery_status, DeliveryStatus::RECEIPT_REPORT_ACK);
                assert_eq!(ack.message_reference, MessageReference(0xC9));
            }
            other => panic!("expected SDS-ACK, got {other:?}"),
        }
    }

    #[test]
    fn parse_status_value() {
        match parse_status(&[0x80, 0x04]).unwrap() {
            Payload::Status(status) => assert_eq!(status, Status::STATUS_2),
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn parse_status_short_report() {
        match parse_status(&[0x7A, 0xCA]).unwrap() {
            Payload::ShortReport(report) => {
                assert_eq!(report.report_type, ShortReportType::MessageReceived);
                assert_eq!(report.message_reference, MessageReference(0xCA));
            }
            other => panic!("expected short report, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_unknown_protocol() {
        assert!(matches!(
            parse_sds_tl_pdu(&[0x42, 0x00, 0x00, 0x00]),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn parse_rejects_report_on_transfer_only_protocols() {
        // A concatenated-SDS PDU whose message type nibble claims REPORT.
        assert!(matches!(
            parse_sds_tl_pdu(&[0x8C, 0x10, 0x00, 0xC9]),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            parse_sds_tl_pdu(&[0xC3, 0x20, 0x00, 0xC9]),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn parse_empty_payload_is_an_error() {
        assert!(parse_sds_tl_pdu(&[]).is_err());
    }

    #[test]
    fn delivery_status_classification() {
        assert!(DeliveryStatus::RECEIPT_ACK_BY_DESTINATION.is_success());
        assert!(DeliveryStatus::CONGESTION.is_temporary_error());
        assert!(DeliveryStatus::DELIVERY_FAILED.is_delivery_failed());
        assert!(DeliveryStatus::DESTINATION_MEMORY_FULL.is_flow_control());
        assert!(DeliveryStatus::STOP_SENDING.is_end_to_end_control());
        assert!(!DeliveryStatus::STOP_SENDING.is_success());
    }

    #[test]
    fn status_bytes_are_big_endian() {
        assert_eq!(Status::STATUS_2.bytes(), [0x80, 0x04]);
    }

    #[test]
    fn encode_single_entities() {
        let (bytes, bits) = encode_all(&[
            &ProtocolIdentifier::SIMPLE_TEXT_MESSAGING,
            &DeliveryStatus::CONSUMED_REPORT_ACK,
        ]);
        assert_eq!(bytes, vec![0x02, 0x03]);
        assert_eq!(bits, 16);
    }

    #[test]
    fn encode_report() {
        let report = SdsReport {
            protocol: ProtocolIdentifier::TEXT_MESSAGING,
            ack_required: true,
            delivery_status: DeliveryStatus::RECEIPT_ACK_BY_DESTINATION,
            message_reference: MessageReference(0xCA),
            store_forward_control: None,
            user_data: Vec::new(),
        };
        let (bytes, bits) = encode_all(&[&report]);
        assert_eq!(bytes, vec![0x82, 0x18, 0x00, 0xCA]);
        assert_eq!(bits, 32);
    }

    #[test]
    fn encode_simple_text_message() {
        let message =
            SimpleTextMessage::new(false, TextEncoding::ISO8859_1, "testmessage");
        let (bytes, bits) = encode_all(&[&message]);
        assert_eq!(
            bytes,
            hex_to_binary("0201746573746D657373616765").unwrap()
        );
        assert_eq!(bits, 104);
    }

    #[test]
    fn encode_short_report() {
        let report = SdsShortReport {
            report_type: ShortReportType::MessageReceived,
            message_reference: MessageReference(0xCA),
        };
        let (bytes, _) = encode_all(&[&report]);
        assert_eq!(bytes, vec![0x7E, 0xCA]);
    }

    #[test]
    fn encode_transfer_with_delivery_report_request() {
        use crate::timestamp::{Timeframe, Timestamp};
        use time::macros::datetime;

        let transfer = SdsTransfer {
            protocol: ProtocolIdentifier::TEXT_MESSAGING,
            delivery_report_request: DeliveryReportRequest::Received,
            short_form_report: false,
            message_reference: MessageReference(0xC9),
            store_forward_control: None,
            user_data: UserData::Text(TextSdu {
                header: TextHeader {
                    encoding: TextEncoding::ISO8859_1,
                    timestamp: Some(Timestamp {
                        timeframe: Timeframe::Utc,
                        datetime: datetime!(2021-04-11 8:15),
                    }),
                },
                text: "testmessage".to_string(),
            }),
        };
        let (bytes, bits) = encode_all(&[&transfer]);
        assert_eq!(
            bytes,
            vec![
                0x82, 0x06, 0xC9, 0x81, 0x44, 0x5A, 0x0F, 0x74, 0x65, 0x73, 0x74, 0x6D, 0x65,
                0x73, 0x73, 0x61, 0x67, 0x65
            ]
        );
        assert_eq!(bits, 144);
    }

    #[test]
    fn text_message_constructor_round_trips() {
        let transfer = SdsTransfer::text_message(
            MessageReference(0x42),
            false,
            DeliveryReportRequest::None,
            TextEncoding::ISO8859_1,
            "hello",
        );
        let mut buf = PduBuffer::new();
        transfer.encode(&mut buf);
        match parse_sds_tl_pdu(buf.as_slice()).unwrap() {
            Payload::Transfer(parsed) => assert_eq!(parsed, transfer),
            other => panic!("expected SDS-TRANSFER, got {other:?}"),
        }
    }
}
