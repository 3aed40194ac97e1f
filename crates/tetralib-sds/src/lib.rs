//! tetralib-sds: SDS message handling through the PEI of a TETRA terminal.
//!
//! Implements the Short Data Service transport layer (SDS-TL) as defined in:
//!
//! - \[AI\]  ETSI TS 100 392-2 (Air Interface), chapters 14 and 29
//! - \[PEI\] ETSI EN 300 392-5 (Peripheral Equipment Interface)
//!
//! The crate is split into pure codec modules and one stateful reassembly
//! stack:
//!
//! - **Header parsing** ([`header`]) -- the `+CTSDSR:` unsolicited response
//!   announcing an incoming SDS.
//! - **PDU codec** ([`pdu`]) -- SDS-TRANSFER, SDS-REPORT, SDS-ACK and
//!   SDS-SHORT-REPORT, dispatched by protocol identifier and message type.
//! - **SDUs** ([`sdu`], [`callout`]) -- textual payloads, the concatenation
//!   user data header, concatenated SDS fragments, and callout alerts.
//! - **Text encodings** ([`text`]) -- the \[AI\] table 29.29 coding schemes
//!   with an ISO 8859-1 fallback for everything outside the supported subset.
//! - **Store and forward** ([`store_forward`]) -- validity periods and
//!   forward addresses (parse only; outbound store/forward is not supported).
//! - **Reassembly** ([`stack`]) -- stitches concatenated message parts back
//!   together and synthesizes receipt reports.
//! - **Command formatting** ([`commands`]) -- `AT+CMGS` and `AT+CTSDS`
//!   request strings for the outbound direction.
//!
//! Restrictions: store/forward control information on outbound messages and
//! end-to-end encrypted payloads are not supported.

pub mod callout;
pub mod commands;
pub mod header;
pub mod parser;
pub mod pdu;
pub mod sdu;
pub mod stack;
pub mod store_forward;
pub mod text;
pub mod timestamp;

mod charset;

pub use callout::CalloutAlert;
pub use commands::{
    request_max_message_pdu_bits, send_message, CRLF, CTRL_Z, SWITCH_TO_SDS_TL, SWITCH_TO_STATUS,
};
pub use header::{AiService, Header};
pub use parser::{parse_incoming_message, IncomingMessage, Parser};
pub use pdu::{
    parse_status, DeliveryReportRequest, DeliveryStatus, EncodePdu, MessageReference, Payload,
    PduBuffer, ProtocolIdentifier, SdsAcknowledge, SdsReport, SdsShortReport, SdsTransfer,
    ShortReportType, SimpleTextMessage, Status, UserData,
};
pub use sdu::{ConcatenatedSdsSdu, ConcatenatedTextSdu, ConcatenatedTextUdh, TextHeader, TextSdu, UdhElementId};
pub use stack::{Message, Stack, StatusMessage};
pub use store_forward::{ExternalSubscriberNumber, ForwardAddress, StoreForwardControl, ValidityPeriod};
pub use text::TextEncoding;
pub use timestamp::{Timeframe, Timestamp};
