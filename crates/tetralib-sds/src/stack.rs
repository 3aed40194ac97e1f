//! Reassembly of incoming SDS messages.
//!
//! The [`Stack`] accepts parsed incoming messages, stitches the parts of
//! concatenated messages back together keyed by their concatenation
//! reference, and hands completed messages, statuses, and synthesized
//! receipt responses to registered callbacks. Events without a registered
//! callback are dropped; nothing is buffered for late registration.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use tetralib_core::{Error, Identity, Result};

use crate::commands::{send_message, SWITCH_TO_SDS_TL};
use crate::parser::IncomingMessage;
use crate::pdu::{DeliveryStatus, Payload, SdsReport, SdsTransfer, Status, UserData};
use crate::text::{decode_payload_text, TextEncoding};
use crate::timestamp::Timestamp;

/// A (possibly still incomplete) reassembled message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: u32,
    pub source: Option<Identity>,
    pub destination: Identity,
    pub timestamp: Option<Timestamp>,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Part {
    valid: bool,
    text: String,
}

impl Message {
    pub fn new(
        id: u32,
        source: Option<Identity>,
        destination: Identity,
        timestamp: Option<Timestamp>,
        part_count: usize,
    ) -> Self {
        Message {
            id,
            source,
            destination,
            timestamp,
            parts: vec![Part::default(); part_count],
        }
    }

    /// Whether every part of this message has arrived.
    pub fn is_complete(&self) -> bool {
        self.parts.iter().all(|part| part.valid)
    }

    /// Number of parts this message consists of.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// The texts of the received parts, in order; `None` marks a part that
    /// has not arrived yet.
    pub fn texts(&self) -> Vec<Option<&str>> {
        self.parts
            .iter()
            .map(|part| part.valid.then_some(part.text.as_str()))
            .collect()
    }

    /// The message text: all received parts concatenated in order, with
    /// `...` marking interior gaps.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for part in &self.parts {
            if part.valid {
                result.push_str(&part.text);
            } else if !result.is_empty() {
                result.push_str("...");
            }
        }
        result
    }

    /// Store the text of part `sequence` (1-based). Out-of-range sequence
    /// numbers are ignored.
    pub fn set_part(&mut self, sequence: usize, text: impl Into<String>) {
        let Some(index) = sequence.checked_sub(1) else {
            return;
        };
        let Some(part) = self.parts.get_mut(index) else {
            return;
        };
        part.text = text.into();
        part.valid = true;
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message {:#x} from {} to {}:\n{}",
            self.id,
            self.source.as_ref().map(Identity::as_str).unwrap_or(""),
            self.destination,
            self.text()
        )
    }
}

/// A received pre-coded status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub source: Option<Identity>,
    pub destination: Identity,
    pub value: Status,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status {:#x} from {} to {}",
            self.value.0,
            self.source.as_ref().map(Identity::as_str).unwrap_or(""),
            self.destination
        )
    }
}

type MessageCallback = Box<dyn FnMut(Message) + Send>;
type StatusCallback = Box<dyn FnMut(StatusMessage) + Send>;
/// Receives outbound AT request strings the stack wants sent (e.g. receipt
/// reports).
type ResponseCallback = Box<dyn FnMut(Vec<String>) -> Result<()> + Send>;

/// The reassembly stack.
#[derive(Default)]
pub struct Stack {
    message_callback: Option<MessageCallback>,
    status_callback: Option<StatusCallback>,
    response_callback: Option<ResponseCallback>,
    pending_messages: HashMap<u32, Message>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback receiving completed messages.
    pub fn with_message_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Message) + Send + 'static,
    {
        self.message_callback = Some(Box::new(callback));
        self
    }

    /// Register the callback receiving status messages.
    pub fn with_status_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(StatusMessage) + Send + 'static,
    {
        self.status_callback = Some(Box::new(callback));
        self
    }

    /// Register the callback receiving synthesized outbound responses.
    pub fn with_response_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Vec<String>) -> Result<()> + Send + 'static,
    {
        self.response_callback = Some(Box::new(callback));
        self
    }

    /// Feed one incoming message into the stack.
    ///
    /// Unexpected payload variants and mismatched concatenation parts yield
    /// errors; pending state is never corrupted by a rejected part.
    pub fn put(&mut self, incoming: IncomingMessage) -> Result<()> {
        match incoming.payload {
            Payload::Status(value) => {
                let Some(callback) = &mut self.status_callback else {
                    debug!("incoming status dropped, no status callback");
                    return Ok(());
                };
                callback(StatusMessage {
                    source: incoming.header.source,
                    destination: incoming.header.destination,
                    value,
                });
                Ok(())
            }
            Payload::SimpleText(text) => {
                if self.message_callback.is_none() {
                    debug!("incoming simple text message dropped, no message callback");
                    return Ok(());
                }
                let mut message = Message::new(
                    0,
                    incoming.header.source,
                    incoming.header.destination,
                    None,
                    1,
                );
                message.set_part(1, text.text);
                self.emit(message);
                Ok(())
            }
            Payload::Transfer(transfer) => {
                self.put_transfer(incoming.header.source, incoming.header.destination, transfer)
            }
            other => Err(Error::Reassembly(format!(
                "unexpected payload variant: {other:?}"
            ))),
        }
    }

    fn put_transfer(
        &mut self,
        source: Option<Identity>,
        destination: Identity,
        transfer: SdsTransfer,
    ) -> Result<()> {
        let message = match &transfer.user_data {
            UserData::Text(sdu) => {
                let id = transfer.message_reference.0 as u32;
                let mut message = Message::new(
                    id,
                    source.clone(),
                    destination,
                    sdu.header.timestamp,
                    1,
                );
                message.set_part(1, sdu.text.clone());

                self.maybe_send_receipt_report(&transfer, source.as_ref());
                message
            }
            UserData::ConcatenatedText(sdu) => {
                let id = sdu.udh.message_reference as u32;
                let mut message = self.take_pending(
                    id,
                    &source,
                    &destination,
                    sdu.udh.total_number as usize,
                    sdu.text.header.timestamp,
                )?;
                message.set_part(sdu.udh.sequence_number as usize, sdu.text.text.clone());
                message
            }
            UserData::ConcatenatedSds(sdu) => {
                let id = sdu.reference as u32;
                let mut message = self.take_pending(
                    id,
                    &source,
                    &destination,
                    sdu.total_number as usize,
                    Some(Timestamp::now_utc()),
                )?;
                // The fragment payload is opaque; keep its bytes intact by
                // reading them as ISO 8859-1.
                message.set_part(
                    sdu.sequence_number as usize,
                    decode_payload_text(TextEncoding::ISO8859_1, &sdu.payload),
                );
                message
            }
            other => {
                return Err(Error::Reassembly(format!(
                    "unexpected SDS-TRANSFER SDU: {other:?}"
                )))
            }
        };

        if message.is_complete() {
            self.pending_messages.remove(&message.id);
            self.emit(message);
        } else {
            self.pending_messages.insert(message.id, message);
        }
        Ok(())
    }

    /// Take the pending message with the given id, or start a new one. A
    /// part whose source, destination, or part count does not match the
    /// pending message is rejected and the pending state kept.
    fn take_pending(
        &mut self,
        id: u32,
        source: &Option<Identity>,
        destination: &Identity,
        total: usize,
        timestamp: Option<Timestamp>,
    ) -> Result<Message> {
        match self.pending_messages.remove(&id) {
            None => Ok(Message::new(
                id,
                source.clone(),
                destination.clone(),
                timestamp,
                total,
            )),
            Some(pending) => {
                if &pending.source != source
                    || &pending.destination != destination
                    || pending.part_count() != total
                {
                    let error = Error::Reassembly(format!(
                        "part does not match message {:#x}: {:?} != {:?} | {} != {} | {} != {}",
                        id,
                        pending.source,
                        source,
                        pending.destination,
                        destination,
                        pending.part_count(),
                        total
                    ));
                    self.pending_messages.insert(id, pending);
                    return Err(error);
                }
                Ok(pending)
            }
        }
    }

    /// Synthesize the receipt report for a transfer that requested one.
    fn maybe_send_receipt_report(&mut self, transfer: &SdsTransfer, source: Option<&Identity>) {
        if !transfer.received_report_requested() {
            return;
        }
        let Some(callback) = &mut self.response_callback else {
            return;
        };
        let Some(source) = source else {
            debug!("receipt report requested but the header carries no source identity");
            return;
        };

        let report =
            SdsReport::for_transfer(transfer, false, DeliveryStatus::RECEIPT_ACK_BY_DESTINATION);
        let responses = vec![
            SWITCH_TO_SDS_TL.to_string(),
            send_message(source, &report),
        ];
        if let Err(e) = callback(responses) {
            warn!(error = %e, "receipt report response callback failed");
        }
    }

    fn emit(&mut self, message: Message) {
        if let Some(callback) = &mut self.message_callback {
            callback(message);
        } else {
            debug!(id = message.id, "complete message dropped, no message callback");
        }
    }
}
