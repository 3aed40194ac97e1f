//! tetralib-transport: serial-port access for tetralib.
//!
//! TETRA terminals present their PEI as a USB virtual COM port or a physical
//! RS-232 connector, always 8-N-1. [`SerialTransport`] opens the port and
//! implements `AsyncRead`/`AsyncWrite` so it can be handed straight to
//! `AtChannel::new`.

mod serial;

pub use serial::{SerialConfig, SerialTransport};
