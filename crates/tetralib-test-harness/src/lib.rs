//! Test harness for tetralib: an in-memory double of the terminal's byte
//! stream.
//!
//! Lets you test line framing, command/response multiplexing, and indication
//! dispatch without real hardware.

mod mock_device;

pub use mock_device::{mock_device, MockDevice};
