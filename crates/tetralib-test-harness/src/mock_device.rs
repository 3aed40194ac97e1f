//! In-memory terminal double for deterministic testing.
//!
//! [`mock_device`] returns a scripting handle plus a byte stream that can be
//! handed to `AtChannel::new` in place of a serial port. The test feeds
//! terminal output through the handle and observes everything the library
//! writes.
//!
//! # Example
//!
//! ```
//! # async fn example() {
//! let (mut device, stream) = tetralib_test_harness::mock_device();
//! // hand `stream` to the code under test, then script the terminal:
//! device.feed(b"OK\r\n").await;
//! # }
//! ```

use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

/// Buffer capacity of the in-memory stream; larger than any PEI line.
const PIPE_CAPACITY: usize = 4096;

/// Scripting handle for the terminal side of an in-memory byte stream.
///
/// Dropping (or [`close`](MockDevice::close)-ing) the handle makes the
/// library side observe end-of-stream, exactly like an unplugged serial
/// device.
pub struct MockDevice {
    terminal: DuplexStream,
}

/// Create a connected pair: the scripting handle and the stream under test.
pub fn mock_device() -> (MockDevice, DuplexStream) {
    let (terminal, library) = tokio::io::duplex(PIPE_CAPACITY);
    (MockDevice { terminal }, library)
}

impl MockDevice {
    /// Feed bytes that the library will receive as terminal output.
    pub async fn feed(&mut self, bytes: &[u8]) {
        self.terminal
            .write_all(bytes)
            .await
            .expect("mock device feed failed");
    }

    /// Wait for the library to write something and return whatever bytes are
    /// available.
    pub async fn read_written(&mut self) -> Vec<u8> {
        let mut buf = [0u8; PIPE_CAPACITY];
        let n = self
            .terminal
            .read(&mut buf)
            .await
            .expect("mock device read failed");
        buf[..n].to_vec()
    }

    /// Close the device; the library side reads end-of-stream.
    pub fn close(self) {
        drop(self);
    }
}
