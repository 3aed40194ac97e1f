//! Serial port transport for PEI communication.
//!
//! TETRA terminals present their PEI as a USB virtual COM port or a physical
//! RS-232 connector, fixed at 8 data bits, 1 stop bit, no parity. The only
//! knobs terminals differ on are the baud rate (38400 for Motorola and
//! Sepura terminals) and whether RTS/CTS flow control is wired up (it
//! usually is).
//!
//! # Example
//!
//! ```no_run
//! use tetralib_transport::SerialTransport;
//!
//! # async fn example() -> tetralib_core::Result<()> {
//! let port = SerialTransport::open("/dev/ttyUSB0")?;
//! // hand `port` to AtChannel::new(...)
//! # Ok(())
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use tetralib_core::{Error, Result};

/// Serial port configuration.
///
/// The PEI is always 8-N-1; only the baud rate and RTS/CTS flow control
/// vary between terminals. The defaults match the common terminal setup:
/// 38400 baud with RTS/CTS enabled.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate; 38400 on most terminals.
    pub baud_rate: u32,
    /// RTS/CTS hardware flow control.
    pub rts_cts: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 38400,
            rts_cts: true,
        }
    }
}

fn flow_control(rts_cts: bool) -> tokio_serial::FlowControl {
    if rts_cts {
        tokio_serial::FlowControl::Hardware
    } else {
        tokio_serial::FlowControl::None
    }
}

/// Serial port transport for PEI communication.
///
/// Implements `AsyncRead` and `AsyncWrite` by delegating to the underlying
/// port, so it plugs directly into the AT channel.
pub struct SerialTransport {
    port: SerialStream,
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port with the default PEI settings (38400 8-N-1,
    /// RTS/CTS flow control).
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g., "/dev/ttyUSB0" on Linux, "COM3" on Windows)
    pub fn open(port: &str) -> Result<Self> {
        Self::open_with_config(port, SerialConfig::default())
    }

    /// Open a serial port with a non-default baud rate or with RTS/CTS
    /// disabled.
    pub fn open_with_config(port: &str, config: SerialConfig) -> Result<Self> {
        tracing::debug!(
            port = %port,
            baud_rate = config.baud_rate,
            rts_cts = config.rts_cts,
            "Opening serial port"
        );

        let stream = tokio_serial::new(port, config.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .flow_control(flow_control(config.rts_cts))
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("failed to open serial port {}: {}", port, e))
            })?;

        tracing::info!(port = %port, baud_rate = config.baud_rate, "Serial port opened");

        Ok(Self {
            port: stream,
            port_name: port.to_string(),
        })
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl AsyncRead for SerialTransport {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().port).poll_read(cx, buf)
    }
}

impl AsyncWrite for SerialTransport {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Pin::new(&mut self.get_mut().port).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().port).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.get_mut().port).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_common_terminals() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 38400);
        assert!(config.rts_cts);
    }

    #[test]
    fn rts_cts_selects_hardware_flow_control() {
        assert_eq!(flow_control(true), tokio_serial::FlowControl::Hardware);
        assert_eq!(flow_control(false), tokio_serial::FlowControl::None);
    }

    #[test]
    fn open_nonexistent_port_fails() {
        let result = SerialTransport::open("/dev/does-not-exist");
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
