//! tetralib-at: AT-command transport multiplexer for TETRA PEI terminals.
//!
//! A TETRA terminal exposes a serial text interface that accepts AT commands
//! and pushes unsolicited indications (`+CTSDSR:`, `+CTOCP:`, ...) at any
//! time, including in the middle of a command's response. This crate
//! multiplexes the two over a single bidirectional byte stream:
//!
//! - **Line reader** ([`reader`]) -- frames the incoming byte stream into
//!   lines, stripping carriage returns and other control bytes.
//! - **Command state** ([`command`]) -- tracks the single in-flight command
//!   and classifies the `OK`/`ERROR` terminator lines.
//! - **Indication templates** ([`indication`]) -- registered prefixes with a
//!   declared number of trailing content lines.
//! - **Channel** ([`channel`]) -- the single-owner event loop tying it all
//!   together, exposed through [`AtChannel`].
//!
//! # Example
//!
//! ```no_run
//! use tetralib_at::AtChannel;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> tetralib_core::Result<()> {
//! # let stream = tokio::io::duplex(1024).0;
//! let channel = AtChannel::new(stream);
//! channel.add_indication("+CTSDSR:", 1, |lines| {
//!     println!("incoming SDS: {lines:?}");
//! });
//!
//! let token = CancellationToken::new();
//! channel.at(&token, "AT+CTOM=0").await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod command;
pub mod indication;
pub mod reader;

pub use channel::AtChannel;
pub use indication::IndicationHandler;
