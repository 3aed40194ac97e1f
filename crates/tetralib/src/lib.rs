//! # tetralib -- TETRA PEI control for Rust
//!
//! `tetralib` is an asynchronous Rust library for interacting with a TETRA
//! radio terminal through its Peripheral Equipment Interface (PEI), as
//! defined by ETSI TS 100 392-2 and ETSI EN 300 392-5. It multiplexes AT
//! commands with unsolicited indications over a serial link and implements
//! the SDS-TL message codec, including reassembly of concatenated messages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use tetralib::at::AtChannel;
//! use tetralib::sds::{parse_incoming_message, Stack};
//! use tetralib::serial::SerialTransport;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> tetralib::Result<()> {
//!     let port = SerialTransport::open("/dev/ttyUSB0")?;
//!     let channel = AtChannel::new(port);
//!     let token = CancellationToken::new();
//!
//!     // Receive SDS messages: register the +CTSDSR: indication and feed
//!     // header + PDU lines into the reassembly stack.
//!     let stack = Arc::new(Mutex::new(Stack::new().with_message_callback(|message| {
//!         println!("{message}");
//!     })));
//!     channel.add_indication("+CTSDSR:", 1, move |lines| {
//!         match parse_incoming_message(&lines[0], &lines[1]) {
//!             Ok(incoming) => {
//!                 if let Err(e) = stack.lock().unwrap().put(incoming) {
//!                     eprintln!("reassembly failed: {e}");
//!                 }
//!             }
//!             Err(e) => eprintln!("cannot parse incoming SDS: {e}"),
//!         }
//!     });
//!
//!     channel.clear_syntax_errors(&token).await?;
//!     channel.ats(&token, [tetralib::sds::SWITCH_TO_SDS_TL]).await?;
//!     channel.closed().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                          |
//! |------------------------|--------------------------------------------------|
//! | `tetralib-core`        | Errors, identities, hex, the `Requester` seam    |
//! | `tetralib-at`          | Line reader + AT command/indication multiplexer  |
//! | `tetralib-sds`         | SDS-TL PDU codec and reassembly stack            |
//! | `tetralib-ctrl`        | Operating mode, talkgroups, battery, GPS helpers |
//! | `tetralib-transport`   | Serial port access (feature `serial`)            |
//! | **`tetralib`**         | This facade crate -- re-exports everything       |

pub use tetralib_core::*;

/// AT-command transport multiplexer.
///
/// Provides [`AtChannel`](at::AtChannel): one cooperative command/response
/// channel plus unsolicited indication dispatch over a byte stream.
pub mod at {
    pub use tetralib_at::*;
}

/// SDS message codec and reassembly.
pub mod sds {
    pub use tetralib_sds::*;
}

/// Radio-control command helpers.
pub mod ctrl {
    pub use tetralib_ctrl::*;
}

/// Serial port transport.
#[cfg(feature = "serial")]
pub mod serial {
    pub use tetralib_transport::*;
}
