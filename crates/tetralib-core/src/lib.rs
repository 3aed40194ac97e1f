//! tetralib-core: Core traits, types, and error definitions for tetralib.
//!
//! This crate defines the radio-agnostic abstractions shared by all tetralib
//! layers. Dispatcher applications and other consumers depend on these types
//! without pulling in the AT transport or the SDS codec.
//!
//! # Key types
//!
//! - [`Requester`] -- the command/response seam between the AT transport and
//!   the command helpers
//! - [`Identity`] -- a TETRA party identity (ISSI, TSI, ...)
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod hex;
pub mod identity;
pub mod requester;

// Re-export key types at crate root for ergonomic `use tetralib_core::*`.
pub use error::{Error, Result};
pub use hex::{binary_to_hex, hex_to_binary};
pub use identity::{Identity, IdentityType, TypedIdentity};
pub use requester::{Requester, RequesterFn};
