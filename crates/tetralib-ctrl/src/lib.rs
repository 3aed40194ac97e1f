//! tetralib-ctrl: radio-control command helpers.
//!
//! Thin formatters and parsers over the AT grammar for controlling a TETRA
//! terminal: operating mode, talkgroup selection and enumeration, battery
//! charge, signal strength, and GPS position. All request helpers operate on
//! a [`Requester`](tetralib_core::Requester), so they work against the real
//! AT channel and against scripted closures in tests alike.

mod commands;
mod mode;

pub use commands::{
    request_battery_charge, request_gps_position, request_operating_mode, request_signal_strength,
    request_talkgroup, request_talkgroup_range, request_talkgroups, set_operating_mode,
    set_talkgroup, GpsPosition, TalkgroupInfo, TalkgroupKind, TalkgroupRange,
};
pub use mode::AiMode;
