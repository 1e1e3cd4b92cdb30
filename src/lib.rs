//! Inspect RTP packets stored in files.
//!
//! Every input file holds one packet, either as the raw wire bytes or as
//! base64 text.  Packets are parsed with [`codec::RtpPacket`] and printed
//! in a human readable form.

pub mod config;
pub mod inspect;

pub use self::inspect::{Inspector, Report, inspect};
