//! ## RTP: A Transport Protocol for Real-Time Applications
//!
//! [RFC3550]: https://tools.ietf.org/html/rfc3550
//! [RFC3551]: https://tools.ietf.org/html/rfc3551
//!
//! RTP provides end-to-end network transport functions suitable for
//! applications transmitting real-time data, such as audio, video or
//! simulation data, over multicast or unicast network services.  RTP
//! does not address resource reservation and does not guarantee
//! quality-of-service for real-time services.
//!
//! This crate only deals with the framing of a single packet as described
//! in [RFC3550]: the fixed header, the contributing source list, the
//! optional header extension, the payload and the trailing padding.  A
//! packet is decoded in place over the caller's buffer and every mutation
//! is encoded straight back into that buffer, so the wire bytes are always
//! available without a separate serialization step.
//!
//! The buffer can be a fixed-size array, a growable `Vec<u8>` / `BytesMut`
//! or a borrowed slice, see [`buffer`].  Payload type names follow the
//! [RFC3551] profile, see [`payload_type`].

pub mod buffer;
pub mod packet;
pub mod payload_type;

pub use self::{
    buffer::{Buffer, BufferMut},
    packet::{RtpPacket, extension::ExtensionHeader},
    payload_type::{AudioPayloadType, PayloadKind, VideoPayloadType},
};

/// The fixed part of every RTP header, up to and including the SSRC.
pub const FIXED_HEADER_SIZE: usize = 12;

/// The CC field is 4 bits wide.
pub const MAX_CSRC_COUNT: usize = 15;

/// Size of a single contributing source identifier.
pub const CSRC_SIZE: usize = 4;

/// The version defined by RFC 3550.
pub const RTP_VERSION: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The backing cannot grow to the size a mutation needs.
    BufferTooSmall,
    /// A non-growable backing cannot even hold the fixed header.
    FixedBufferTooSmall,
    /// The CSRC list, the padding or the explicit packet size run past the
    /// end of the packet.
    ParseBufferOverflow,
    /// The header extension runs past the end of the packet.
    ParseExtensionOverflow,
    /// The packet is shorter than the fixed header.
    InvalidHeaderLength,
    /// Wrong version, zero padding count, or a rejected payload type.
    InvalidRtpHeader,
    /// More than 15 contributing sources.
    InvalidCsrcCount,
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
