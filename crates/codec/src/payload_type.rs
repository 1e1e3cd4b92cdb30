//! RTP payload types, [RFC3551] profile.
//!
//! [RFC3551]: https://tools.ietf.org/html/rfc3551
//!
//! ```text
//! PT   encoding    media type  clock rate   channels
//!      name                    (Hz)
//! ___________________________________________________
//! 0    PCMU        A            8,000       1
//! 1    reserved    A
//! 2    reserved    A
//! 3    GSM         A            8,000       1
//! 4    G723        A            8,000       1
//! 5    DVI4        A            8,000       1
//! 6    DVI4        A           16,000       1
//! 7    LPC         A            8,000       1
//! 8    PCMA        A            8,000       1
//! 9    G722        A            8,000       1
//! 10   L16         A           44,100       2
//! 11   L16         A           44,100       1
//! 12   QCELP       A            8,000       1
//! 13   CN          A            8,000       1
//! 14   MPA         A           90,000
//! 15   G728        A            8,000       1
//! 16   DVI4        A           11,025       1
//! 17   DVI4        A           22,050       1
//! 18   G729        A            8,000       1
//! 19   reserved    A
//! 20-24 unassigned
//! 25   CelB        V           90,000
//! 26   JPEG        V           90,000
//! 27   unassigned  V
//! 28   nv          V           90,000
//! 29-30 unassigned V
//! 31   H261        V           90,000
//! 32   MPV         V           90,000
//! 33   MP2T        AV          90,000
//! 34   H263        V           90,000
//! 35-71 unassigned ?
//! 72-76 reserved   N/A
//! 77-95 unassigned ?
//! 96-127 dynamic   ?
//! ```

use num_enum::TryFromPrimitive;

const PAYLOAD_TYPE_MASK: u8 = 0b0111_1111;

/// The first payload type left for dynamic, out-of-band negotiated use.
pub const MIN_DYNAMIC_PAYLOAD_TYPE: u8 = 96;
pub const MAX_DYNAMIC_PAYLOAD_TYPE: u8 = 127;

/// Statically assigned audio encodings.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum AudioPayloadType {
    Pcmu = 0,
    Gsm = 3,
    G723 = 4,
    Dvi4Clock8000 = 5,
    Dvi4Clock16000 = 6,
    Lpc = 7,
    Pcma = 8,
    G722 = 9,
    L16Stereo = 10,
    L16Mono = 11,
    Qcelp = 12,
    Cn = 13,
    Mpa = 14,
    G728 = 15,
    Dvi4Clock11025 = 16,
    Dvi4Clock22050 = 17,
    G729 = 18,
}

impl AudioPayloadType {
    #[rustfmt::skip]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pcmu => "PCMU",
            Self::Gsm => "GSM",
            Self::G723 => "G723",
            Self::Dvi4Clock8000 => "DVI4 (8000 hz)",
            Self::Dvi4Clock16000 => "DVI4 (16000 hz)",
            Self::Lpc => "LPC",
            Self::Pcma => "PCMA",
            Self::G722 => "G722",
            Self::L16Stereo => "L16 (dual channel)",
            Self::L16Mono => "L16 (single channel)",
            Self::Qcelp => "QCELP",
            Self::Cn => "CN",
            Self::Mpa => "MPA",
            Self::G728 => "G728",
            Self::Dvi4Clock11025 => "DVI4 (11025 hz)",
            Self::Dvi4Clock22050 => "DVI4 (22050 hz)",
            Self::G729 => "G729",
        }
    }

    pub fn clock_rate(&self) -> u32 {
        match self {
            Self::Dvi4Clock16000 => 16_000,
            Self::L16Stereo | Self::L16Mono => 44_100,
            Self::Mpa => 90_000,
            Self::Dvi4Clock11025 => 11_025,
            Self::Dvi4Clock22050 => 22_050,
            _ => 8_000,
        }
    }

    /// MPA carries its channel count in the payload itself.
    pub fn channels(&self) -> Option<u8> {
        match self {
            Self::Mpa => None,
            Self::L16Stereo => Some(2),
            _ => Some(1),
        }
    }
}

/// Statically assigned video and combined encodings.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum VideoPayloadType {
    CelB = 25,
    Jpeg = 26,
    Nv = 28,
    H261 = 31,
    Mpv = 32,
    Mp2t = 33,
    H263 = 34,
}

impl VideoPayloadType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CelB => "CelB",
            Self::Jpeg => "JPEG",
            Self::Nv => "nv",
            Self::H261 => "H261",
            Self::Mpv => "MPV",
            Self::Mp2t => "MP2T",
            Self::H263 => "H263",
        }
    }

    pub fn clock_rate(&self) -> u32 {
        90_000
    }

    /// MP2T multiplexes audio and video in one stream.
    pub fn is_audio_video(&self) -> bool {
        matches!(self, Self::Mp2t)
    }
}

/// Classification of a 7 bit payload type value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Audio(AudioPayloadType),
    Video(VideoPayloadType),
    Dynamic(u8),
    Reserved(u8),
    Unassigned(u8),
}

impl PayloadKind {
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::payload_type::*;
    ///
    /// assert_eq!(PayloadKind::classify(8), PayloadKind::Audio(AudioPayloadType::Pcma));
    /// assert_eq!(PayloadKind::classify(26), PayloadKind::Video(VideoPayloadType::Jpeg));
    /// assert_eq!(PayloadKind::classify(1), PayloadKind::Reserved(1));
    /// assert_eq!(PayloadKind::classify(74), PayloadKind::Reserved(74));
    /// assert_eq!(PayloadKind::classify(40), PayloadKind::Unassigned(40));
    /// assert_eq!(PayloadKind::classify(111), PayloadKind::Dynamic(111));
    ///
    /// // the marker bit is not part of the payload type.
    /// assert_eq!(PayloadKind::classify(0x80 | 8), PayloadKind::Audio(AudioPayloadType::Pcma));
    /// ```
    pub fn classify(value: u8) -> Self {
        let value = value & PAYLOAD_TYPE_MASK;

        if let Ok(kind) = AudioPayloadType::try_from(value) {
            return Self::Audio(kind);
        }

        if let Ok(kind) = VideoPayloadType::try_from(value) {
            return Self::Video(kind);
        }

        match value {
            MIN_DYNAMIC_PAYLOAD_TYPE..=MAX_DYNAMIC_PAYLOAD_TYPE => Self::Dynamic(value),
            1 | 2 | 19 | 72..=76 => Self::Reserved(value),
            _ => Self::Unassigned(value),
        }
    }

    /// Reserved and unassigned payload types must not appear on the wire.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Reserved(_) | Self::Unassigned(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Audio(kind) => kind.name(),
            Self::Video(kind) => kind.name(),
            Self::Dynamic(_) => "Dynamic RTP",
            Self::Reserved(_) => "Reserved",
            Self::Unassigned(_) => "Unassigned",
        }
    }

    /// Dynamic types get their clock rate out of band.
    pub fn clock_rate(&self) -> Option<u32> {
        match self {
            Self::Audio(kind) => Some(kind.clock_rate()),
            Self::Video(kind) => Some(kind.clock_rate()),
            _ => None,
        }
    }
}

impl From<u8> for PayloadKind {
    fn from(value: u8) -> Self {
        Self::classify(value)
    }
}

impl From<PayloadKind> for u8 {
    fn from(value: PayloadKind) -> Self {
        match value {
            PayloadKind::Audio(kind) => kind as u8,
            PayloadKind::Video(kind) => kind as u8,
            PayloadKind::Dynamic(value)
            | PayloadKind::Reserved(value)
            | PayloadKind::Unassigned(value) => value,
        }
    }
}
