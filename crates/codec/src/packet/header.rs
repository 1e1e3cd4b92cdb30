use bytes::{Buf, BufMut};

use super::RtpPacket;
use crate::{BufferMut, Error};

/// A bit field inside one of the first two header bytes.
#[derive(Debug, Clone, Copy)]
pub(super) struct Bits {
    offset: usize,
    mask: u8,
    shift: u8,
}

impl Bits {
    const fn new(offset: usize, mask: u8, shift: u8) -> Self {
        Self {
            offset,
            mask,
            shift,
        }
    }

    #[inline]
    pub(super) fn get(&self, bytes: &[u8]) -> u8 {
        (bytes[self.offset] & self.mask) >> self.shift
    }

    #[inline]
    pub(super) fn set(&self, bytes: &mut [u8], value: u8) {
        let byte = &mut bytes[self.offset];
        *byte = (*byte & !self.mask) | ((value << self.shift) & self.mask);
    }
}

pub(super) const VERSION: Bits = Bits::new(0, 0b1100_0000, 6);
pub(super) const PADDING: Bits = Bits::new(0, 0b0010_0000, 5);
pub(super) const EXTENSION: Bits = Bits::new(0, 0b0001_0000, 4);
pub(super) const CSRC_COUNT: Bits = Bits::new(0, 0b0000_1111, 0);
pub(super) const MARKER: Bits = Bits::new(1, 0b1000_0000, 7);
pub(super) const PAYLOAD_TYPE: Bits = Bits::new(1, 0b0111_1111, 0);

pub(super) const SEQUENCE_NUMBER_OFFSET: usize = 2;
pub(super) const TIMESTAMP_OFFSET: usize = 4;
pub(super) const SSRC_OFFSET: usize = 8;

#[inline]
pub(super) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    (&bytes[offset..]).get_u16()
}

#[inline]
pub(super) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    (&bytes[offset..]).get_u32()
}

#[inline]
pub(super) fn write_u16(bytes: &mut [u8], offset: usize, value: u16) {
    (&mut bytes[offset..]).put_u16(value);
}

#[inline]
pub(super) fn write_u32(bytes: &mut [u8], offset: usize, value: u32) {
    (&mut bytes[offset..]).put_u32(value);
}

/// Fixed header setters.
///
/// Each of them first materializes an empty header if the packet was reset,
/// then updates the cached field and the wire bytes together.
impl<B: BufferMut> RtpPacket<B> {
    pub fn set_marker(&mut self, marker: bool) -> Result<(), Error> {
        self.materialize()?;
        self.marker = marker;
        MARKER.set(self.buffer.as_bytes_mut(), marker as u8);
        Ok(())
    }

    /// Only the low 7 bits are kept.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::RtpPacket;
    ///
    /// let mut packet = RtpPacket::<Vec<u8>>::default();
    /// packet.set_marker(true).unwrap();
    /// packet.set_payload_type(0xff).unwrap();
    ///
    /// assert!(packet.is_marked());
    /// assert_eq!(packet.payload_type(), 127);
    /// assert_eq!(packet.packet()[1], 0xff);
    ///
    /// packet.set_marker(false).unwrap();
    /// assert_eq!(packet.packet()[1], 0x7f);
    /// ```
    pub fn set_payload_type(&mut self, payload_type: u8) -> Result<(), Error> {
        self.materialize()?;
        self.payload_type = payload_type & PAYLOAD_TYPE.mask;
        PAYLOAD_TYPE.set(self.buffer.as_bytes_mut(), self.payload_type);
        Ok(())
    }

    pub fn set_sequence_number(&mut self, sequence_number: u16) -> Result<(), Error> {
        self.materialize()?;
        self.sequence_number = sequence_number;
        write_u16(
            self.buffer.as_bytes_mut(),
            SEQUENCE_NUMBER_OFFSET,
            sequence_number,
        );

        Ok(())
    }

    pub fn set_timestamp(&mut self, timestamp: u32) -> Result<(), Error> {
        self.materialize()?;
        self.timestamp = timestamp;
        write_u32(self.buffer.as_bytes_mut(), TIMESTAMP_OFFSET, timestamp);
        Ok(())
    }

    pub fn set_ssrc(&mut self, ssrc: u32) -> Result<(), Error> {
        self.materialize()?;
        self.ssrc = ssrc;
        write_u32(self.buffer.as_bytes_mut(), SSRC_OFFSET, ssrc);
        Ok(())
    }
}
