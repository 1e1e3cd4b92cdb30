use super::{RtpPacket, header::PADDING};
use crate::{BufferMut, Error};

impl<B: BufferMut> RtpPacket<B> {
    /// Set the padding size, count byte included, 0 removes it.
    ///
    /// The padding is zero filled and the count goes in the last byte.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::{Error, RtpPacket};
    ///
    /// let mut packet = RtpPacket::new([0u8; 20]).unwrap();
    /// packet.set_padding_bytes(4).unwrap();
    ///
    /// assert!(packet.is_padded());
    /// assert_eq!(packet.packet_size(), 16);
    /// assert_eq!(&packet.packet()[12..], &[0, 0, 0, 4]);
    /// assert_eq!(packet.packet()[0], 0xa0);
    ///
    /// assert_eq!(packet.set_padding_bytes(9), Err(Error::BufferTooSmall));
    /// assert_eq!(packet.packet_size(), 16);
    /// ```
    pub fn set_padding_bytes(&mut self, padding_bytes: u8) -> Result<(), Error> {
        self.materialize()?;

        let size = self.packet_size - self.padding_bytes as usize + padding_bytes as usize;
        self.resize_packet(size)?;
        self.padding_bytes = padding_bytes;
        self.write_padding();
        Ok(())
    }

    /// Set the payload size, the padding follows the new payload end.
    ///
    /// Grown payload bytes are not cleared on a fixed or borrowed backing.
    pub fn set_payload_size(&mut self, size: usize) -> Result<(), Error> {
        self.materialize()?;

        let end = self
            .payload_offset
            .checked_add(self.padding_bytes as usize)
            .and_then(|it| it.checked_add(size))
            .ok_or(Error::BufferTooSmall)?;

        self.resize_packet(end)?;
        self.payload_size = size;
        self.write_padding();
        Ok(())
    }

    fn write_padding(&mut self) {
        let size = self.packet_size;
        let padding_bytes = self.padding_bytes as usize;
        let bytes = self.buffer.as_bytes_mut();
        if padding_bytes > 0 {
            bytes[size - padding_bytes..size - 1].fill(0);
            bytes[size - 1] = self.padding_bytes;
        }

        PADDING.set(bytes, (padding_bytes > 0) as u8);
    }
}
