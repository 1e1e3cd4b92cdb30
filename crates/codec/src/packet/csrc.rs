use super::{
    RtpPacket,
    header::{CSRC_COUNT, write_u32},
};

use crate::{BufferMut, CSRC_SIZE, Error, FIXED_HEADER_SIZE, MAX_CSRC_COUNT};

impl<B: BufferMut> RtpPacket<B> {
    /// All 15 contributing source slots.
    ///
    /// Slots can be filled before the count is raised, they are only
    /// written to the wire by [`RtpPacket::set_csrc`] or
    /// [`RtpPacket::commit_csrc`].
    pub fn csrc_mut(&mut self) -> &mut [u32; MAX_CSRC_COUNT] {
        &mut self.csrc
    }

    /// Change the number of contributing sources on the wire.
    ///
    /// Everything after the list (extension, payload and padding) is moved
    /// by four bytes per added or removed entry, then the first `count`
    /// slots are written.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::{Error, RtpPacket};
    ///
    /// let mut packet = RtpPacket::new([0u8; 200]).unwrap();
    /// packet.csrc_mut()[0] = 0x11;
    /// packet.csrc_mut()[1] = 0x22;
    /// packet.set_csrc(2).unwrap();
    ///
    /// assert_eq!(packet.csrc(), &[0x11, 0x22]);
    /// assert_eq!(packet.packet_size(), 20);
    /// assert_eq!(packet.packet()[0], 0x82);
    ///
    /// assert_eq!(packet.set_csrc(16), Err(Error::InvalidCsrcCount));
    /// assert_eq!(packet.csrc_count(), 2);
    /// ```
    pub fn set_csrc(&mut self, count: u8) -> Result<(), Error> {
        if count as usize > MAX_CSRC_COUNT {
            return Err(Error::InvalidCsrcCount);
        }

        self.materialize()?;

        let from = self.extension_offset();
        let to = FIXED_HEADER_SIZE + count as usize * CSRC_SIZE;
        self.relocate(from, to, self.packet_size - from)?;

        self.payload_offset = self.payload_offset - from + to;
        self.csrc_count = count;

        CSRC_COUNT.set(self.buffer.as_bytes_mut(), count);
        self.write_csrc();
        Ok(())
    }

    /// Replace the contributing sources with `list`.
    pub fn set_csrc_list(&mut self, list: &[u32]) -> Result<(), Error> {
        if list.len() > MAX_CSRC_COUNT {
            return Err(Error::InvalidCsrcCount);
        }

        self.csrc[..list.len()].copy_from_slice(list);
        self.set_csrc(list.len() as u8)
    }

    /// Write the slots edited through [`RtpPacket::csrc_mut`] without
    /// changing the count.
    pub fn commit_csrc(&mut self) -> Result<(), Error> {
        self.materialize()?;
        self.write_csrc();
        Ok(())
    }

    fn write_csrc(&mut self) {
        let bytes = self.buffer.as_bytes_mut();
        for (index, csrc) in self.csrc[..self.csrc_count as usize].iter().enumerate() {
            write_u32(bytes, FIXED_HEADER_SIZE + index * CSRC_SIZE, *csrc);
        }
    }
}
