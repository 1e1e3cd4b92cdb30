//! ### Header Extension
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      defined by profile       |           length              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        header extension                       |
//! |                             ....                              |
//! ```
//!
//! The length counts 32-bit words of data, the 4 byte header itself is
//! not included.

use super::{
    RtpPacket,
    header::{EXTENSION, read_u16, write_u16},
};

use crate::{Buffer, BufferMut, Error};

const EXTENSION_HEADER_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExtensionHeader {
    /// Profile defined identifier.
    pub id: u16,
    /// Data size in 32-bit words.
    pub length: u16,
}

impl ExtensionHeader {
    pub fn new(id: u16, length: u16) -> Self {
        Self { id, length }
    }

    #[inline]
    pub fn data_size(&self) -> usize {
        self.length as usize * 4
    }

    /// Header and data together.
    #[inline]
    pub fn size(&self) -> usize {
        EXTENSION_HEADER_SIZE + self.data_size()
    }
}

impl<B: Buffer> RtpPacket<B> {
    pub(super) fn parse_extension(&mut self) -> Result<(), Error> {
        let offset = self.extension_offset();
        if offset + EXTENSION_HEADER_SIZE > self.packet_size {
            return Err(Error::ParseExtensionOverflow);
        }

        let bytes = self.buffer.as_bytes();
        let header = ExtensionHeader {
            id: read_u16(bytes, offset),
            length: read_u16(bytes, offset + 2),
        };

        let payload_offset = offset + header.size();
        if payload_offset > self.packet_size {
            return Err(Error::ParseExtensionOverflow);
        }

        self.payload_offset = payload_offset;
        self.extension = Some(header);
        Ok(())
    }

    #[inline]
    pub fn extension(&self) -> Option<ExtensionHeader> {
        self.extension
    }

    /// 0 without an extension.
    pub fn extension_id(&self) -> u16 {
        self.extension.map(|it| it.id).unwrap_or(0)
    }

    /// 0 without an extension.
    pub fn extension_length(&self) -> u16 {
        self.extension.map(|it| it.length).unwrap_or(0)
    }

    /// Extension data after the 4 byte extension header, empty without an
    /// extension.
    pub fn extension_data(&self) -> &[u8] {
        match self.extension {
            Some(header) => {
                let start = self.extension_offset() + EXTENSION_HEADER_SIZE;
                &self.buffer.as_bytes()[start..start + header.data_size()]
            }
            None => &[],
        }
    }
}

impl<B: BufferMut> RtpPacket<B> {
    pub fn extension_data_mut(&mut self) -> &mut [u8] {
        match self.extension {
            Some(header) => {
                let start = self.extension_offset() + EXTENSION_HEADER_SIZE;
                &mut self.buffer.as_bytes_mut()[start..start + header.data_size()]
            }
            None => &mut [],
        }
    }

    /// Add, resize or remove the header extension.
    ///
    /// The payload and padding are moved to right after the new extension.
    /// Extension data that stays in place keeps its bytes, the rest has to
    /// be written through [`RtpPacket::extension_data_mut`].
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::{ExtensionHeader, RtpPacket};
    ///
    /// let mut packet = RtpPacket::new(Vec::new()).unwrap();
    /// packet.set_payload_size(2).unwrap();
    /// packet.payload_mut().copy_from_slice(&[1, 2]);
    ///
    /// packet.set_extension(Some(ExtensionHeader::new(0xbede, 1))).unwrap();
    /// packet.extension_data_mut().copy_from_slice(&[9; 4]);
    ///
    /// assert_eq!(packet.packet_size(), 22);
    /// assert_eq!(packet.extension_id(), 0xbede);
    /// assert_eq!(packet.extension_data(), &[9; 4]);
    /// assert_eq!(packet.payload(), &[1, 2]);
    /// assert_eq!(packet.packet()[0], 0x90);
    ///
    /// packet.set_extension(None).unwrap();
    /// assert_eq!(packet.packet(), &[0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2]);
    /// ```
    pub fn set_extension(&mut self, header: Option<ExtensionHeader>) -> Result<(), Error> {
        self.materialize()?;

        let offset = self.extension_offset();
        let to = offset + header.map(|it| it.size()).unwrap_or(0);
        let len = self.payload_size + self.padding_bytes as usize;
        self.relocate(self.payload_offset, to, len)?;

        self.payload_offset = to;
        self.extension = header;

        let bytes = self.buffer.as_bytes_mut();
        if let Some(it) = header {
            write_u16(bytes, offset, it.id);
            write_u16(bytes, offset + 2, it.length);
        }

        EXTENSION.set(bytes, header.is_some() as u8);
        Ok(())
    }
}
