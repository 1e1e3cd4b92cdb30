use std::fmt;

use super::RtpPacket;
use crate::Buffer;

impl<B: Buffer> fmt::Display for RtpPacket<B> {
    /// Multi-line dump of the header fields, the payload and the extension.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::RtpPacket;
    ///
    /// let mut packet = RtpPacket::<Vec<u8>>::default();
    /// packet.set_payload_type(8).unwrap();
    /// packet.set_ssrc(0x12345678).unwrap();
    /// packet.set_csrc_list(&[0x11, 0x22]).unwrap();
    ///
    /// let text = packet.to_string();
    /// assert!(text.contains("Payload type: PCMA 8"));
    /// assert!(text.contains("SSRC: 0x12345678"));
    /// assert!(text.contains("CSRC: [ 0x00000011, 0x00000022 ]"));
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Version: {}", self.version())?;
        writeln!(f, "  Padded: {}", self.is_padded())?;
        writeln!(f, "  Extended: {}", self.is_extended())?;
        writeln!(f, "  CSRC count: {}", self.csrc_count)?;
        writeln!(f, "  Marked: {}", self.marker)?;
        writeln!(
            f,
            "  Payload type: {} {}",
            self.payload_kind().name(),
            self.payload_type
        )?;

        writeln!(f, "  Sequence number: {}", self.sequence_number)?;
        writeln!(f, "  Timestamp: {}", self.timestamp)?;
        writeln!(f, "  SSRC: {:#010x}", self.ssrc)?;

        write!(f, "  CSRC: [ ")?;
        if self.csrc().is_empty() {
            write!(f, "None")?;
        }

        for (index, csrc) in self.csrc().iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{:#010x}", csrc)?;
        }

        writeln!(f, " ]")?;

        if self.payload_size > 0 {
            writeln!(f, "  Payload: {} bytes", self.payload_size)?;
            hexdump(f, self.payload())?;
        }

        if let Some(header) = self.extension {
            writeln!(f, "  Extension id: {:#06x}", header.id)?;
            writeln!(f, "  Extension length: {}", header.length)?;
            hexdump(f, self.extension_data())?;
        }

        Ok(())
    }
}

// 16 bytes per line, a gap after the eighth.
fn hexdump(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for line in bytes.chunks(16) {
        write!(f, "   ")?;

        for (index, byte) in line.iter().enumerate() {
            if index == 8 {
                write!(f, " ")?;
            }

            write!(f, " {:02x}", byte)?;
        }

        writeln!(f)?;
    }

    Ok(())
}
