pub mod extension;

mod csrc;
mod display;
mod header;
mod padding;

use bytes::BytesMut;

use self::{
    extension::ExtensionHeader,
    header::{
        CSRC_COUNT, EXTENSION, MARKER, PADDING, PAYLOAD_TYPE, SEQUENCE_NUMBER_OFFSET, SSRC_OFFSET,
        TIMESTAMP_OFFSET, VERSION, read_u16, read_u32,
    },
};

use crate::{
    Buffer, BufferMut, CSRC_SIZE, Error, FIXED_HEADER_SIZE, MAX_CSRC_COUNT, RTP_VERSION,
    payload_type::PayloadKind,
};

/// ### RTP Data Transfer Protocol
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|X|  CC   |M|     PT      |       sequence number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           synchronization source (SSRC) identifier            |
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// |            contributing source (CSRC) identifiers             |
/// |                             ....                              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      defined by profile       |           length              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        header extension                       |
/// |                             ....                              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            payload                            |
/// |                             ....              +-+-+-+-+-+-+-+-+
/// |                               | padding count |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The packet keeps a decoded copy of every header field next to the
/// buffer they were read from.  Setters update both, and the operations
/// that change the size of a variable region (CSRC list, extension,
/// payload, padding) move the bytes behind that region so the buffer is
/// always a valid wire packet of `packet_size` bytes.
///
/// Views returned by the accessors borrow the packet, so they have to be
/// fetched again after every mutation.
#[derive(Debug, Clone)]
pub struct RtpPacket<B> {
    buffer: B,
    /// Contributing source slots, only the first `csrc_count` are on the wire.
    csrc: [u32; MAX_CSRC_COUNT],
    extension: Option<ExtensionHeader>,
    payload_offset: usize,
    payload_size: usize,
    packet_size: usize,
    ssrc: u32,
    timestamp: u32,
    sequence_number: u16,
    padding_bytes: u8,
    payload_type: u8,
    csrc_count: u8,
    marker: bool,
    strict: bool,
}

impl<B: Buffer> RtpPacket<B> {
    fn unbound(buffer: B) -> Self {
        Self {
            buffer,
            csrc: [0; MAX_CSRC_COUNT],
            extension: None,
            payload_offset: FIXED_HEADER_SIZE,
            payload_size: 0,
            packet_size: 0,
            ssrc: 0,
            timestamp: 0,
            sequence_number: 0,
            padding_bytes: 0,
            payload_type: 0,
            csrc_count: 0,
            marker: false,
            strict: cfg!(feature = "rfc3551"),
        }
    }

    /// Parse the whole buffer as one packet.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::RtpPacket;
    ///
    /// let buffer = [
    ///     0x80, 0x08, 0x00, 0x01, 0x00, 0x00, 0x00, 0xa0, 0x12, 0x34, 0x56, 0x78,
    ///     0xd5, 0xd5, 0xd5, 0xd5,
    /// ];
    ///
    /// let packet = RtpPacket::decode(&buffer[..]).unwrap();
    /// assert!(!packet.is_marked());
    /// assert!(!packet.is_extended());
    /// assert_eq!(packet.payload_type(), 8);
    /// assert_eq!(packet.sequence_number(), 1);
    /// assert_eq!(packet.timestamp(), 160);
    /// assert_eq!(packet.ssrc(), 0x12345678);
    /// assert_eq!(packet.payload(), &[0xd5; 4]);
    /// ```
    pub fn decode(buffer: B) -> Result<Self, Error> {
        let size = buffer.len();
        Self::decode_with_size(buffer, size)
    }

    /// Parse the first `size` bytes of the buffer as one packet.
    pub fn decode_with_size(buffer: B, size: usize) -> Result<Self, Error> {
        let mut packet = Self::unbound(buffer);
        packet.reparse(size)?;
        Ok(packet)
    }

    /// Bind a new buffer and parse all of it.
    pub fn parse(&mut self, buffer: B) -> Result<(), Error> {
        let size = buffer.len();
        self.parse_with_size(buffer, size)
    }

    /// Bind a new buffer and parse its first `size` bytes.
    pub fn parse_with_size(&mut self, buffer: B, size: usize) -> Result<(), Error> {
        self.buffer = buffer;
        self.reparse(size)
    }

    /// Parse the first `size` bytes of the buffer that is already bound,
    /// typically after receiving a datagram into it.
    ///
    /// Every cached field is derived again from the bytes.  On failure the
    /// packet is left as after [`RtpPacket::reset`], the buffer stays bound.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::{Error, RtpPacket};
    ///
    /// let mut packet = RtpPacket::new([0u8; 1500]).unwrap();
    /// assert!(packet.reparse(12).is_ok());
    /// assert_eq!(packet.payload_size(), 0);
    ///
    /// assert_eq!(packet.reparse(4), Err(Error::InvalidHeaderLength));
    /// assert_eq!(packet.reparse(1501), Err(Error::ParseBufferOverflow));
    /// assert_eq!(packet.packet_size(), 0);
    /// ```
    pub fn reparse(&mut self, size: usize) -> Result<(), Error> {
        self.reset();
        self.packet_size = size;

        let result = self.parse_packet();
        if let Err(e) = result {
            log::debug!(
                "rtp packet rejected: size={}, buffer={}, err={}",
                size,
                self.buffer.len(),
                e
            );

            self.reset();
        }

        result
    }

    fn parse_packet(&mut self) -> Result<(), Error> {
        let size = self.packet_size;
        if size < FIXED_HEADER_SIZE {
            return Err(Error::InvalidHeaderLength);
        }

        if size > self.buffer.len() {
            return Err(Error::ParseBufferOverflow);
        }

        let bytes = &self.buffer.as_bytes()[..size];

        // lock rtp version in rfc 3550
        if VERSION.get(bytes) != RTP_VERSION {
            return Err(Error::InvalidRtpHeader);
        }

        // the padding count includes itself, so it can never be zero, and
        // it cannot eat into the fixed header.
        if PADDING.get(bytes) == 1 {
            let padding_bytes = bytes[size - 1];
            if padding_bytes == 0 {
                return Err(Error::InvalidRtpHeader);
            }

            if size < padding_bytes as usize + FIXED_HEADER_SIZE {
                return Err(Error::ParseBufferOverflow);
            }

            self.padding_bytes = padding_bytes;
        }

        let is_extended = EXTENSION.get(bytes) == 1;

        self.csrc_count = CSRC_COUNT.get(bytes);
        self.payload_offset = FIXED_HEADER_SIZE + self.csrc_count as usize * CSRC_SIZE;
        if self.payload_offset > size {
            return Err(Error::ParseBufferOverflow);
        }

        for (index, csrc) in self.csrc[..self.csrc_count as usize].iter_mut().enumerate() {
            *csrc = read_u32(bytes, FIXED_HEADER_SIZE + index * CSRC_SIZE);
        }

        self.marker = MARKER.get(bytes) == 1;
        self.payload_type = PAYLOAD_TYPE.get(bytes);
        if self.strict && !PayloadKind::classify(self.payload_type).is_valid() {
            return Err(Error::InvalidRtpHeader);
        }

        self.sequence_number = read_u16(bytes, SEQUENCE_NUMBER_OFFSET);
        self.timestamp = read_u32(bytes, TIMESTAMP_OFFSET);
        self.ssrc = read_u32(bytes, SSRC_OFFSET);

        if is_extended {
            self.parse_extension()?;
        }

        // always derived from the total size, the padding may still overlap
        // the csrc list or the extension.
        let padding_bytes = self.padding_bytes as usize;
        if self.payload_offset + padding_bytes > size {
            return Err(Error::ParseBufferOverflow);
        }

        self.payload_size = size - self.payload_offset - padding_bytes;
        Ok(())
    }

    /// Forget every decoded field.
    ///
    /// The buffer stays bound but no packet is materialized anymore, the
    /// next setter starts again from an empty 12 byte header.  Until then
    /// `packet_size` is 0 while `payload_offset` still points past the
    /// fixed header, so the offsets do not add up to the packet size.
    pub fn reset(&mut self) {
        self.csrc = [0; MAX_CSRC_COUNT];
        self.extension = None;
        self.payload_offset = FIXED_HEADER_SIZE;
        self.payload_size = 0;
        self.packet_size = 0;
        self.ssrc = 0;
        self.timestamp = 0;
        self.sequence_number = 0;
        self.padding_bytes = 0;
        self.payload_type = 0;
        self.csrc_count = 0;
        self.marker = false;
    }

    /// Reject reserved and unassigned payload types while parsing.
    ///
    /// Defaults to on when the `rfc3551` feature is enabled.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Always 2, other versions never get past parsing.
    #[inline]
    pub fn version(&self) -> u8 {
        RTP_VERSION
    }

    #[inline]
    pub fn is_padded(&self) -> bool {
        self.padding_bytes > 0
    }

    /// Padding size including the trailing count byte.
    #[inline]
    pub fn padding_bytes(&self) -> u8 {
        self.padding_bytes
    }

    #[inline]
    pub fn is_extended(&self) -> bool {
        self.extension.is_some()
    }

    #[inline]
    pub fn csrc_count(&self) -> u8 {
        self.csrc_count
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marker
    }

    #[inline]
    pub fn payload_type(&self) -> u8 {
        self.payload_type
    }

    pub fn payload_kind(&self) -> PayloadKind {
        PayloadKind::classify(self.payload_type)
    }

    #[inline]
    pub fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    #[inline]
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    #[inline]
    pub fn ssrc(&self) -> u32 {
        self.ssrc
    }

    /// The contributing sources currently on the wire, in header order.
    #[inline]
    pub fn csrc(&self) -> &[u32] {
        &self.csrc[..self.csrc_count as usize]
    }

    /// Where the extension starts, or would start.
    #[inline]
    pub fn extension_offset(&self) -> usize {
        FIXED_HEADER_SIZE + self.csrc_count as usize * CSRC_SIZE
    }

    #[inline]
    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }

    #[inline]
    pub fn payload_size(&self) -> usize {
        self.payload_size
    }

    #[inline]
    pub fn packet_size(&self) -> usize {
        self.packet_size
    }

    /// The payload bytes, padding excluded.
    ///
    /// Only meaningful after a successful parse or `set_payload_size`.
    pub fn payload(&self) -> &[u8] {
        &self.buffer.as_bytes()[self.payload_offset..self.payload_offset + self.payload_size]
    }

    /// The wire bytes as they are in the buffer right now.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_bytes()[..self.packet_size]
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B: BufferMut> RtpPacket<B> {
    /// Bind the buffer as an empty packet, only the fixed header.
    ///
    /// A growable buffer is resized to the header, any other buffer has to
    /// hold at least the 12 header bytes.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::{Error, RtpPacket};
    ///
    /// let mut packet = RtpPacket::new([0u8; 200]).unwrap();
    /// assert_eq!(packet.packet(), &[0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    ///
    /// let mut storage = [0u8; 8];
    /// let ret = RtpPacket::new(&mut storage[..]);
    /// assert_eq!(ret.err(), Some(Error::FixedBufferTooSmall));
    /// ```
    pub fn new(mut buffer: B) -> Result<Self, Error> {
        buffer
            .try_resize(FIXED_HEADER_SIZE)
            .map_err(|_| Error::FixedBufferTooSmall)?;

        let mut packet = Self::unbound(buffer);
        packet.write_fixed_header();
        Ok(packet)
    }

    /// The wire bytes, with the version bits forced to 2.
    pub fn packet(&mut self) -> &[u8] {
        let size = self.packet_size;
        let bytes = self.buffer.as_bytes_mut();
        if size >= FIXED_HEADER_SIZE {
            VERSION.set(bytes, RTP_VERSION);
        }

        &bytes[..size]
    }

    /// Writable payload view, sized by the last parse or `set_payload_size`.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        let range = self.payload_offset..self.payload_offset + self.payload_size;
        &mut self.buffer.as_bytes_mut()[range]
    }

    // rebuild the fixed header if reset left nothing behind.
    fn materialize(&mut self) -> Result<(), Error> {
        if self.packet_size < FIXED_HEADER_SIZE {
            self.buffer.try_resize(FIXED_HEADER_SIZE)?;
            self.write_fixed_header();
        }

        Ok(())
    }

    fn write_fixed_header(&mut self) {
        let bytes = self.buffer.as_bytes_mut();
        bytes[..FIXED_HEADER_SIZE].fill(0);
        VERSION.set(bytes, RTP_VERSION);

        self.packet_size = FIXED_HEADER_SIZE;
        self.payload_offset = FIXED_HEADER_SIZE;
        self.payload_size = 0;
    }

    /// Move `len` bytes from `from` to `to` and make the packet end right
    /// after them.  The buffer is grown before the move and shrunk after
    /// it, so a backing that cannot grow fails before anything is written.
    fn relocate(&mut self, from: usize, to: usize, len: usize) -> Result<(), Error> {
        let size = to + len;
        if size > self.packet_size {
            self.buffer.try_resize(size)?;
        }

        self.buffer
            .as_bytes_mut()
            .copy_within(from..from + len, to);

        if size < self.packet_size {
            self.buffer.try_resize(size)?;
        }

        self.packet_size = size;
        Ok(())
    }

    // change where the packet ends, nothing is moved.
    fn resize_packet(&mut self, size: usize) -> Result<(), Error> {
        if size != self.packet_size {
            self.buffer.try_resize(size)?;
            self.packet_size = size;
        }

        Ok(())
    }
}

impl Default for RtpPacket<Vec<u8>> {
    fn default() -> Self {
        let mut packet = Self::unbound(vec![0; FIXED_HEADER_SIZE]);
        packet.write_fixed_header();
        packet
    }
}

impl Default for RtpPacket<BytesMut> {
    fn default() -> Self {
        let mut packet = Self::unbound(BytesMut::zeroed(FIXED_HEADER_SIZE));
        packet.write_fixed_header();
        packet
    }
}
