//! Buffer backings.
//!
//! A packet never owns a particular storage type, it works through these
//! two traits.  Three kinds of backings exist:
//!
//! * fixed-capacity: `[u8; N]`, the length is the capacity and never changes.
//! * growable: `Vec<u8>` and `BytesMut`, resized to whatever the packet needs.
//! * borrowed: `&mut [u8]` is written in place and never grows, `&[u8]` and
//!   `Bytes` can only be parsed.
//!
//! Non-growable backings refuse a resize past their length with
//! [`Error::BufferTooSmall`], and the packet checks this before it writes
//! a single byte.

use bytes::{Bytes, BytesMut};

use crate::Error;

/// Read access to the bytes behind a packet.
pub trait Buffer {
    fn as_bytes(&self) -> &[u8];

    #[inline]
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to the bytes behind a packet.
pub trait BufferMut: Buffer {
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Makes exactly `size` bytes addressable.
    ///
    /// Growable backings resize to `size`, zero filling new bytes and
    /// dropping everything past `size`.  The others only check that `size`
    /// fits in what they already have.
    ///
    /// # Test
    ///
    /// ```
    /// use rtp_packet_codec::{Buffer, BufferMut, Error};
    ///
    /// let mut fixed = [0u8; 16];
    /// assert!(fixed.try_resize(16).is_ok());
    /// assert_eq!(fixed.try_resize(17), Err(Error::BufferTooSmall));
    /// assert_eq!(Buffer::len(&fixed), 16);
    ///
    /// let mut growable = vec![1u8; 4];
    /// growable.try_resize(8).unwrap();
    /// assert_eq!(growable, [1, 1, 1, 1, 0, 0, 0, 0]);
    /// growable.try_resize(2).unwrap();
    /// assert_eq!(growable, [1, 1]);
    /// ```
    fn try_resize(&mut self, size: usize) -> Result<(), Error>;

    #[inline]
    fn is_growable(&self) -> bool {
        false
    }
}

#[inline]
fn check_capacity(capacity: usize, size: usize) -> Result<(), Error> {
    if size > capacity {
        log::trace!("buffer refused to grow: capacity={}, required={}", capacity, size);

        return Err(Error::BufferTooSmall);
    }

    Ok(())
}

impl<const N: usize> Buffer for [u8; N] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<const N: usize> BufferMut for [u8; N] {
    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }

    fn try_resize(&mut self, size: usize) -> Result<(), Error> {
        check_capacity(N, size)
    }
}

impl Buffer for Vec<u8> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl BufferMut for Vec<u8> {
    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }

    fn try_resize(&mut self, size: usize) -> Result<(), Error> {
        self.resize(size, 0);
        Ok(())
    }

    #[inline]
    fn is_growable(&self) -> bool {
        true
    }
}

impl Buffer for BytesMut {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self[..]
    }
}

impl BufferMut for BytesMut {
    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self[..]
    }

    fn try_resize(&mut self, size: usize) -> Result<(), Error> {
        self.resize(size, 0);
        Ok(())
    }

    #[inline]
    fn is_growable(&self) -> bool {
        true
    }
}

impl Buffer for &mut [u8] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl BufferMut for &mut [u8] {
    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }

    fn try_resize(&mut self, size: usize) -> Result<(), Error> {
        check_capacity(self.as_bytes().len(), size)
    }
}

impl Buffer for &[u8] {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Buffer for Bytes {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self[..]
    }
}
