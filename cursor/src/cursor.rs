//! Growable byte cursor with bounded reads.

use bytes::{Buf, Bytes, BytesMut};

use crate::error::{CursorError, CursorResult};

/// Byte order used for multi-byte integer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

/// An append-only byte buffer with a read position.
///
/// Appends grow the buffer without moving the read position. Every read is
/// bounds-checked against [`ByteCursor::bytes_remaining`] and fails with
/// [`CursorError::ShortRead`] instead of panicking.
#[derive(Debug, Default)]
pub struct ByteCursor {
    buf: BytesMut,
    pos: usize,
}

impl ByteCursor {
    /// Creates an empty cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cursor with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Appends bytes to the end of the buffer. The read position is unchanged.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Returns the number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the current read position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes between the read position and the end.
    #[must_use]
    pub fn bytes_remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the unread bytes without consuming them.
    #[must_use]
    pub fn remaining_slice(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> CursorResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a `u16` in the given byte order.
    pub fn read_u16(&mut self, order: ByteOrder) -> CursorResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(match order {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        })
    }

    /// Reads a `u32` in the given byte order.
    pub fn read_u32(&mut self, order: ByteOrder) -> CursorResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(match order {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }

    /// Reads `n` bytes as an owned buffer.
    pub fn read_bytes(&mut self, n: usize) -> CursorResult<Bytes> {
        self.ensure_bytes(n)?;
        let out = Bytes::copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(out)
    }

    /// Moves the read position by a signed offset.
    ///
    /// The target must stay within `0..=len`; the cursor is left untouched
    /// otherwise.
    pub fn seek(&mut self, offset: isize) -> CursorResult<()> {
        let target = self
            .pos
            .checked_add_signed(offset)
            .filter(|target| *target <= self.buf.len())
            .ok_or(CursorError::SeekOutOfRange {
                offset,
                position: self.pos,
                len: self.buf.len(),
            })?;
        self.pos = target;
        Ok(())
    }

    /// Drops the already consumed prefix and rebases the read position to 0.
    ///
    /// Returns the number of bytes released. Positions recorded before the
    /// call are invalidated.
    pub fn compact(&mut self) -> usize {
        let consumed = self.pos;
        if consumed > 0 {
            self.buf.advance(consumed);
            self.pos = 0;
        }
        consumed
    }

    /// Clears all buffered bytes and resets the read position.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    fn ensure_bytes(&self, requested: usize) -> CursorResult<()> {
        let available = self.bytes_remaining();
        if requested > available {
            return Err(CursorError::ShortRead {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> CursorResult<[u8; N]> {
        self.ensure_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cursor() {
        let cursor = ByteCursor::new();
        assert!(cursor.is_empty());
        assert_eq!(cursor.bytes_remaining(), 0);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut cursor = ByteCursor::new();
        let err = cursor.read_u8().unwrap_err();
        assert_eq!(
            err,
            CursorError::ShortRead {
                requested: 1,
                available: 0
            }
        );
    }

    #[test]
    fn append_does_not_move_position() {
        let mut cursor = ByteCursor::new();
        cursor.append(&[1, 2]);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        cursor.append(&[3]);
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.bytes_remaining(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 3);
    }

    #[test]
    fn read_integers_in_both_orders() {
        let mut cursor = ByteCursor::new();
        cursor.append(&[0x34, 0x12, 0x12, 0x34, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(cursor.read_u16(ByteOrder::Little).unwrap(), 0x1234);
        assert_eq!(cursor.read_u16(ByteOrder::Big).unwrap(), 0x1234);
        assert_eq!(cursor.read_u32(ByteOrder::Little).unwrap(), 0x1234_5678);
        assert_eq!(cursor.bytes_remaining(), 0);
    }

    #[test]
    fn short_integer_read_leaves_position() {
        let mut cursor = ByteCursor::new();
        cursor.append(&[0xAA, 0xBB, 0xCC]);
        let err = cursor.read_u32(ByteOrder::Little).unwrap_err();
        assert!(matches!(
            err,
            CursorError::ShortRead {
                requested: 4,
                available: 3
            }
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_bytes_copies_range() {
        let mut cursor = ByteCursor::new();
        cursor.append(b"hello world");
        cursor.seek(6).unwrap();
        assert_eq!(&cursor.read_bytes(5).unwrap()[..], b"world");
        assert_eq!(&cursor.read_bytes(0).unwrap()[..], b"");
    }

    #[test]
    fn seek_backwards_and_bounds() {
        let mut cursor = ByteCursor::new();
        cursor.append(&[1, 2, 3]);
        cursor.seek(3).unwrap();
        cursor.seek(-2).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 2);

        assert!(matches!(
            cursor.seek(-3),
            Err(CursorError::SeekOutOfRange { .. })
        ));
        assert!(matches!(
            cursor.seek(2),
            Err(CursorError::SeekOutOfRange { .. })
        ));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn compact_drops_consumed_prefix() {
        let mut cursor = ByteCursor::new();
        cursor.append(&[1, 2, 3, 4]);
        cursor.seek(3).unwrap();
        assert_eq!(cursor.compact(), 3);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.read_u8().unwrap(), 4);
        assert_eq!(cursor.compact(), 1);
        assert!(cursor.is_empty());
    }

    #[test]
    fn clear_resets() {
        let mut cursor = ByteCursor::with_capacity(16);
        cursor.append(&[9, 9]);
        cursor.read_u8().unwrap();
        cursor.clear();
        assert!(cursor.is_empty());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn remaining_slice_is_unread_tail() {
        let mut cursor = ByteCursor::new();
        cursor.append(&[7, 8, 9]);
        cursor.read_u8().unwrap();
        assert_eq!(cursor.remaining_slice(), &[8, 9]);
    }
}
