// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-only view over the bytes under verification.
//!
//! The buffer never decides whether a read is *safe* — that is the
//! verifier's job. It only provides checkable little-endian reads: every
//! accessor returns `None` instead of panicking when the requested range
//! does not exist, so a verifier bug downgrades to a rejected buffer
//! instead of a crash.
//!
//! # Alignment contract
//!
//! Alignment checks use the absolute address of the backing storage, not a
//! buffer-relative offset. The caller must hand in storage whose base
//! address is aligned to the largest scalar in the schema (8 bytes covers
//! everything this format defines). A `Vec<u8>` gives no such guarantee;
//! callers that enable alignment checking should allocate accordingly.

/// Fixed-capacity, read-only byte region holding one table buffer.
#[derive(Debug, Clone, Copy)]
pub struct TableBuffer<'a> {
    bytes: &'a [u8],
}

impl<'a> TableBuffer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Total number of bytes in the buffer.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Absolute address of `position` within the backing storage.
    ///
    /// Used only for alignment checking; see the module docs for the
    /// base-address contract.
    pub fn address_of(&self, position: u32) -> usize {
        (self.bytes.as_ptr() as usize).wrapping_add(position as usize)
    }

    fn fixed<const N: usize>(&self, position: u32) -> Option<[u8; N]> {
        let start = position as usize;
        let end = start.checked_add(N)?;
        self.bytes.get(start..end)?.try_into().ok()
    }

    pub fn read_u8(&self, position: u32) -> Option<u8> {
        self.fixed::<1>(position).map(|[b]| b)
    }

    pub fn read_u16(&self, position: u32) -> Option<u16> {
        self.fixed(position).map(u16::from_le_bytes)
    }

    pub fn read_u32(&self, position: u32) -> Option<u32> {
        self.fixed(position).map(u32::from_le_bytes)
    }

    pub fn read_i32(&self, position: u32) -> Option<i32> {
        self.fixed(position).map(i32::from_le_bytes)
    }

    pub fn read_u64(&self, position: u32) -> Option<u64> {
        self.fixed(position).map(u64::from_le_bytes)
    }

    /// The 4-byte file identifier starting at `position`.
    pub fn identifier(&self, position: u32) -> Option<[u8; 4]> {
        self.fixed(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_little_endian() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0xFF, 0xFF, 0xFF, 0xFF];
        let buf = TableBuffer::new(&bytes);
        assert_eq!(buf.read_u16(0), Some(0x0201));
        assert_eq!(buf.read_u32(0), Some(0x0403_0201));
        assert_eq!(buf.read_i32(4), Some(-1));
    }

    #[test]
    fn reads_past_the_end_return_none() {
        let bytes = [0u8; 4];
        let buf = TableBuffer::new(&bytes);
        assert_eq!(buf.read_u32(1), None);
        assert_eq!(buf.read_u8(4), None);
        assert_eq!(buf.read_u64(0), None);
    }

    #[test]
    fn reads_near_position_max_do_not_overflow() {
        let bytes = [0u8; 4];
        let buf = TableBuffer::new(&bytes);
        assert_eq!(buf.read_u32(u32::MAX), None);
        assert_eq!(buf.read_u32(u32::MAX - 3), None);
    }

    #[test]
    fn identifier_is_a_plain_byte_window() {
        let bytes = *b"\0\0\0\0MONS";
        let buf = TableBuffer::new(&bytes);
        assert_eq!(buf.identifier(4), Some(*b"MONS"));
        assert_eq!(buf.identifier(6), None);
    }
}
