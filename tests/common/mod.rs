//! Shared test utilities: little-endian buffer construction.

#![allow(dead_code)]

// ============================================================================
// OFFSET CONVENTION
// ============================================================================

/// Stored signed offset that makes a dereference at `from` resolve to `to`.
///
/// Positive points backward (`from - stored`), zero or negative points
/// forward (`from + |stored|`).
pub fn soffset(from: u32, to: u32) -> i32 {
    if to <= from {
        (from - to) as i32
    } else {
        -((to - from) as i32)
    }
}

// ============================================================================
// BUFFER BUILDER
// ============================================================================

/// Append-and-patch builder for hand-laid table buffers.
#[derive(Default)]
pub struct BufferBuilder {
    bytes: Vec<u8>,
}

impl BufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(&self) -> u32 {
        self.bytes.len() as u32
    }

    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    pub fn push_bytes(&mut self, value: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(value);
        self
    }

    pub fn push_u16(&mut self, value: u16) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn push_i32(&mut self, value: i32) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Zero-pad until the buffer is `pos` bytes long.
    pub fn pad_to(&mut self, pos: u32) -> &mut Self {
        assert!(pos as usize >= self.bytes.len(), "pad_to going backwards");
        self.bytes.resize(pos as usize, 0);
        self
    }

    pub fn put_i32_at(&mut self, pos: u32, value: i32) -> &mut Self {
        let p = pos as usize;
        self.bytes[p..p + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_u16_at(&mut self, pos: u32, value: u16) -> &mut Self {
        let p = pos as usize;
        self.bytes[p..p + 2].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

// ============================================================================
// ALIGNED STORAGE
// ============================================================================

/// A copy of a buffer whose base address is 8-byte aligned.
///
/// `Vec<u8>` promises nothing about its base address, and the verifier's
/// alignment checks are absolute. Tests that enable alignment checking go
/// through this wrapper.
pub struct AlignedBytes {
    storage: Vec<u8>,
    start: usize,
    len: usize,
}

impl AlignedBytes {
    pub fn new(bytes: &[u8]) -> Self {
        let mut storage = vec![0u8; bytes.len() + 8];
        let addr = storage.as_ptr() as usize;
        let start = (8 - addr % 8) % 8;
        storage[start..start + bytes.len()].copy_from_slice(bytes);
        Self {
            storage,
            start,
            len: bytes.len(),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage[self.start..self.start + self.len]
    }
}

// ============================================================================
// CANNED BUFFERS
// ============================================================================

/// Root vtable slot layout used by [`monster_buffer`].
pub const SLOT_SCALAR: u16 = 0;
pub const SLOT_STRING: u16 = 1;
pub const SLOT_VECTOR: u16 = 2;
pub const SLOT_TABLE: u16 = 3;
pub const SLOT_UNION_TYPE: u16 = 4;
pub const SLOT_UNION_VALUE: u16 = 5;

/// A buffer exercising one of everything: an inline u16 scalar, a string,
/// a u32 vector, a nested table, and a union (type + table value).
///
/// Layout (88 bytes, all fields naturally aligned relative to the base):
///
/// ```text
///  0..4   root offset -> table at 60
///  4..8   identifier "MONS"
///  8..24  root vtable: len 16, table size 28, slots at +4 +8 +12 +16 +20 +24
/// 24..28  child vtable: len 4, table size 4
/// 28..32  child table -> child vtable
/// 32..42  string: len 5, "hello\0"
/// 44..60  vector: len 3, elements [1, 2, 3]
/// 60..88  root table: vtable ref + inline fields
/// ```
pub fn monster_buffer() -> Vec<u8> {
    let mut b = BufferBuilder::new();
    b.push_i32(soffset(0, 60));
    b.push_bytes(b"MONS");
    // root vtable
    b.push_u16(16); // vtable length
    b.push_u16(28); // table byte size
    b.push_u16(4); // scalar
    b.push_u16(8); // string
    b.push_u16(12); // vector
    b.push_u16(16); // nested table
    b.push_u16(20); // union type
    b.push_u16(24); // union value
    // child vtable + child table
    b.push_u16(4);
    b.push_u16(4);
    b.push_i32(soffset(28, 24));
    // string
    b.push_u32(5);
    b.push_bytes(b"hello\0");
    b.pad_to(44);
    // vector
    b.push_u32(3);
    b.push_u32(1);
    b.push_u32(2);
    b.push_u32(3);
    // root table
    b.push_i32(soffset(60, 8));
    b.push_u16(0xBEEF);
    b.pad_to(68);
    b.push_i32(soffset(68, 32)); // string ref
    b.push_i32(soffset(72, 44)); // vector ref
    b.push_i32(soffset(76, 28)); // nested table ref
    b.push_u8(1); // union discriminant
    b.pad_to(84);
    b.push_i32(soffset(84, 28)); // union value ref
    b.finish()
}

/// A buffer whose root table holds one vector of two table offsets.
pub fn table_vector_buffer() -> Vec<u8> {
    let mut b = BufferBuilder::new();
    b.push_i32(soffset(0, 36));
    b.push_bytes(b"MONS");
    // child vtable + child table
    b.push_u16(4);
    b.push_u16(4);
    b.push_i32(soffset(12, 8));
    // vector of two offsets, both to the child table at 12
    b.push_u32(2);
    b.push_i32(soffset(20, 12));
    b.push_i32(soffset(24, 12));
    // root vtable
    b.push_u16(6);
    b.push_u16(8);
    b.push_u16(4);
    b.pad_to(36);
    // root table
    b.push_i32(soffset(36, 28));
    b.push_i32(soffset(40, 16));
    b.finish()
}

/// Minimal buffer: identifier plus an empty table (no fields).
pub fn empty_table_buffer() -> Vec<u8> {
    let mut b = BufferBuilder::new();
    b.push_i32(soffset(0, 12));
    b.push_bytes(b"MONS");
    b.push_u16(4);
    b.push_u16(4);
    b.push_i32(soffset(12, 8));
    b.finish()
}
