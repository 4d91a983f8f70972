// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fixed-width kinds a table buffer can contain.
//!
//! Every read the verifier approves is a read of one of these kinds. Each
//! kind knows its own byte size and required alignment, so there is no
//! generic "size of T" machinery anywhere: the complete set of shapes the
//! format allows is this enum, nothing else.
//!
//! The three offset kinds mirror the format's reference machinery:
//! `UOffset` (u32) prefixes vectors and strings, `SOffset` (i32) is the
//! signed relative offset used for every indirect reference, and `VOffset`
//! (u16) is a field slot inside a vtable.

use std::fmt;

/// A fixed-width scalar or offset kind defined by the table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    /// Unsigned 32-bit offset (vector/string length prefix width).
    UOffset,
    /// Signed 32-bit relative offset (table and indirect references).
    SOffset,
    /// Unsigned 16-bit vtable slot offset.
    VOffset,
}

impl ScalarKind {
    /// Byte size of a value of this kind.
    pub const fn size(self) -> u32 {
        match self {
            ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 | ScalarKind::VOffset => 2,
            ScalarKind::U32
            | ScalarKind::I32
            | ScalarKind::F32
            | ScalarKind::UOffset
            | ScalarKind::SOffset => 4,
            ScalarKind::U64 | ScalarKind::I64 | ScalarKind::F64 => 8,
        }
    }

    /// Required alignment. The format aligns every scalar to its own size.
    pub const fn alignment(self) -> u32 {
        self.size()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::U8 => "u8",
            ScalarKind::I8 => "i8",
            ScalarKind::U16 => "u16",
            ScalarKind::I16 => "i16",
            ScalarKind::U32 => "u32",
            ScalarKind::I32 => "i32",
            ScalarKind::U64 => "u64",
            ScalarKind::I64 => "i64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::UOffset => "uoffset",
            ScalarKind::SOffset => "soffset",
            ScalarKind::VOffset => "voffset",
        };
        write!(f, "{}", name)
    }
}
