// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type for verification failures.
//!
//! Every variant is terminal: the first failure aborts the run and the
//! caller must refuse to expose the buffer at all. There is no multi-error
//! reporting and no recovery short of re-running verification from scratch
//! on a corrected buffer. Variants carry the failing position where one
//! exists, because "rejected" without a byte offset is useless in a bug
//! report.

use std::fmt;

use crate::scalar::ScalarKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// A verification failure. Exactly one is reported per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// Buffer capacity is at or beyond the format's 2^31 ceiling.
    ExceedsMaxSizeAllowed { capacity: u64 },
    /// Alignment checking is on and the absolute address of `position`
    /// is not a multiple of the kind's required alignment.
    MisalignedPointer { position: u32, kind: ScalarKind },
    /// The end of a requested access range falls past the buffer.
    /// `position` is the computed end of the range.
    OutOfBounds { position: u64, capacity: u32 },
    /// Cumulative claimed bytes exceed the configured ceiling.
    ApparentSizeTooLarge { claimed: u32, limit: u32 },
    /// A signed relative offset overflowed or resolved outside the buffer.
    SignedOffsetOutOfBounds { offset: i32, position: u32 },
    /// More tables visited than the configured ceiling.
    MaximumTables { limit: usize },
    /// Deeper live nesting than the configured ceiling.
    MaximumDepth { limit: usize },
    /// Buffer too small to hold a root offset plus a file identifier.
    BufferTooSmallForID { capacity: u32 },
    /// File identifier bytes differ from the expected identifier.
    IdentifierMismatch { expected: [u8; 4], found: [u8; 4] },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::ExceedsMaxSizeAllowed { capacity } => {
                write!(f, "buffer capacity {} exceeds format maximum 2^31", capacity)
            }
            VerifyError::MisalignedPointer { position, kind } => {
                write!(f, "misaligned {} read at position {}", kind, position)
            }
            VerifyError::OutOfBounds { position, capacity } => {
                write!(
                    f,
                    "access range ends at {} but buffer capacity is {}",
                    position, capacity
                )
            }
            VerifyError::ApparentSizeTooLarge { claimed, limit } => {
                write!(
                    f,
                    "apparent size {} exceeds configured limit {}",
                    claimed, limit
                )
            }
            VerifyError::SignedOffsetOutOfBounds { offset, position } => {
                write!(
                    f,
                    "relative offset {} at position {} resolves outside the buffer",
                    offset, position
                )
            }
            VerifyError::MaximumTables { limit } => {
                write!(f, "table count exceeds configured limit {}", limit)
            }
            VerifyError::MaximumDepth { limit } => {
                write!(f, "nesting depth exceeds configured limit {}", limit)
            }
            VerifyError::BufferTooSmallForID { capacity } => {
                write!(
                    f,
                    "buffer capacity {} is too small to hold a file identifier",
                    capacity
                )
            }
            VerifyError::IdentifierMismatch { expected, found } => {
                write!(
                    f,
                    "file identifier mismatch: expected {:?}, found {:?}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for VerifyError {}
