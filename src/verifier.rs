// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verifier core: bounds, alignment, and offset-dereference primitives.
//!
//! A `Verifier` binds one buffer, one immutable set of limits, and one
//! mutable `SessionState` for the whole recursive descent. The buffer is
//! treated as fully adversarial: nothing downstream performs a read the
//! primitives here have not already proven in-bounds, aligned, and within
//! the structural budgets.
//!
//! Three budgets defend against crafted input independently of raw buffer
//! size:
//!
//! - `max_depth` bounds live nesting. Recursion depth in the host stack
//!   mirrors `depth`, so this also prevents stack overflow from deeply
//!   nested tables.
//! - `max_tables` bounds total traversal work.
//! - `max_apparent_size` bounds the cumulative bytes all validated ranges
//!   claim. Shared vtables make it possible for a small buffer to describe
//!   an implausibly large decoded structure; this budget rejects that
//!   amplification before it becomes the caller's problem.
//!
//! One verification is in flight per `Verifier` at a time. `reset()`
//! permits cheap reuse on the same buffer between independent runs.

use crate::buffer::TableBuffer;
use crate::cursor::TableCursor;
use crate::error::{Result, VerifyError};
use crate::options::VerifierOptions;
use crate::scalar::ScalarKind;

/// Absolute format ceiling on buffer capacity (2^31 bytes).
pub const MAX_BUFFER_CAPACITY: u64 = 1 << 31;

/// Byte width of the 4-byte file identifier that follows the root offset.
pub const FILE_IDENTIFIER_LENGTH: u32 = 4;

/// Mutable counters shared by every step of one verification run.
///
/// Created once per `Verifier` and threaded by `&mut` through the whole
/// recursive descent; there is exactly one instance per run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionState {
    capacity: u32,
    depth: usize,
    num_tables: usize,
    apparent_size: u32,
}

impl SessionState {
    fn new(capacity: u32) -> Self {
        Self {
            capacity,
            depth: 0,
            num_tables: 0,
            apparent_size: 0,
        }
    }
}

/// Structural verifier for one table buffer.
pub struct Verifier<'a> {
    buf: TableBuffer<'a>,
    opts: VerifierOptions,
    check_alignment: bool,
    state: SessionState,
}

/// Resolve a stored signed relative offset against its own position.
///
/// The format's sign convention: a positive stored offset points backward
/// (`position - offset`), zero or negative points forward
/// (`position + |offset|`). Both operands are treated as unsigned 32-bit
/// magnitudes; `None` means the arithmetic wrapped.
pub(crate) fn resolve_relative(position: u32, stored: i32) -> Option<u32> {
    if stored > 0 {
        position.checked_sub(stored as u32)
    } else {
        position.checked_add(stored.unsigned_abs())
    }
}

impl<'a> Verifier<'a> {
    /// Create a verifier over `buf` with the given limits.
    ///
    /// Fails with `ExceedsMaxSizeAllowed` if the buffer is at or beyond the
    /// format's 2^31-byte ceiling. This is the only capacity check needed:
    /// every later position fits in a `u32` once it holds.
    pub fn new(
        buf: TableBuffer<'a>,
        opts: VerifierOptions,
        check_alignment: bool,
    ) -> Result<Self> {
        let capacity = buf.capacity() as u64;
        if capacity >= MAX_BUFFER_CAPACITY {
            return Err(VerifyError::ExceedsMaxSizeAllowed { capacity });
        }
        Ok(Self {
            buf,
            opts,
            check_alignment,
            state: SessionState::new(capacity as u32),
        })
    }

    /// Re-zero `depth` and the table count for a fresh run on the same
    /// buffer.
    ///
    /// The apparent-size budget deliberately persists across runs: repeated
    /// verification of one buffer keeps drawing down the same budget.
    pub fn reset(&mut self) {
        self.state.depth = 0;
        self.state.num_tables = 0;
    }

    /// Buffer capacity fixed at construction.
    pub fn capacity(&self) -> u32 {
        self.state.capacity
    }

    /// Number of currently-open table visitations.
    pub fn depth(&self) -> usize {
        self.state.depth
    }

    /// Total tables visited so far in this run.
    pub fn tables_visited(&self) -> usize {
        self.state.num_tables
    }

    /// Cumulative bytes claimed in-bounds so far.
    pub fn apparent_size(&self) -> u32 {
        self.state.apparent_size
    }

    fn out_of_bounds(&self, end: u64) -> VerifyError {
        VerifyError::OutOfBounds {
            position: end,
            capacity: self.state.capacity,
        }
    }

    /// Check the absolute address of `position` against the kind's required
    /// alignment. No-op when alignment checking is disabled.
    ///
    /// Assumes the backing storage's own base address is maximally aligned;
    /// see the contract on [`TableBuffer`].
    pub fn is_aligned(&self, position: u32, kind: ScalarKind) -> Result<()> {
        if !self.check_alignment {
            return Ok(());
        }
        let address = self.buf.address_of(position);
        if address % kind.alignment() as usize != 0 {
            return Err(VerifyError::MisalignedPointer { position, kind });
        }
        Ok(())
    }

    /// Prove `[position, position + size)` lies inside the buffer and charge
    /// `size` against the apparent-size budget.
    ///
    /// This is the sole choke point accumulating claimed bytes, so every
    /// range a caller validates passes through here exactly once.
    pub fn range_in_buffer(&mut self, position: u32, size: u64) -> Result<()> {
        let end = u64::from(position).saturating_add(size);
        if end > u64::from(self.state.capacity) {
            return Err(self.out_of_bounds(end));
        }
        self.state.apparent_size = self.state.apparent_size.wrapping_add(size as u32);
        if self.state.apparent_size > self.opts.max_apparent_size {
            return Err(VerifyError::ApparentSizeTooLarge {
                claimed: self.state.apparent_size,
                limit: self.opts.max_apparent_size,
            });
        }
        Ok(())
    }

    /// Alignment plus bounds for one value of `kind` at `position`.
    pub fn in_buffer(&mut self, position: u32, kind: ScalarKind) -> Result<()> {
        self.is_aligned(position, kind)?;
        self.range_in_buffer(position, u64::from(kind.size()))
    }

    /// Checked read of a `u8` value.
    ///
    /// Each `read_*_checked` method fixes its own [`ScalarKind`], so the
    /// bytes budgeted always equal the bytes read.
    pub fn read_u8_checked(&mut self, position: u32) -> Result<u8> {
        self.in_buffer(position, ScalarKind::U8)?;
        self.buf
            .read_u8(position)
            .ok_or_else(|| self.out_of_bounds(u64::from(position) + 1))
    }

    /// Checked read of a little-endian `u16` value (field slots, vtable
    /// lengths).
    pub fn read_u16_checked(&mut self, position: u32) -> Result<u16> {
        self.in_buffer(position, ScalarKind::VOffset)?;
        self.buf
            .read_u16(position)
            .ok_or_else(|| self.out_of_bounds(u64::from(position) + 2))
    }

    /// Checked read of a little-endian `u32` value (length prefixes).
    pub fn read_u32_checked(&mut self, position: u32) -> Result<u32> {
        self.in_buffer(position, ScalarKind::UOffset)?;
        self.buf
            .read_u32(position)
            .ok_or_else(|| self.out_of_bounds(u64::from(position) + 4))
    }

    /// Checked read of a little-endian `i32` value (signed offsets).
    pub fn read_i32_checked(&mut self, position: u32) -> Result<i32> {
        self.in_buffer(position, ScalarKind::SOffset)?;
        self.buf
            .read_i32(position)
            .ok_or_else(|| self.out_of_bounds(u64::from(position) + 4))
    }

    /// Dereference the signed relative offset stored at `position`.
    ///
    /// Every indirect reference — table, vector, string, union value —
    /// resolves through this one function, so its sign and overflow handling
    /// are the last line of defense before any raw read downstream.
    pub fn deref_offset(&mut self, position: u32) -> Result<u32> {
        let stored = self.read_i32_checked(position)?;
        let absolute = resolve_relative(position, stored)
            .filter(|&abs| u64::from(abs) <= u64::from(self.state.capacity))
            .ok_or(VerifyError::SignedOffsetOutOfBounds {
                offset: stored,
                position,
            })?;
        Ok(absolute)
    }

    /// Begin verifying the table whose base sits at `table_pos`.
    ///
    /// Dereferences the table's vtable, validates the vtable's own length
    /// prefix and range, and charges one unit of table count and one unit of
    /// depth. The returned cursor releases the depth unit when it goes out
    /// of scope, on success and failure paths alike.
    pub fn visit_table(&mut self, table_pos: u32) -> Result<TableCursor<'_, 'a>> {
        let vtable_pos = self.deref_offset(table_pos)?;
        let vtable_len = self.read_u16_checked(vtable_pos)?;
        // vtable_pos <= capacity < 2^31 and vtable_len < 2^16: no overflow.
        self.is_aligned(vtable_pos + u32::from(vtable_len), ScalarKind::VOffset)?;
        self.range_in_buffer(vtable_pos, u64::from(vtable_len))?;

        if self.state.num_tables >= self.opts.max_tables {
            return Err(VerifyError::MaximumTables {
                limit: self.opts.max_tables,
            });
        }
        self.state.num_tables += 1;

        if self.state.depth >= self.opts.max_depth {
            return Err(VerifyError::MaximumDepth {
                limit: self.opts.max_depth,
            });
        }
        self.state.depth += 1;

        Ok(TableCursor::new(self, table_pos, vtable_pos, vtable_len))
    }

    /// Dereference the root offset at position 0 and visit the root table.
    pub fn verify_root(&mut self) -> Result<TableCursor<'_, 'a>> {
        let root = self.deref_offset(0)?;
        self.visit_table(root)
    }

    /// Check the 4-byte file identifier stored immediately after the root
    /// offset.
    pub fn verify_identifier(&mut self, expected: &[u8; 4]) -> Result<()> {
        let id_pos = ScalarKind::UOffset.size();
        if self.state.capacity < id_pos + FILE_IDENTIFIER_LENGTH {
            return Err(VerifyError::BufferTooSmallForID {
                capacity: self.state.capacity,
            });
        }
        let found = self
            .buf
            .identifier(id_pos)
            .ok_or_else(|| self.out_of_bounds(u64::from(id_pos + FILE_IDENTIFIER_LENGTH)))?;
        if found != *expected {
            return Err(VerifyError::IdentifierMismatch {
                expected: *expected,
                found,
            });
        }
        Ok(())
    }

    pub(crate) fn release_depth(&mut self) {
        self.state.depth = self.state.depth.saturating_sub(1);
    }
}


// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================
//
// Offset resolution is the last line of defense before any raw read is
// permitted downstream, so it gets mathematical certainty rather than test
// coverage. Run with: cargo kani

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// resolve_relative never panics and never wraps silently.
    #[kani::proof]
    fn verify_resolve_relative_no_panic() {
        let position: u32 = kani::any();
        let stored: i32 = kani::any();

        match resolve_relative(position, stored) {
            Some(absolute) => {
                // The inverse law: resolving must be exact, not approximate.
                if stored > 0 {
                    kani::assert(
                        u64::from(absolute) + (stored as u32 as u64) == u64::from(position),
                        "backward resolution must invert the stored offset",
                    );
                } else {
                    kani::assert(
                        u64::from(position) + u64::from(stored.unsigned_abs())
                            == u64::from(absolute),
                        "forward resolution must invert the stored offset",
                    );
                }
            }
            None => {
                // Rejection must only happen on genuine wraparound.
                if stored > 0 {
                    kani::assert(
                        (stored as u32) > position,
                        "backward rejection requires offset larger than position",
                    );
                } else {
                    kani::assert(
                        u64::from(position) + u64::from(stored.unsigned_abs()) > u64::from(u32::MAX),
                        "forward rejection requires 32-bit overflow",
                    );
                }
            }
        }
    }

    /// i32::MIN, the one magnitude that has no i32 negation, must resolve.
    #[kani::proof]
    fn verify_resolve_relative_min_magnitude() {
        let position: u32 = kani::any();
        kani::assume(position == 0);
        kani::assert(
            resolve_relative(position, i32::MIN) == Some(1u32 << 31),
            "i32::MIN magnitude must not panic or wrap",
        );
    }
}
