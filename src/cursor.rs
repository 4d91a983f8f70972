// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-table verification cursor.
//!
//! `visit_table` charges one unit of nesting depth; the cursor returned by
//! it releases that unit when it goes out of scope. Release happens on
//! every exit path — normal completion, `?` propagation, panic unwind — so
//! the depth counter can never desynchronize from the live nesting the way
//! a forget-to-call-finish API allows.
//!
//! The cursor borrows the verifier mutably, which also makes the visitation
//! discipline a compile-time fact: a parent table cannot be touched while a
//! nested cursor is alive, so `depth` is always the true LIFO count of open
//! visitations.
//!
//! The slot methods here are the contract generated field accessors program
//! against: look a field up in the vtable, then hand its position to the
//! check matching the field's schema type.

use crate::error::Result;
use crate::scalar::ScalarKind;
use crate::verifier::Verifier;

/// Bytes before the first field slot: the vtable's own length plus the
/// table's inline byte size, one u16 each.
const VTABLE_HEADER_BYTES: u32 = 4;

/// Byte width of one vtable field slot.
const SLOT_SIZE: u32 = 2;

/// Scopes the verification of one table's fields.
pub struct TableCursor<'v, 'buf> {
    verifier: &'v mut Verifier<'buf>,
    table_pos: u32,
    vtable_pos: u32,
    vtable_len: u16,
}

impl<'v, 'buf> TableCursor<'v, 'buf> {
    pub(crate) fn new(
        verifier: &'v mut Verifier<'buf>,
        table_pos: u32,
        vtable_pos: u32,
        vtable_len: u16,
    ) -> Self {
        Self {
            verifier,
            table_pos,
            vtable_pos,
            vtable_len,
        }
    }

    /// Base position of the table under verification.
    pub fn table_position(&self) -> u32 {
        self.table_pos
    }

    /// Position of this table's vtable.
    pub fn vtable_position(&self) -> u32 {
        self.vtable_pos
    }

    /// The vtable's own length prefix.
    pub fn vtable_length(&self) -> u16 {
        self.vtable_len
    }

    /// Number of field slots this vtable declares.
    pub fn slot_count(&self) -> u16 {
        (self.vtable_len.saturating_sub(VTABLE_HEADER_BYTES as u16)) / SLOT_SIZE as u16
    }

    /// Look up a field's absolute position via its vtable slot.
    ///
    /// `None` means absent: either the vtable is too short to hold the slot
    /// (older schema revision) or the stored slot offset is zero (field not
    /// written).
    pub fn field_position(&mut self, slot: u16) -> Result<Option<u32>> {
        let entry = VTABLE_HEADER_BYTES + u32::from(slot) * SLOT_SIZE;
        if entry + SLOT_SIZE > u32::from(self.vtable_len) {
            return Ok(None);
        }
        let slot_offset = self.verifier.read_u16_checked(self.vtable_pos + entry)?;
        if slot_offset == 0 {
            return Ok(None);
        }
        // table_pos < 2^31 and slot_offset < 2^16: no overflow.
        Ok(Some(self.table_pos + u32::from(slot_offset)))
    }

    /// Check a scalar field. Returns whether the field was present.
    pub fn scalar_field(&mut self, slot: u16, kind: ScalarKind) -> Result<bool> {
        match self.field_position(slot)? {
            Some(pos) => {
                self.verifier.in_buffer(pos, kind)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check a nested-table field, returning a cursor for its fields.
    ///
    /// The nested cursor mutably borrows this one, so the parent cannot be
    /// used until the nested table's verification is finished.
    pub fn table_field(&mut self, slot: u16) -> Result<Option<TableCursor<'_, 'buf>>> {
        let Some(field_pos) = self.field_position(slot)? else {
            return Ok(None);
        };
        let table_pos = self.verifier.deref_offset(field_pos)?;
        self.verifier.visit_table(table_pos).map(Some)
    }

    /// Check a string field: length prefix, payload, and the NUL terminator
    /// byte the format appends after the payload. Returns presence.
    pub fn string_field(&mut self, slot: u16) -> Result<bool> {
        let Some(field_pos) = self.field_position(slot)? else {
            return Ok(false);
        };
        let string_pos = self.verifier.deref_offset(field_pos)?;
        let len = self.verifier.read_u32_checked(string_pos)?;
        let payload = string_pos + ScalarKind::UOffset.size();
        self.verifier
            .range_in_buffer(payload, u64::from(len) + 1)?;
        Ok(true)
    }

    /// Check a vector field of fixed-width elements.
    ///
    /// Returns the element count and validated payload base position so the
    /// caller can verify individual elements (e.g. nested tables) when the
    /// schema requires it.
    pub fn vector_field(
        &mut self,
        slot: u16,
        element: ScalarKind,
    ) -> Result<Option<(u32, u32)>> {
        let Some(field_pos) = self.field_position(slot)? else {
            return Ok(None);
        };
        let vector_pos = self.verifier.deref_offset(field_pos)?;
        let len = self.verifier.read_u32_checked(vector_pos)?;
        let payload = vector_pos + ScalarKind::UOffset.size();
        self.verifier.is_aligned(payload, element)?;
        self.verifier
            .range_in_buffer(payload, u64::from(len) * u64::from(element.size()))?;
        Ok(Some((len, payload)))
    }

    /// Check a vector of table offsets, visiting every element table.
    ///
    /// Each element dereferences through the verifier and gets a full table
    /// visit, so the structural budgets apply element by element.
    pub fn table_vector_field(&mut self, slot: u16) -> Result<Option<u32>> {
        let Some((len, payload)) = self.vector_field(slot, ScalarKind::SOffset)? else {
            return Ok(None);
        };
        for index in 0..len {
            let element_pos = payload + index * ScalarKind::SOffset.size();
            let table_pos = self.verifier.deref_offset(element_pos)?;
            let cursor = self.verifier.visit_table(table_pos)?;
            cursor.finish();
        }
        Ok(Some(len))
    }

    /// Check a union field: the type discriminant as a scalar plus the
    /// value as a nested table. Returns whether the value was present.
    pub fn union_field(&mut self, type_slot: u16, value_slot: u16) -> Result<bool> {
        self.scalar_field(type_slot, ScalarKind::U8)?;
        Ok(self.table_field(value_slot)?.is_some())
    }

    /// Complete this table's verification, releasing its depth unit.
    ///
    /// Dropping the cursor has the same effect; `finish` exists to make the
    /// release visible at call sites that want it explicit.
    pub fn finish(self) {}
}

impl Drop for TableCursor<'_, '_> {
    fn drop(&mut self) {
        self.verifier.release_depth();
    }
}
