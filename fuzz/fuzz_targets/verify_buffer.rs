// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Whole-buffer verification under adversarial input.
//!
//! If someone hands the verifier a crafted buffer, the worst case should be
//! an error value, not a crash. This target hammers the root walk with
//! garbage bytes, including offsets that point at themselves, vtables that
//! claim more slots than exist, and lengths near u32::MAX. None of it should
//! panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabcheck::{Result, ScalarKind, TableBuffer, Verifier, VerifierOptions};

/// Every path through the root walk must terminate safely.
///
/// The fuzzer will find the edge cases you didn't think about:
/// self-referential tables, backward offsets larger than their position,
/// vector lengths that multiply past 32 bits. If any of these panic instead
/// of returning Err, that's a bug worth fixing before production.
fuzz_target!(|data: &[u8]| {
    let Ok(mut v) = Verifier::new(TableBuffer::new(data), VerifierOptions::default(), false)
    else {
        return;
    };

    let _ = v.verify_identifier(b"MONS");

    let outcome: Result<()> = (|| {
        let mut root = v.verify_root()?;
        for slot in 0..root.slot_count() {
            root.scalar_field(slot, ScalarKind::U8)?;
            let _ = root.string_field(slot);
            let _ = root.vector_field(slot, ScalarKind::U32);
            if let Some(nested) = root.table_field(slot)? {
                nested.finish();
            }
        }
        Ok(())
    })();
    let _ = outcome;

    // Depth always unwinds, accepted or not.
    assert_eq!(v.depth(), 0);
});
