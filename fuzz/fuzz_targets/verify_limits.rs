// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Verification with fuzzer-chosen resource limits.
//!
//! The budgets are part of the attack surface: a tiny max_depth or a
//! max_apparent_size of zero must fail closed, never underflow or panic.
//! The fuzzer picks both the buffer and the limits.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabcheck::{Result, TableBuffer, Verifier, VerifierOptions};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    max_depth: u8,
    max_tables: u16,
    max_apparent_size: u32,
    check_alignment: bool,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let opts = VerifierOptions::new()
        .with_max_depth(input.max_depth as usize)
        .with_max_tables(input.max_tables as usize)
        .with_max_apparent_size(input.max_apparent_size);

    let Ok(mut v) = Verifier::new(TableBuffer::new(input.data), opts, input.check_alignment)
    else {
        return;
    };

    let outcome: Result<()> = (|| {
        let mut root = v.verify_root()?;
        if let Some(nested) = root.table_field(0)? {
            let mut inner = nested;
            if let Some(deeper) = inner.table_field(0)? {
                deeper.finish();
            }
            inner.finish();
        }
        root.table_vector_field(1)?;
        Ok(())
    })();
    let _ = outcome;

    assert_eq!(v.depth(), 0);
});
