// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Verification limits.
//!
//! Defaults are sized for real-world buffers while keeping crafted input
//! cheap to reject: 64 levels of nesting bounds both logical depth and host
//! stack usage, a million tables bounds traversal work, and the apparent
//! size budget caps the total bytes a buffer may claim regardless of how
//! small the buffer itself is.

use serde::Deserialize;

/// Default ceiling on live nested-table visitations.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default ceiling on total tables visited per run.
pub const DEFAULT_MAX_TABLES: usize = 1_000_000;

/// Default ceiling on cumulative claimed bytes (the format's size ceiling).
pub const DEFAULT_MAX_APPARENT_SIZE: u32 = i32::MAX as u32;

/// Immutable verification limits, fixed for the lifetime of a `Verifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerifierOptions {
    /// Ceiling on live nested-table visitations.
    pub max_depth: usize,
    /// Ceiling on total tables visited across one run.
    pub max_tables: usize,
    /// Ceiling on cumulative bytes claimed in-bounds during one run.
    pub max_apparent_size: u32,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_tables: DEFAULT_MAX_TABLES,
            max_apparent_size: DEFAULT_MAX_APPARENT_SIZE,
        }
    }
}

impl VerifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_tables(mut self, max_tables: usize) -> Self {
        self.max_tables = max_tables;
        self
    }

    pub fn with_max_apparent_size(mut self, max_apparent_size: u32) -> Self {
        self.max_apparent_size = max_apparent_size;
        self
    }
}
