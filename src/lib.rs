// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural verifier for a zero-copy binary table format.
//!
//! Before any field of a received buffer is trusted and exposed through
//! typed accessors, this crate proves that every access those accessors
//! will ever perform is in-bounds, properly aligned, and structurally
//! bounded. The buffer is treated as fully adversarial: malformed,
//! truncated, or crafted for out-of-bounds reads, stack overflow via deep
//! nesting, or quadratic-blowup denial of service. The verifier accepts or
//! rejects, fast and fail-closed — it never mutates, decodes, or repairs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  scalar.rs  │────▶│ verifier.rs  │────▶│  cursor.rs  │
//! │ (ScalarKind │     │ (Verifier,   │     │ (TableCursor│
//! │  size/align)│     │ SessionState)│     │  per table) │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │              buffer.rs / error.rs                    │
//! │  (TableBuffer checkable reads, VerifyError with     │
//! │   failing positions)                                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! Generated field accessors drive the cursor; a hand-written root check
//! looks like this:
//!
//! ```
//! use tabcheck::{ScalarKind, TableBuffer, Verifier, VerifierOptions};
//!
//! fn check(bytes: &[u8]) -> tabcheck::Result<()> {
//!     let mut verifier = Verifier::new(
//!         TableBuffer::new(bytes),
//!         VerifierOptions::default(),
//!         false,
//!     )?;
//!     let mut root = verifier.verify_root()?;
//!     root.scalar_field(0, ScalarKind::U16)?;
//!     root.string_field(1)?;
//!     root.finish();
//!     Ok(())
//! }
//! # let _ = check;
//! ```
//!
//! One `Verifier` runs one verification at a time, single-threaded and
//! fully synchronous. `reset()` permits reuse on the same buffer between
//! independent runs; a fresh `Verifier` is required per buffer.

// Module declarations
mod buffer;
mod cursor;
mod error;
mod options;
mod scalar;
mod verifier;

// Re-exports for public API
pub use buffer::TableBuffer;
pub use cursor::TableCursor;
pub use error::{Result, VerifyError};
pub use options::{
    VerifierOptions, DEFAULT_MAX_APPARENT_SIZE, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TABLES,
};
pub use scalar::ScalarKind;
pub use verifier::{Verifier, FILE_IDENTIFIER_LENGTH, MAX_BUFFER_CAPACITY};
