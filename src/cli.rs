// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tabcheck",
    about = "Fail-closed structural verifier for zero-copy table buffers",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify a buffer file without a schema (root + vtable structure)
    Check {
        /// Path to the buffer file
        file: String,

        /// Expected 4-byte file identifier (e.g. MONS)
        #[arg(long)]
        id: Option<String>,

        /// JSON file with verification limits (max_depth, max_tables,
        /// max_apparent_size)
        #[arg(long)]
        limits: Option<String>,

        /// Override the nesting depth ceiling
        #[arg(long)]
        max_depth: Option<usize>,

        /// Override the table count ceiling
        #[arg(long)]
        max_tables: Option<usize>,

        /// Override the apparent size ceiling in bytes
        #[arg(long)]
        max_apparent_size: Option<u32>,

        /// Disable alignment checking
        #[arg(long)]
        no_align: bool,
    },

    /// Print the root structure of a buffer file
    Inspect {
        /// Path to the buffer file
        file: String,
    },
}
