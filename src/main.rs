// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::error::Error;
use std::fs;
use std::process;

use tabcheck::{ScalarKind, TableBuffer, Verifier, VerifierOptions};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Check {
            file,
            id,
            limits,
            max_depth,
            max_tables,
            max_apparent_size,
            no_align,
        } => run_check(
            &file,
            id.as_deref(),
            limits.as_deref(),
            max_depth,
            max_tables,
            max_apparent_size,
            no_align,
        ),
        Commands::Inspect { file } => run_inspect(&file),
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", badge(false, atty::Stream::Stderr), e);
        process::exit(1);
    }
}

/// "ok"/"rejected" marker, colored when the stream it goes to is a terminal.
fn badge(ok: bool, stream: atty::Stream) -> String {
    let tty = atty::is(stream);
    match (ok, tty) {
        (true, true) => "\x1b[32m✓\x1b[0m".to_string(),
        (true, false) => "✓".to_string(),
        (false, true) => "\x1b[31m✗\x1b[0m".to_string(),
        (false, false) => "✗".to_string(),
    }
}

/// File bytes copied into storage whose base address is 8-byte aligned.
///
/// `fs::read` hands back a `Vec<u8>` with no base-alignment promise, and the
/// verifier's alignment checks are absolute. Every buffer the CLI verifies
/// goes through this copy so alignment checking is sound by construction.
struct AlignedBuffer {
    storage: Vec<u8>,
    start: usize,
    len: usize,
}

impl AlignedBuffer {
    fn new(bytes: &[u8]) -> Self {
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

    fn as_slice(&self) -> &[u8] {
        &self.storage[self.start..self.start + self.len]
    }
}

fn parse_identifier(raw: &str) -> Result<[u8; 4], Box<dyn Error>> {
    let bytes = raw.as_bytes();
    if bytes.len() != 4 {
        return Err(format!("identifier must be exactly 4 bytes, got {:?}", raw).into());
    }
    let mut id = [0u8; 4];
    id.copy_from_slice(bytes);
    Ok(id)
}

fn load_options(
    limits: Option<&str>,
    max_depth: Option<usize>,
    max_tables: Option<usize>,
    max_apparent_size: Option<u32>,
) -> Result<VerifierOptions, Box<dyn Error>> {
    let mut opts = match limits {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => VerifierOptions::default(),
    };
    if let Some(depth) = max_depth {
        opts = opts.with_max_depth(depth);
    }
    if let Some(tables) = max_tables {
        opts = opts.with_max_tables(tables);
    }
    if let Some(size) = max_apparent_size {
        opts = opts.with_max_apparent_size(size);
    }
    Ok(opts)
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    file: &str,
    id: Option<&str>,
    limits: Option<&str>,
    max_depth: Option<usize>,
    max_tables: Option<usize>,
    max_apparent_size: Option<u32>,
    no_align: bool,
) -> Result<(), Box<dyn Error>> {
    let bytes = AlignedBuffer::new(&fs::read(file)?);
    let opts = load_options(limits, max_depth, max_tables, max_apparent_size)?;
    let mut verifier = Verifier::new(TableBuffer::new(bytes.as_slice()), opts, !no_align)?;

    if let Some(raw) = id {
        let expected = parse_identifier(raw)?;
        verifier.verify_identifier(&expected)?;
    }

    // Without a schema the field types are unknown, so probe every declared
    // slot as a one-byte read: that still proves every stored slot offset
    // lands inside the buffer.
    let slots;
    {
        let mut root = verifier.verify_root()?;
        slots = root.slot_count();
        for slot in 0..slots {
            root.scalar_field(slot, ScalarKind::U8)?;
        }
    }

    println!(
        "{} {}: root table ok ({} slots, {} tables visited, apparent size {} bytes)",
        badge(true, atty::Stream::Stdout),
        file,
        slots,
        verifier.tables_visited(),
        verifier.apparent_size(),
    );
    Ok(())
}

fn run_inspect(file: &str) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(file)?;
    let mut verifier = Verifier::new(
        TableBuffer::new(&bytes),
        VerifierOptions::default(),
        false,
    )?;

    println!("capacity:        {} bytes", verifier.capacity());
    let mut root = verifier.verify_root()?;
    println!("root table:      position {}", root.table_position());
    println!(
        "vtable:          position {}, length {}",
        root.vtable_position(),
        root.vtable_length()
    );
    println!("declared slots:  {}", root.slot_count());
    for slot in 0..root.slot_count() {
        match root.field_position(slot)? {
            Some(position) => println!("  slot {:>3}: field at position {}", slot, position),
            None => println!("  slot {:>3}: absent", slot),
        }
    }
    Ok(())
}
