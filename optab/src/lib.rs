//! Instruction table generator for a Game Boy style CPU emulator.
//!
//! Reads an opcode database (one record per opcode, split into the
//! unprefixed and `0xCB`-prefixed spaces) and emits the statically
//! initialized `Instruction` tables the emulator's dispatch loop indexes by
//! opcode.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let db = optab::Database::load(Path::new("ops.json"))?;
//! optab::generate(&db, Path::new("op_table.cpp"), None)?;
//! # Ok::<(), optab::Error>(())
//! ```

pub mod database;
pub mod emit;
pub mod error;
pub mod key;
pub mod normalize;
pub mod output;

use std::path::Path;

pub use database::{Database, Format, OpcodeGroup, OpcodeRecord};
pub use emit::{OpcodeTable, render, render_header};
pub use error::{Error, Result};
pub use key::OpcodeKey;
pub use normalize::{FlagEffect, Instruction, normalize};

/// Render `db` and publish it at `output`, plus the companion header at
/// `header` when given.
///
/// Nothing is written unless every record normalizes. Each file is replaced
/// atomically on its own. The header goes first: its text does not depend
/// on `db`, so a failure while publishing the table never leaves a new
/// table beside a missing or stale header.
pub fn generate(db: &Database, output: &Path, header: Option<&Path>) -> Result<()> {
    let source = render(db)?;
    if let Some(header) = header {
        output::write_atomic(header, render_header().as_bytes())?;
    }
    output::write_atomic(output, source.as_bytes())
}

/// Verify that the files at `output` (and `header`, when given) match what
/// [`generate`] would write for `db`.
pub fn check(db: &Database, output: &Path, header: Option<&Path>) -> Result<()> {
    output::check_up_to_date(output, &render(db)?)?;
    if let Some(header) = header {
        output::check_up_to_date(header, &render_header())?;
    }
    Ok(())
}
