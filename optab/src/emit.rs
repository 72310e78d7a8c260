//! Emission of the instruction table source file.
//!
//! The generated file defines two `std::vector<Instruction>` tables, `ops`
//! for the unprefixed opcode space and `ops_cb` for the `0xCB`-prefixed one,
//! each listing one brace-initializer per opcode in ascending opcode order.
//! Output depends only on the database contents.

use std::fmt::Write;

use crate::database::{Database, OpcodeGroup};
use crate::error::Result;
use crate::key::OpcodeKey;
use crate::normalize::{Instruction, normalize};

/// Name of the companion header included by the generated source.
pub const HEADER_FILE: &str = "op_table.h";

/// Table holding the unprefixed opcode space.
pub const PRIMARY_TABLE: &str = "ops";

/// Table holding the `0xCB`-prefixed opcode space.
pub const PREFIXED_TABLE: &str = "ops_cb";

/// Normalized entries of one opcode group, in ascending opcode order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeTable {
    entries: Vec<(OpcodeKey, Instruction)>,
}

impl OpcodeTable {
    /// Normalize every record of `group`. Stops at the first invalid record.
    pub fn build(group: &OpcodeGroup) -> Result<Self> {
        let entries = group
            .iter()
            .map(|(key, record)| normalize(key, record).map(|insn| (key, insn)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpcodeKey, &Instruction)> + '_ {
        self.entries.iter().map(|(k, i)| (*k, i))
    }
}

/// Append one line per entry. Entries are never merged, even when two
/// opcodes normalize to the same literal.
pub fn write_table(out: &mut String, table: &OpcodeTable) {
    for (_, insn) in table.iter() {
        let _ = writeln!(out, "{insn},");
    }
}

/// Render the complete table source for `db`.
///
/// Both groups are normalized before any text is produced, so an invalid
/// record yields an error and no partial output.
pub fn render(db: &Database) -> Result<String> {
    let primary = OpcodeTable::build(&db.unprefixed)?;
    let prefixed = OpcodeTable::build(&db.prefixed)?;
    log::debug!(
        "Normalized {} unprefixed and {} prefixed entries",
        primary.len(),
        prefixed.len()
    );

    let mut out = String::new();
    let _ = writeln!(out, "#include \"{HEADER_FILE}\"");
    let _ = writeln!(out, "#include \"instruction.h\"");
    out.push('\n');
    let _ = writeln!(out, "#include <vector>");
    out.push('\n');
    let _ = writeln!(out, "std::vector<Instruction> {PRIMARY_TABLE} = {{");
    write_table(&mut out, &primary);
    let _ = writeln!(out, "}};");
    let _ = writeln!(out, "std::vector<Instruction> {PREFIXED_TABLE} = {{");
    write_table(&mut out, &prefixed);
    let _ = writeln!(out, "}};");
    Ok(out)
}

/// Render the companion header declaring both tables.
pub fn render_header() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#pragma once");
    out.push('\n');
    let _ = writeln!(out, "#include \"instruction.h\"");
    out.push('\n');
    let _ = writeln!(out, "#include <vector>");
    out.push('\n');
    let _ = writeln!(out, "extern std::vector<Instruction> {PRIMARY_TABLE};");
    let _ = writeln!(out, "extern std::vector<Instruction> {PREFIXED_TABLE};");
    out
}
