//! Conversion of authored records into fixed-shape table entries.

use std::fmt;

use crate::database::OpcodeRecord;
use crate::error::{Error, Result};
use crate::key::OpcodeKey;

/// Number of condition flags described per instruction (Z, H, N, C order as
/// authored in `flags_ZHNC`).
pub const FLAG_COUNT: usize = 4;

/// Operand label emitted for an empty operand slot.
pub const NO_OPERAND: &str = "NONE";

/// How an instruction affects one condition flag.
///
/// Declared in the same order as the consumer's `FlagEffect` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagEffect {
    /// The flag is computed from the result.
    Apply,
    /// The flag is left unchanged.
    Ignore,
    /// The flag is always set.
    Set,
    /// The flag is always cleared.
    Clear,
}

impl FlagEffect {
    /// Map one authored flag code. Any code other than `1`, `0` or `-`
    /// (typically the flag's own letter, or `*`) means the flag is computed.
    pub const fn from_code(code: char) -> Self {
        match code {
            '1' => FlagEffect::Set,
            '0' => FlagEffect::Clear,
            '-' => FlagEffect::Ignore,
            _ => FlagEffect::Apply,
        }
    }

    /// Enumerator name in the generated table.
    pub const fn as_str(self) -> &'static str {
        match self {
            FlagEffect::Apply => "APPLY",
            FlagEffect::Ignore => "IGNORE",
            FlagEffect::Set => "SET",
            FlagEffect::Clear => "CLEAR",
        }
    }
}

impl fmt::Display for FlagEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized table entry.
///
/// `Display` renders the brace-initializer literal without the trailing
/// separator:
///
/// ```
/// use optab::{FlagEffect, Instruction};
///
/// let nop = Instruction {
///     name: "NOP".into(),
///     bytes: 1,
///     operand_count: 0,
///     operand1: "NONE".into(),
///     operand2: "NONE".into(),
///     cycles: 4,
///     branch_cycles: 0,
///     flags: [FlagEffect::Ignore; 4],
/// };
/// assert_eq!(
///     nop.to_string(),
///     r#"{"NOP", 1, 0, "NONE", "NONE", 4, 0, {IGNORE, IGNORE, IGNORE, IGNORE}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub bytes: u32,
    pub operand_count: u32,
    pub operand1: String,
    pub operand2: String,
    pub cycles: u32,
    /// Extra cost when a conditional branch is taken; 0 when not a branch.
    pub branch_cycles: u32,
    pub flags: [FlagEffect; FLAG_COUNT],
}

impl Instruction {
    pub fn has_branch_cycles(&self) -> bool {
        self.branch_cycles != 0
    }
}

// Strings are written verbatim; mnemonics and operand labels in the
// database never contain quotes or backslashes.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [z, h, n, c] = self.flags;
        write!(
            f,
            "{{\"{}\", {}, {}, \"{}\", \"{}\", {}, {}, {{{z}, {h}, {n}, {c}}}}}",
            self.name,
            self.bytes,
            self.operand_count,
            self.operand1,
            self.operand2,
            self.cycles,
            self.branch_cycles,
        )
    }
}

/// Normalize one record into a table entry.
///
/// Fails with [`Error::IncompleteRecord`] naming the first missing required
/// field, [`Error::EmptyCycleList`] when `cycles` has no elements, and
/// [`Error::InvalidFlagEffects`] when `flags_ZHNC` is not exactly
/// [`FLAG_COUNT`] codes long.
pub fn normalize(key: OpcodeKey, record: &OpcodeRecord) -> Result<Instruction> {
    let missing = |field| Error::IncompleteRecord { key, field };

    let name = record.mnemonic.as_deref().ok_or_else(|| missing("mnemonic"))?;
    let bytes = record.bytes.ok_or_else(|| missing("bytes"))?;
    let operand_count = record.operand_count.ok_or_else(|| missing("operand_count"))?;
    let cycles = record.cycles.as_deref().ok_or_else(|| missing("cycles"))?;
    let flags = record.flags.as_deref().ok_or_else(|| missing("flags_ZHNC"))?;

    let (&base, rest) = cycles
        .split_first()
        .ok_or(Error::EmptyCycleList { key })?;
    let branch = rest.first().copied().unwrap_or(0);

    Ok(Instruction {
        name: name.to_owned(),
        bytes,
        operand_count,
        operand1: operand_label(record.operand1.as_deref()),
        operand2: operand_label(record.operand2.as_deref()),
        cycles: base,
        branch_cycles: branch,
        flags: flag_effects(key, flags)?,
    })
}

fn operand_label(operand: Option<&str>) -> String {
    operand.unwrap_or(NO_OPERAND).to_owned()
}

fn flag_effects(key: OpcodeKey, codes: &str) -> Result<[FlagEffect; FLAG_COUNT]> {
    let found = codes.chars().count();
    if found != FLAG_COUNT {
        return Err(Error::InvalidFlagEffects { key, found });
    }
    let mut effects = [FlagEffect::Apply; FLAG_COUNT];
    for (slot, code) in effects.iter_mut().zip(codes.chars()) {
        *slot = FlagEffect::from_code(code);
    }
    Ok(effects)
}
