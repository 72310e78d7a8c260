use std::path::PathBuf;

use thiserror::Error;

use crate::key::OpcodeKey;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed opcode database: {0}")]
    MalformedDatabase(String),

    #[error("Opcode {key}: missing required field `{field}`")]
    IncompleteRecord { key: OpcodeKey, field: &'static str },

    #[error("Opcode {key}: `cycles` is empty")]
    EmptyCycleList { key: OpcodeKey },

    #[error("Opcode {key}: `flags_ZHNC` must hold 4 flag codes, found {found}")]
    InvalidFlagEffects { key: OpcodeKey, found: usize },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("{} is out of date; re-run `optab generate`", .0.display())]
    OutOfDate(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
