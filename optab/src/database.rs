//! Opcode database loader.
//!
//! The database maps the two group names (`"unprefixed"`, `"cbprefixed"`) to
//! maps from hexadecimal opcode key to [`OpcodeRecord`]. Loading performs
//! structural parsing only; records are checked for completeness later, by
//! [`normalize`](crate::normalize::normalize).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};

use crate::error::{Error, Result};
use crate::key::OpcodeKey;

/// Serialization format of a database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick a format from the file extension: `.yaml`/`.yml` is YAML,
    /// anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// One opcode entry as authored in the database.
///
/// Every field is optional at this layer so that a missing field surfaces as
/// [`Error::IncompleteRecord`] naming the opcode, instead of a parse error.
/// Fields not listed here (`addr`, `group`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OpcodeRecord {
    pub mnemonic: Option<String>,
    pub bytes: Option<u32>,
    pub operand_count: Option<u32>,
    pub operand1: Option<String>,
    pub operand2: Option<String>,
    pub cycles: Option<Vec<u32>>,
    #[serde(rename = "flags_ZHNC")]
    pub flags: Option<String>,
}

/// Records of one opcode space, ordered by numeric opcode value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeGroup {
    records: BTreeMap<OpcodeKey, OpcodeRecord>,
}

impl OpcodeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. Fails if an opcode with the same numeric value is
    /// already present.
    pub fn insert(&mut self, key: OpcodeKey, record: OpcodeRecord) -> Result<()> {
        if self.records.contains_key(&key) {
            return Err(Error::MalformedDatabase(format!("duplicate opcode key {key}")));
        }
        self.records.insert(key, record);
        Ok(())
    }

    pub fn get(&self, key: OpcodeKey) -> Option<&OpcodeRecord> {
        self.records.get(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in ascending opcode order.
    pub fn iter(&self) -> impl Iterator<Item = (OpcodeKey, &OpcodeRecord)> + '_ {
        self.records.iter().map(|(k, r)| (*k, r))
    }

    /// Lowest and highest opcode in the group.
    pub fn key_range(&self) -> Option<(OpcodeKey, OpcodeKey)> {
        let first = self.records.keys().next()?;
        let last = self.records.keys().next_back()?;
        Some((*first, *last))
    }
}

struct GroupVisitor;

impl<'de> Visitor<'de> for GroupVisitor {
    type Value = OpcodeGroup;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from opcode key to opcode record")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut map: A,
    ) -> std::result::Result<OpcodeGroup, A::Error> {
        let mut group = OpcodeGroup::new();
        while let Some((key, record)) = map.next_entry::<OpcodeKey, OpcodeRecord>()? {
            if group.insert(key, record).is_err() {
                return Err(de::Error::custom(format_args!("duplicate opcode key {key}")));
            }
        }
        Ok(group)
    }
}

// A plain BTreeMap would keep the last of two equal keys without complaint.
impl<'de> Deserialize<'de> for OpcodeGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(GroupVisitor)
    }
}

/// The whole opcode database: the primary opcode space and the secondary,
/// `0xCB`-prefixed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Database {
    pub unprefixed: OpcodeGroup,
    #[serde(rename = "cbprefixed")]
    pub prefixed: OpcodeGroup,
}

impl Database {
    /// Load a database, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_format(path, Format::from_path(path))
    }

    /// Load a database in an explicit format.
    pub fn load_with_format(path: &Path, format: Format) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::MalformedDatabase(format!("cannot read {}: {e}", path.display()))
        })?;
        let db = Self::parse(&text, format).map_err(|e| match e {
            Error::MalformedDatabase(msg) => {
                Error::MalformedDatabase(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        log::debug!(
            "Loaded {}: {} unprefixed, {} prefixed opcodes",
            path.display(),
            db.unprefixed.len(),
            db.prefixed.len()
        );
        Ok(db)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::parse(text, Format::Json)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::parse(text, Format::Yaml)
    }

    pub fn parse(text: &str, format: Format) -> Result<Self> {
        let db: Self = match format {
            Format::Json => serde_json::from_str(text)
                .map_err(|e| Error::MalformedDatabase(e.to_string()))?,
            Format::Yaml => serde_yaml::from_str(text)
                .map_err(|e| Error::MalformedDatabase(e.to_string()))?,
        };
        for (name, group) in db.groups() {
            for (key, _) in group.iter().filter(|(k, _)| !k.is_byte()) {
                log::warn!("{name} opcode {key} does not fit in one byte");
            }
        }
        Ok(db)
    }

    /// Both groups in emission order, with their database names.
    pub fn groups(&self) -> [(&'static str, &OpcodeGroup); 2] {
        [("unprefixed", &self.unprefixed), ("cbprefixed", &self.prefixed)]
    }
}
