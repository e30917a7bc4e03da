/*!
# CHIP-0007 Records

The normalized form of one item row. Field declaration order is the
serialized order, so the bytes written for a record (and therefore its
fingerprint) only depend on the record's contents.
*/

use crate::config::CollectionMetadata;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// Value of the `format` field on every record.
pub const CHIP_0007_FORMAT: &str = "CHIP-0007";

/// One `{trait_type, value}` entry of a record's attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub format: String,
    pub name: String,
    pub description: String,
    pub minting_tool: String,
    pub sensitive_content: bool,
    pub series_number: u32,
    pub series_total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub attributes: Vec<Attribute>,
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionMetadata>,
}

impl Record {
    /// Canonical document bytes: pretty-printed with a one-space indent and
    /// no trailing newline.
    pub fn to_canonical_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// A record that made it to disk, with the fingerprint of its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRecord {
    /// Filename column of the source row; the document is `<filename>.json`
    pub filename: String,
    pub record: Record,
    /// Lowercase hex SHA-256 of the document bytes
    pub sha256: String,
}
