use crate::metadata_compiler::{CompilerError, CompilerResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory the per-item documents are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "nft-jsons";

/// Default number of items in a series.
pub const DEFAULT_SERIES_TOTAL: u32 = 420;

/// Separator between the key and value of one attribute token.
pub const ATTRIBUTE_KEY_VALUE_SEPARATOR: char = ':';

/// Which revision of the document schema to emit.
///
/// Both revisions share one compile path; the variant only answers which
/// fields are emitted and how strict validation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Gender folded into `attributes`, no collection block, `SHA256` column.
    Chip0007,

    /// Separate `gender` field, fixed `collection` block, `Hash` column.
    #[default]
    Collection,
}

impl SchemaVariant {
    /// Label appended to the header row of the annotated sheet.
    pub fn hash_header(self) -> &'static str {
        match self {
            SchemaVariant::Chip0007 => "SHA256",
            SchemaVariant::Collection => "Hash",
        }
    }

    /// Whether gender is emitted as a synthesized `gender` attribute.
    pub fn gender_as_attribute(self) -> bool {
        matches!(self, SchemaVariant::Chip0007)
    }

    /// Whether an item row without a gender is rejected.
    pub fn requires_gender(self) -> bool {
        matches!(self, SchemaVariant::Collection)
    }

    /// Whether the fixed collection block is attached to every record.
    pub fn emits_collection(self) -> bool {
        matches!(self, SchemaVariant::Collection)
    }
}

/// One `{type, value}` entry of the collection block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAttribute {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Collection block shared by every record of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub name: String,
    pub id: String,
    pub attributes: Vec<CollectionAttribute>,
}

impl Default for CollectionMetadata {
    fn default() -> Self {
        Self {
            name: "Zuri NFT Tickets for Free Lunch".to_string(),
            id: "b774f676-c1d5-422e-beed-00ef5510c64d".to_string(),
            attributes: vec![CollectionAttribute {
                kind: "description".to_string(),
                value: "Rewards for accomplishments during HNGi9.".to_string(),
            }],
        }
    }
}

/// Everything a compile run needs besides the rows themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Schema revision to emit
    pub schema: SchemaVariant,

    /// Directory the per-item documents are written to
    pub output_dir: PathBuf,

    /// Constant `series_total` written into every record
    pub series_total: u32,

    /// Characters separating attribute tokens in the `Attributes` column
    pub attribute_separators: Vec<char>,

    /// Collection block, only emitted by [`SchemaVariant::Collection`]
    pub collection: CollectionMetadata,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schema: SchemaVariant::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            series_total: DEFAULT_SERIES_TOTAL,
            attribute_separators: vec![';', ','],
            collection: CollectionMetadata::default(),
        }
    }
}

impl CompilerConfig {
    pub fn validate(&self) -> CompilerResult<()> {
        if self.attribute_separators.is_empty() {
            return Err(CompilerError::InvalidConfig(
                "at least one attribute separator is required".to_string(),
            ));
        }

        if self
            .attribute_separators
            .contains(&ATTRIBUTE_KEY_VALUE_SEPARATOR)
        {
            return Err(CompilerError::InvalidConfig(format!(
                "'{ATTRIBUTE_KEY_VALUE_SEPARATOR}' separates attribute keys from values and cannot separate attributes"
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(CompilerError::InvalidConfig(
                "output directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
